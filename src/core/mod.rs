pub mod codec;
pub mod metrics;
pub mod syntax;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Ordered severity tiers. `Unknown` is assigned only by the report
/// formatter when a finding's embedded metrics cannot be decoded;
/// detectors never produce it.
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
    Unknown,
}

impl Severity {
    /// Rank used to order report entries, most severe first.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Severity::Critical => 1,
            Severity::High => 2,
            Severity::Medium => 3,
            Severity::Low => 4,
            Severity::Unknown => 5,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        static DISPLAY_STRINGS: &[(Severity, &str)] = &[
            (Severity::Low, "LOW"),
            (Severity::Medium, "MEDIUM"),
            (Severity::High, "HIGH"),
            (Severity::Critical, "CRITICAL"),
            (Severity::Unknown, "UNKNOWN"),
        ];

        let display_str = DISPLAY_STRINGS
            .iter()
            .find(|(s, _)| s == self)
            .map(|(_, s)| *s)
            .unwrap_or("UNKNOWN");

        write!(f, "{display_str}")
    }
}

/// The six migration-blocking anti-patterns this tool recognizes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SmellKind {
    #[serde(rename = "scope-property-sprawl")]
    ScopePropertySprawl,
    #[serde(rename = "global-scope-leak")]
    GlobalScopeLeak,
    #[serde(rename = "controller-method-sprawl")]
    ControllerMethodSprawl,
    #[serde(rename = "template-binding-coupling")]
    TemplateBindingCoupling,
    #[serde(rename = "direct-dom-access")]
    DirectDomAccess,
    #[serde(rename = "legacy-dom-library-usage")]
    LegacyDomLibraryUsage,
}

impl SmellKind {
    pub fn rule_id(&self) -> &'static str {
        static RULE_IDS: &[(SmellKind, &str)] = &[
            (SmellKind::ScopePropertySprawl, "scope-property-sprawl"),
            (SmellKind::GlobalScopeLeak, "global-scope-leak"),
            (SmellKind::ControllerMethodSprawl, "controller-method-sprawl"),
            (SmellKind::TemplateBindingCoupling, "template-binding-coupling"),
            (SmellKind::DirectDomAccess, "direct-dom-access"),
            (SmellKind::LegacyDomLibraryUsage, "legacy-dom-library-usage"),
        ];

        RULE_IDS
            .iter()
            .find(|(k, _)| k == self)
            .map(|(_, id)| *id)
            .unwrap_or("unknown")
    }
}

impl std::fmt::Display for SmellKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rule_id())
    }
}

/// Source position with a 1-based line and a 0-based byte column.
#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// One matched instance of a smell, accumulated per file and discarded
/// once the file's finding is emitted.
#[derive(Clone, Debug)]
pub struct Occurrence {
    pub position: SourcePosition,
    pub label: String,
}

impl Occurrence {
    pub fn new(position: SourcePosition, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// A detector's conclusion about one file. The message string is the only
/// channel carrying metrics to the report stage; see [`codec`].
#[derive(Clone, Debug, PartialEq)]
pub struct Finding {
    pub file: PathBuf,
    pub smell: SmellKind,
    pub message: String,
    pub position: SourcePosition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Script,
    Markup,
}

impl FileKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        static EXTENSION_MAP: &[(&[&str], FileKind)] = &[
            (&["js", "mjs", "cjs"], FileKind::Script),
            (&["html", "htm"], FileKind::Markup),
        ];

        EXTENSION_MAP
            .iter()
            .find(|(exts, _)| exts.contains(&ext))
            .map(|(_, kind)| *kind)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}
