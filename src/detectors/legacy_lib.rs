use super::chain_root_name;
use crate::core::codec;
use crate::core::metrics::{SmellMetrics, SAMPLE_LIMIT};
use crate::core::syntax::{SyntaxKind, SyntaxNode};
use crate::core::{Finding, Occurrence, Severity, SmellKind};
use crate::severity;
use std::path::Path;

const LIBRARY_ALIASES: &[&str] = &["$", "jQuery"];

const DOM_METHODS: &[&str] = &[
    "html",
    "text",
    "append",
    "prepend",
    "remove",
    "addClass",
    "removeClass",
    "css",
    "on",
    "off",
    "ready",
];

const NETWORK_METHODS: &[&str] = &["ajax", "get", "post"];

/// Counts jQuery-style calls rooted at the `$`/`jQuery` alias. DOM
/// manipulation grades by volume; any network call escalates to CRITICAL
/// because the data layer has to move before the view can.
#[derive(Default)]
pub struct LegacyLibDetector {
    occurrences: Vec<Occurrence>,
    dom_count: usize,
    ajax_count: usize,
}

impl LegacyLibDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, node: &SyntaxNode) {
        let SyntaxKind::Call { callee, .. } = &node.kind else {
            return;
        };
        let SyntaxKind::Member { object, property } = &callee.kind else {
            return;
        };
        let Some(method) = property.as_deref() else {
            return;
        };
        let Some(root) = chain_root_name(object) else {
            return;
        };
        if !LIBRARY_ALIASES.contains(&root) {
            return;
        }

        if NETWORK_METHODS.contains(&method) {
            self.ajax_count += 1;
        } else if DOM_METHODS.contains(&method) {
            self.dom_count += 1;
        } else {
            return;
        }
        self.occurrences.push(Occurrence::new(node.position, method));
    }

    pub fn finalize(self, path: &Path) -> Option<Finding> {
        let anchor = self.occurrences.first()?.position;
        let total = self.occurrences.len();
        let escalation = (self.ajax_count > 0).then_some(Severity::Critical);
        let severity = severity::escalate(
            severity::classify(SmellKind::LegacyDomLibraryUsage, total),
            escalation,
        )?;

        let samples: Vec<String> = self
            .occurrences
            .iter()
            .take(SAMPLE_LIMIT)
            .map(|o| o.label.clone())
            .collect();
        let locations = self.occurrences.iter().map(|o| o.position).collect();

        let detail = format!(
            "{} jQuery calls ({} DOM manipulation, {} network)",
            total, self.dom_count, self.ajax_count
        );
        let metrics = SmellMetrics::LegacyDomLibraryUsage {
            severity,
            total_occurrences: total,
            dom_count: self.dom_count,
            ajax_count: self.ajax_count,
            samples,
            locations,
        };

        Some(Finding {
            file: path.to_path_buf(),
            smell: SmellKind::LegacyDomLibraryUsage,
            message: codec::encode(&metrics, &detail),
            position: anchor,
        })
    }
}
