use super::{Severity, SmellKind, SourcePosition};
use serde::{Deserialize, Serialize};

/// Cap on sample discriminators carried in a finding's metrics.
pub const SAMPLE_LIMIT: usize = 5;

/// Structured diagnostic detail behind a finding, one variant per smell.
///
/// The wire form is internally tagged on `issue` with the rule id, so a
/// decoded payload identifies its own smell. Field names are camelCase to
/// match the report artifact. `samples` preserve source-appearance order
/// and are capped at [`SAMPLE_LIMIT`]; `locations` carry every occurrence.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "issue")]
pub enum SmellMetrics {
    #[serde(rename = "scope-property-sprawl", rename_all = "camelCase")]
    ScopePropertySprawl {
        severity: Severity,
        total_occurrences: usize,
        data_assignments: usize,
        function_assignments: usize,
        samples: Vec<String>,
        locations: Vec<SourcePosition>,
    },
    #[serde(rename = "global-scope-leak", rename_all = "camelCase")]
    GlobalScopeLeak {
        severity: Severity,
        total_occurrences: usize,
        assignments: usize,
        function_calls: usize,
        reads: usize,
        samples: Vec<String>,
        locations: Vec<SourcePosition>,
    },
    #[serde(rename = "controller-method-sprawl", rename_all = "camelCase")]
    ControllerMethodSprawl {
        severity: Severity,
        total_occurrences: usize,
        samples: Vec<String>,
        locations: Vec<SourcePosition>,
    },
    #[serde(rename = "template-binding-coupling", rename_all = "camelCase")]
    TemplateBindingCoupling {
        severity: Severity,
        total_occurrences: usize,
        binding_count: usize,
        attribute_refs: usize,
        method_references: usize,
        samples: Vec<String>,
        locations: Vec<SourcePosition>,
    },
    #[serde(rename = "direct-dom-access", rename_all = "camelCase")]
    DirectDomAccess {
        severity: Severity,
        total_occurrences: usize,
        native_count: usize,
        wrapper_count: usize,
        samples: Vec<String>,
        locations: Vec<SourcePosition>,
    },
    #[serde(rename = "legacy-dom-library-usage", rename_all = "camelCase")]
    LegacyDomLibraryUsage {
        severity: Severity,
        total_occurrences: usize,
        dom_count: usize,
        ajax_count: usize,
        samples: Vec<String>,
        locations: Vec<SourcePosition>,
    },
}

impl SmellMetrics {
    pub fn kind(&self) -> SmellKind {
        match self {
            SmellMetrics::ScopePropertySprawl { .. } => SmellKind::ScopePropertySprawl,
            SmellMetrics::GlobalScopeLeak { .. } => SmellKind::GlobalScopeLeak,
            SmellMetrics::ControllerMethodSprawl { .. } => SmellKind::ControllerMethodSprawl,
            SmellMetrics::TemplateBindingCoupling { .. } => SmellKind::TemplateBindingCoupling,
            SmellMetrics::DirectDomAccess { .. } => SmellKind::DirectDomAccess,
            SmellMetrics::LegacyDomLibraryUsage { .. } => SmellKind::LegacyDomLibraryUsage,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SmellMetrics::ScopePropertySprawl { severity, .. }
            | SmellMetrics::GlobalScopeLeak { severity, .. }
            | SmellMetrics::ControllerMethodSprawl { severity, .. }
            | SmellMetrics::TemplateBindingCoupling { severity, .. }
            | SmellMetrics::DirectDomAccess { severity, .. }
            | SmellMetrics::LegacyDomLibraryUsage { severity, .. } => *severity,
        }
    }

    pub fn total_occurrences(&self) -> usize {
        match self {
            SmellMetrics::ScopePropertySprawl {
                total_occurrences, ..
            }
            | SmellMetrics::GlobalScopeLeak {
                total_occurrences, ..
            }
            | SmellMetrics::ControllerMethodSprawl {
                total_occurrences, ..
            }
            | SmellMetrics::TemplateBindingCoupling {
                total_occurrences, ..
            }
            | SmellMetrics::DirectDomAccess {
                total_occurrences, ..
            }
            | SmellMetrics::LegacyDomLibraryUsage {
                total_occurrences, ..
            } => *total_occurrences,
        }
    }

    pub fn samples(&self) -> &[String] {
        match self {
            SmellMetrics::ScopePropertySprawl { samples, .. }
            | SmellMetrics::GlobalScopeLeak { samples, .. }
            | SmellMetrics::ControllerMethodSprawl { samples, .. }
            | SmellMetrics::TemplateBindingCoupling { samples, .. }
            | SmellMetrics::DirectDomAccess { samples, .. }
            | SmellMetrics::LegacyDomLibraryUsage { samples, .. } => samples,
        }
    }

    pub fn locations(&self) -> &[SourcePosition] {
        match self {
            SmellMetrics::ScopePropertySprawl { locations, .. }
            | SmellMetrics::GlobalScopeLeak { locations, .. }
            | SmellMetrics::ControllerMethodSprawl { locations, .. }
            | SmellMetrics::TemplateBindingCoupling { locations, .. }
            | SmellMetrics::DirectDomAccess { locations, .. }
            | SmellMetrics::LegacyDomLibraryUsage { locations, .. } => locations,
        }
    }
}
