//! Count-to-tier classification policy, one threshold table per smell.

use crate::core::{Severity, SmellKind};

type ThresholdTable = &'static [(usize, Severity)];

const SCOPE_PROPERTY_SPRAWL: ThresholdTable = &[
    (10, Severity::Critical),
    (5, Severity::High),
    (3, Severity::Medium),
];

const GLOBAL_SCOPE_LEAK: ThresholdTable = &[
    (3, Severity::Critical),
    (2, Severity::High),
    (1, Severity::Medium),
];

const CONTROLLER_METHOD_SPRAWL: ThresholdTable = &[(3, Severity::Critical), (1, Severity::High)];

const TEMPLATE_BINDING_COUPLING: ThresholdTable = &[
    (15, Severity::Critical),
    (8, Severity::High),
    (5, Severity::Medium),
];

const DIRECT_DOM_ACCESS: ThresholdTable = &[
    (3, Severity::Critical),
    (2, Severity::High),
    (1, Severity::Medium),
];

const LEGACY_DOM_LIBRARY_USAGE: ThresholdTable = &[
    (5, Severity::Critical),
    (3, Severity::High),
    (1, Severity::Medium),
];

fn thresholds(kind: SmellKind) -> ThresholdTable {
    match kind {
        SmellKind::ScopePropertySprawl => SCOPE_PROPERTY_SPRAWL,
        SmellKind::GlobalScopeLeak => GLOBAL_SCOPE_LEAK,
        SmellKind::ControllerMethodSprawl => CONTROLLER_METHOD_SPRAWL,
        SmellKind::TemplateBindingCoupling => TEMPLATE_BINDING_COUPLING,
        SmellKind::DirectDomAccess => DIRECT_DOM_ACCESS,
        SmellKind::LegacyDomLibraryUsage => LEGACY_DOM_LIBRARY_USAGE,
    }
}

/// Map an occurrence count to a tier. None means the count is below the
/// smell's lowest threshold and no finding is warranted on count alone.
pub fn classify(kind: SmellKind, count: usize) -> Option<Severity> {
    thresholds(kind)
        .iter()
        .find(|(at, _)| count >= *at)
        .map(|(_, tier)| *tier)
}

/// Combine a count tier with a content-escalation tier. A finding is
/// emitted when either side is present; the final tier is the max.
pub fn escalate(count_tier: Option<Severity>, escalation: Option<Severity>) -> Option<Severity> {
    count_tier.max(escalation)
}
