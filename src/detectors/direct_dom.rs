use crate::core::codec;
use crate::core::metrics::{SmellMetrics, SAMPLE_LIMIT};
use crate::core::syntax::{SyntaxKind, SyntaxNode};
use crate::core::{Finding, Occurrence, Severity, SmellKind};
use crate::severity;
use std::path::Path;

const DOM_OBJECTS: &[&str] = &["document", "window"];

const NATIVE_DOM_METHODS: &[&str] = &[
    "getElementById",
    "querySelector",
    "querySelectorAll",
    "createElement",
    "addEventListener",
    "removeEventListener",
];

/// Counts DOM access that bypasses the framework: native `document`/`window`
/// API calls and `angular.element` wrapping. Any native call escalates the
/// file to CRITICAL because it cannot survive a virtual-DOM rewrite.
#[derive(Default)]
pub struct DirectDomDetector {
    occurrences: Vec<Occurrence>,
    native_count: usize,
    wrapper_count: usize,
}

impl DirectDomDetector {
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
        let (Some(object), Some(method)) = (object.identifier_name(), property.as_deref()) else {
            return;
        };

        if DOM_OBJECTS.contains(&object) && NATIVE_DOM_METHODS.contains(&method) {
            self.native_count += 1;
        } else if object == "angular" && method == "element" {
            self.wrapper_count += 1;
        } else {
            return;
        }
        self.occurrences
            .push(Occurrence::new(node.position, format!("{object}.{method}")));
    }

    pub fn finalize(self, path: &Path) -> Option<Finding> {
        let anchor = self.occurrences.first()?.position;
        let total = self.occurrences.len();
        let escalation = (self.native_count > 0).then_some(Severity::Critical);
        let severity = severity::escalate(
            severity::classify(SmellKind::DirectDomAccess, total),
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
            "{} direct DOM accesses ({} native, {} angular.element)",
            total, self.native_count, self.wrapper_count
        );
        let metrics = SmellMetrics::DirectDomAccess {
            severity,
            total_occurrences: total,
            native_count: self.native_count,
            wrapper_count: self.wrapper_count,
            samples,
            locations,
        };

        Some(Finding {
            file: path.to_path_buf(),
            smell: SmellKind::DirectDomAccess,
            message: codec::encode(&metrics, &detail),
            position: anchor,
        })
    }
}
