use super::scope_property;
use crate::core::codec;
use crate::core::metrics::{SmellMetrics, SAMPLE_LIMIT};
use crate::core::syntax::{SyntaxKind, SyntaxNode};
use crate::core::{Finding, Occurrence, SmellKind};
use crate::severity;
use std::path::Path;

/// Counts direct property assignments onto `$scope`. A controller that
/// spreads its whole view model across the shared handle has no seam to
/// cut a component out along.
#[derive(Default)]
pub struct ScopeSprawlDetector {
    occurrences: Vec<Occurrence>,
    data_assignments: usize,
    function_assignments: usize,
}

impl ScopeSprawlDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, node: &SyntaxNode) {
        let SyntaxKind::Assignment { target, value } = &node.kind else {
            return;
        };
        let Some(property) = scope_property(target) else {
            return;
        };
        // Framework-owned members like $watch or $apply are not view model.
        if property.starts_with('$') {
            return;
        }

        if matches!(value.kind, SyntaxKind::FunctionLiteral { .. }) {
            self.function_assignments += 1;
        } else {
            self.data_assignments += 1;
        }
        self.occurrences.push(Occurrence::new(node.position, property));
    }

    pub fn finalize(self, path: &Path) -> Option<Finding> {
        let anchor = self.occurrences.first()?.position;
        let total = self.occurrences.len();
        let severity = severity::classify(SmellKind::ScopePropertySprawl, total)?;

        let samples: Vec<String> = self
            .occurrences
            .iter()
            .take(SAMPLE_LIMIT)
            .map(|o| o.label.clone())
            .collect();
        let locations = self.occurrences.iter().map(|o| o.position).collect();

        let detail = format!(
            "$scope carries {} direct property assignments ({} data, {} functions)",
            total, self.data_assignments, self.function_assignments
        );
        let metrics = SmellMetrics::ScopePropertySprawl {
            severity,
            total_occurrences: total,
            data_assignments: self.data_assignments,
            function_assignments: self.function_assignments,
            samples,
            locations,
        };

        Some(Finding {
            file: path.to_path_buf(),
            smell: SmellKind::ScopePropertySprawl,
            message: codec::encode(&metrics, &detail),
            position: anchor,
        })
    }
}
