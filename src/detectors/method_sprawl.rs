use super::scope_property;
use crate::core::codec;
use crate::core::metrics::{SmellMetrics, SAMPLE_LIMIT};
use crate::core::syntax::{SyntaxKind, SyntaxNode};
use crate::core::{Finding, Occurrence, SmellKind};
use crate::severity;
use std::path::Path;

/// Counts function literals assigned onto `$scope`. A strict subset of
/// scope-property-sprawl, reported separately because imperative logic on
/// the shared handle is the harder half to untangle.
#[derive(Default)]
pub struct MethodSprawlDetector {
    occurrences: Vec<Occurrence>,
    distinct_names: Vec<String>,
}

impl MethodSprawlDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, node: &SyntaxNode) {
        let SyntaxKind::Assignment { target, value } = &node.kind else {
            return;
        };
        if !matches!(value.kind, SyntaxKind::FunctionLiteral { .. }) {
            return;
        }
        let Some(property) = scope_property(target) else {
            return;
        };
        if property.starts_with('$') {
            return;
        }

        if !self.distinct_names.iter().any(|n| n == property) {
            self.distinct_names.push(property.to_string());
        }
        self.occurrences.push(Occurrence::new(node.position, property));
    }

    pub fn finalize(self, path: &Path) -> Option<Finding> {
        let anchor = self.occurrences.first()?.position;
        let total = self.occurrences.len();
        let severity = severity::classify(SmellKind::ControllerMethodSprawl, total)?;

        let samples: Vec<String> = self
            .distinct_names
            .iter()
            .take(SAMPLE_LIMIT)
            .cloned()
            .collect();
        let locations = self.occurrences.iter().map(|o| o.position).collect();

        let detail = format!("{total} controller methods attached to $scope");
        let metrics = SmellMetrics::ControllerMethodSprawl {
            severity,
            total_occurrences: total,
            samples,
            locations,
        };

        Some(Finding {
            file: path.to_path_buf(),
            smell: SmellKind::ControllerMethodSprawl,
            message: codec::encode(&metrics, &detail),
            position: anchor,
        })
    }
}
