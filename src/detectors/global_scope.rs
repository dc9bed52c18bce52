use crate::core::codec;
use crate::core::metrics::{SmellMetrics, SAMPLE_LIMIT};
use crate::core::syntax::{SyntaxKind, SyntaxNode};
use crate::core::{Finding, SmellKind, SourcePosition};
use crate::severity;
use std::collections::HashSet;
use std::path::Path;

const ROOT_HANDLE: &str = "$rootScope";

/// Counts every `$rootScope` reference and classifies each as an
/// assignment, a function call, or a plain read. Matching is by name only;
/// a local rebinding of the name counts like the real handle.
#[derive(Default)]
pub struct GlobalScopeDetector {
    positions: Vec<SourcePosition>,
    member_names: Vec<String>,
    assignments: usize,
    function_calls: usize,
    reads: usize,
    claimed: HashSet<SourcePosition>,
}

impl GlobalScopeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    // Preorder traversal guarantees the outermost context sees the handle
    // first; `claimed` keeps each identifier token to a single count.
    pub fn visit(&mut self, node: &SyntaxNode) {
        match &node.kind {
            SyntaxKind::Assignment { target, .. } => {
                if let Some((handle, member)) = handle_chain(target) {
                    self.record_claim(handle, member, UsageKind::Assignment);
                }
            }
            SyntaxKind::Call { callee, .. } => {
                if let Some((handle, member)) = handle_chain(callee) {
                    self.record_claim(handle, member, UsageKind::FunctionCall);
                }
            }
            SyntaxKind::Identifier { name } if name == ROOT_HANDLE => {
                self.record_claim(node, None, UsageKind::Read);
            }
            _ => {}
        }
    }

    fn record_claim(&mut self, handle: &SyntaxNode, member: Option<&str>, usage: UsageKind) {
        if !self.claimed.insert(handle.position) {
            return;
        }
        match usage {
            UsageKind::Assignment => self.assignments += 1,
            UsageKind::FunctionCall => self.function_calls += 1,
            UsageKind::Read => self.reads += 1,
        }
        if let Some(member) = member {
            self.member_names.push(member.to_string());
        }
        self.positions.push(handle.position);
    }

    pub fn finalize(self, path: &Path) -> Option<Finding> {
        let anchor = *self.positions.first()?;
        let total = self.positions.len();
        let severity = severity::classify(SmellKind::GlobalScopeLeak, total)?;

        let samples: Vec<String> = self
            .member_names
            .iter()
            .take(SAMPLE_LIMIT)
            .cloned()
            .collect();

        let detail = format!(
            "$rootScope referenced {} times ({} assignments, {} calls, {} reads)",
            total, self.assignments, self.function_calls, self.reads
        );
        let metrics = SmellMetrics::GlobalScopeLeak {
            severity,
            total_occurrences: total,
            assignments: self.assignments,
            function_calls: self.function_calls,
            reads: self.reads,
            samples,
            locations: self.positions,
        };

        Some(Finding {
            file: path.to_path_buf(),
            smell: SmellKind::GlobalScopeLeak,
            message: codec::encode(&metrics, &detail),
            position: anchor,
        })
    }
}

#[derive(Clone, Copy)]
enum UsageKind {
    Assignment,
    FunctionCall,
    Read,
}

/// Resolve an expression whose member/call chain is rooted at the global
/// handle. Returns the handle's identifier node and the member name nearest
/// to it (`user` for `$rootScope.user.name`).
fn handle_chain<'a>(expr: &'a SyntaxNode) -> Option<(&'a SyntaxNode, Option<&'a str>)> {
    match &expr.kind {
        SyntaxKind::Identifier { name } if name == ROOT_HANDLE => Some((expr, None)),
        SyntaxKind::Member { object, property } => {
            let (handle, inner) = handle_chain(object)?;
            Some((handle, inner.or(property.as_deref())))
        }
        SyntaxKind::Call { callee, .. } => handle_chain(callee),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Severity;
    use pretty_assertions::assert_eq;

    fn pos(line: usize, column: usize) -> SourcePosition {
        SourcePosition::new(line, column)
    }

    fn run(tree: &SyntaxNode) -> Option<SmellMetrics> {
        let mut detector = GlobalScopeDetector::new();
        tree.walk(&mut |node| detector.visit(node));
        let finding = detector.finalize(Path::new("ctrl.js"))?;
        let (payload, _) = codec::decode(&finding.message);
        Some(serde_json::from_value(payload.unwrap()).unwrap())
    }

    #[test]
    fn single_read_is_medium() {
        let tree = SyntaxNode::root(vec![SyntaxNode::identifier(ROOT_HANDLE, pos(2, 4))]);

        let metrics = run(&tree).unwrap();
        assert_eq!(
            metrics,
            SmellMetrics::GlobalScopeLeak {
                severity: Severity::Medium,
                total_occurrences: 1,
                assignments: 0,
                function_calls: 0,
                reads: 1,
                samples: vec![],
                locations: vec![pos(2, 4)],
            }
        );
    }

    #[test]
    fn each_identifier_token_counts_exactly_once() {
        // $rootScope.user = $rootScope.load()
        let handle_target = SyntaxNode::identifier(ROOT_HANDLE, pos(3, 0));
        let handle_callee = SyntaxNode::identifier(ROOT_HANDLE, pos(3, 18));
        let tree = SyntaxNode::root(vec![SyntaxNode::assignment(
            SyntaxNode::member(handle_target, Some("user"), pos(3, 0)),
            SyntaxNode::call(
                SyntaxNode::member(handle_callee, Some("load"), pos(3, 18)),
                vec![],
                pos(3, 18),
            ),
            pos(3, 0),
        )]);

        let metrics = run(&tree).unwrap();
        assert_eq!(metrics.total_occurrences(), 2);
        let SmellMetrics::GlobalScopeLeak {
            assignments,
            function_calls,
            reads,
            samples,
            ..
        } = metrics
        else {
            panic!("wrong variant");
        };
        assert_eq!((assignments, function_calls, reads), (1, 1, 0));
        assert_eq!(samples, vec!["user".to_string(), "load".to_string()]);
    }

    #[test]
    fn direct_call_of_the_handle_is_a_function_call() {
        let tree = SyntaxNode::root(vec![SyntaxNode::call(
            SyntaxNode::identifier(ROOT_HANDLE, pos(1, 0)),
            vec![],
            pos(1, 0),
        )]);

        let SmellMetrics::GlobalScopeLeak {
            function_calls,
            reads,
            ..
        } = run(&tree).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(function_calls, 1);
        assert_eq!(reads, 0);
    }

    #[test]
    fn nested_member_reads_classify_as_reads() {
        // var name = $rootScope.user.name;
        let tree = SyntaxNode::root(vec![SyntaxNode::member(
            SyntaxNode::member(
                SyntaxNode::identifier(ROOT_HANDLE, pos(5, 11)),
                Some("user"),
                pos(5, 11),
            ),
            Some("name"),
            pos(5, 11),
        )]);

        let SmellMetrics::GlobalScopeLeak { reads, samples, .. } = run(&tree).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(reads, 1);
        // Plain reads carry no member sample.
        assert_eq!(samples, Vec::<String>::new());
    }

    #[test]
    fn three_occurrences_reach_critical() {
        let tree = SyntaxNode::root(vec![
            SyntaxNode::identifier(ROOT_HANDLE, pos(1, 0)),
            SyntaxNode::identifier(ROOT_HANDLE, pos(2, 0)),
            SyntaxNode::identifier(ROOT_HANDLE, pos(3, 0)),
        ]);
        assert_eq!(run(&tree).unwrap().severity(), Severity::Critical);
    }

    #[test]
    fn other_identifiers_do_not_count() {
        let tree = SyntaxNode::root(vec![
            SyntaxNode::identifier("$scope", pos(1, 0)),
            SyntaxNode::identifier("rootScope", pos(2, 0)),
        ]);
        assert_eq!(run(&tree), None);
    }
}
