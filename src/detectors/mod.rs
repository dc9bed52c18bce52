// Pattern detector infrastructure.
//
// Each detector is a per-file accumulator: `visit` is called for every node
// of the file's tree in preorder, and the consuming `finalize` computes the
// severity tier and emits at most one finding per file. Occurrences are
// aggregated into the finding's metrics, never reported individually.

pub mod direct_dom;
pub mod global_scope;
pub mod legacy_lib;
pub mod method_sprawl;
pub mod scope_sprawl;
pub mod template_coupling;

use crate::core::syntax::{SyntaxKind, SyntaxNode};
use crate::core::Finding;
use std::path::Path;

/// Run every script-side detector over one controller tree.
pub fn analyze_script(path: &Path, tree: &SyntaxNode) -> Vec<Finding> {
    let mut sprawl = scope_sprawl::ScopeSprawlDetector::new();
    let mut leaks = global_scope::GlobalScopeDetector::new();
    let mut methods = method_sprawl::MethodSprawlDetector::new();
    let mut dom = direct_dom::DirectDomDetector::new();
    let mut legacy = legacy_lib::LegacyLibDetector::new();

    tree.walk(&mut |node| {
        sprawl.visit(node);
        leaks.visit(node);
        methods.visit(node);
        dom.visit(node);
        legacy.visit(node);
    });

    let mut findings = Vec::new();
    findings.extend(sprawl.finalize(path));
    findings.extend(leaks.finalize(path));
    findings.extend(methods.finalize(path));
    findings.extend(dom.finalize(path));
    findings.extend(legacy.finalize(path));
    findings
}

/// Run the markup-side detector over one template tree.
pub fn analyze_markup(path: &Path, tree: &SyntaxNode) -> Vec<Finding> {
    let mut coupling = template_coupling::TemplateCouplingDetector::new();
    tree.walk(&mut |node| coupling.visit(node));
    coupling.finalize(path).into_iter().collect()
}

/// Innermost identifier a member/call chain hangs off, e.g. `$` for
/// `$('#id').parent().css(...)`.
pub(crate) fn chain_root(node: &SyntaxNode) -> Option<&SyntaxNode> {
    match &node.kind {
        SyntaxKind::Identifier { .. } => Some(node),
        SyntaxKind::Member { object, .. } => chain_root(object),
        SyntaxKind::Call { callee, .. } => chain_root(callee),
        _ => None,
    }
}

pub(crate) fn chain_root_name(node: &SyntaxNode) -> Option<&str> {
    chain_root(node).and_then(SyntaxNode::identifier_name)
}

/// Property name of a direct member assignment target on the shared-state
/// handle, `$scope.<prop> = ...`. Computed access yields None.
pub(crate) fn scope_property(target: &SyntaxNode) -> Option<&str> {
    const SCOPE_HANDLE: &str = "$scope";

    let SyntaxKind::Member { object, property } = &target.kind else {
        return None;
    };
    if object.identifier_name() != Some(SCOPE_HANDLE) {
        return None;
    }
    property.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SourcePosition;

    fn pos(line: usize) -> SourcePosition {
        SourcePosition::new(line, 0)
    }

    #[test]
    fn chain_root_resolves_through_calls_and_members() {
        // $('#id').parent().css
        let chain = SyntaxNode::member(
            SyntaxNode::call(
                SyntaxNode::member(
                    SyntaxNode::call(SyntaxNode::identifier("$", pos(1)), vec![], pos(1)),
                    Some("parent"),
                    pos(1),
                ),
                vec![],
                pos(1),
            ),
            Some("css"),
            pos(1),
        );

        assert_eq!(chain_root_name(&chain), Some("$"));
    }

    #[test]
    fn chain_root_rejects_non_identifier_bases() {
        let literal_base = SyntaxNode::member(
            SyntaxNode::text("lit", pos(1)),
            Some("length"),
            pos(1),
        );
        assert_eq!(chain_root_name(&literal_base), None);
    }

    #[test]
    fn scope_property_requires_direct_scope_object() {
        let direct = SyntaxNode::member(
            SyntaxNode::identifier("$scope", pos(1)),
            Some("user"),
            pos(1),
        );
        assert_eq!(scope_property(&direct), Some("user"));

        // $scope.user.name = ... assigns through a nested chain, not onto
        // the handle itself.
        let nested = SyntaxNode::member(direct.clone(), Some("name"), pos(1));
        assert_eq!(scope_property(&nested), None);

        let computed = SyntaxNode::member(
            SyntaxNode::identifier("$scope", pos(1)),
            None,
            pos(1),
        );
        assert_eq!(scope_property(&computed), None);
    }
}
