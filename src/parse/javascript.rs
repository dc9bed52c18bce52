//! JavaScript adapter. Only the shapes the detectors care about get
//! dedicated kinds (assignments, calls, member chains, identifiers,
//! function literals); everything else folds into `Other` so traversal
//! still reaches nested expressions.

use tree_sitter::{Node, Parser};

use super::ParseError;
use crate::core::syntax::{SyntaxKind, SyntaxNode};
use crate::core::SourcePosition;

pub fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_javascript::LANGUAGE.into())
        .map_err(|_| ParseError::Grammar("JavaScript"))?;
    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    Ok(SyntaxNode::root(convert_children(
        tree.root_node(),
        source,
    )))
}

fn convert(node: Node, source: &str) -> SyntaxNode {
    let position = position(node);
    match node.kind() {
        "assignment_expression" | "augmented_assignment_expression" => {
            match (
                node.child_by_field_name("left"),
                node.child_by_field_name("right"),
            ) {
                (Some(left), Some(right)) => SyntaxNode::assignment(
                    convert(left, source),
                    convert(right, source),
                    position,
                ),
                _ => SyntaxNode::other(convert_children(node, source), position),
            }
        }
        "call_expression" => match node.child_by_field_name("function") {
            Some(callee) => {
                let arguments = node
                    .child_by_field_name("arguments")
                    .map(|args| convert_children(args, source))
                    .unwrap_or_default();
                SyntaxNode::call(convert(callee, source), arguments, position)
            }
            None => SyntaxNode::other(convert_children(node, source), position),
        },
        "member_expression" => match node.child_by_field_name("object") {
            Some(object) => {
                let property = node
                    .child_by_field_name("property")
                    .filter(|prop| prop.kind() == "property_identifier")
                    .map(|prop| node_text(prop, source).to_string());
                SyntaxNode::new(
                    SyntaxKind::Member {
                        object: Box::new(convert(object, source)),
                        property,
                    },
                    position,
                )
            }
            None => SyntaxNode::other(convert_children(node, source), position),
        },
        // Computed access: the property name is not statically known.
        "subscript_expression" => match node.child_by_field_name("object") {
            Some(object) => SyntaxNode::member(convert(object, source), None, position),
            None => SyntaxNode::other(convert_children(node, source), position),
        },
        "identifier" | "shorthand_property_identifier" => {
            SyntaxNode::identifier(node_text(node, source), position)
        }
        "function_declaration"
        | "function_expression"
        | "generator_function"
        | "generator_function_declaration"
        | "arrow_function"
        | "method_definition" => {
            SyntaxNode::function_literal(convert_children(node, source), position)
        }
        _ => SyntaxNode::other(convert_children(node, source), position),
    }
}

fn convert_children(node: Node, source: &str) -> Vec<SyntaxNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| {
            !matches!(
                child.kind(),
                "comment" | "property_identifier" | "private_property_identifier" | "string_fragment"
            )
        })
        .map(|child| convert(child, source))
        .collect()
}

fn node_text<'a>(node: Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

fn position(node: Node) -> SourcePosition {
    let start = node.start_position();
    // tree-sitter rows are 0-based
    SourcePosition::new(start.row + 1, start.column)
}
