//! HTML adapter. Elements keep their tag, attributes, and children; raw
//! text survives verbatim so interpolation scanning sees original offsets.
//! Script and style islands hold foreign code and are not descended into.

use tree_sitter::{Node, Parser};

use super::ParseError;
use crate::core::syntax::{Attribute, SyntaxNode};
use crate::core::SourcePosition;

pub fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_html::LANGUAGE.into())
        .map_err(|_| ParseError::Grammar("HTML"))?;
    let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    Ok(SyntaxNode::root(convert_children(
        tree.root_node(),
        source,
    )))
}

fn convert(node: Node, source: &str) -> Option<SyntaxNode> {
    match node.kind() {
        "element" => Some(convert_element(node, source)),
        "text" => Some(SyntaxNode::text(node_text(node, source), position(node))),
        "script_element" | "style_element" | "comment" | "doctype" => None,
        _ => Some(SyntaxNode::other(
            convert_children(node, source),
            position(node),
        )),
    }
}

fn convert_element(node: Node, source: &str) -> SyntaxNode {
    let mut tag = String::new();
    let mut attributes = Vec::new();
    let mut children = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "start_tag" | "self_closing_tag" => {
                let mut inner = child.walk();
                for part in child.named_children(&mut inner) {
                    match part.kind() {
                        "tag_name" => tag = node_text(part, source).to_string(),
                        "attribute" => {
                            if let Some(attribute) = convert_attribute(part, source) {
                                attributes.push(attribute);
                            }
                        }
                        _ => {}
                    }
                }
            }
            "end_tag" => {}
            _ => {
                if let Some(converted) = convert(child, source) {
                    children.push(converted);
                }
            }
        }
    }
    SyntaxNode::element(&tag, attributes, children, position(node))
}

fn convert_attribute(node: Node, source: &str) -> Option<Attribute> {
    let mut name = None;
    let mut value = None;
    let mut value_position = None;
    let mut cursor = node.walk();
    for part in node.named_children(&mut cursor) {
        match part.kind() {
            "attribute_name" => name = Some(node_text(part, source).to_string()),
            "attribute_value" => {
                value = Some(node_text(part, source).to_string());
                value_position = Some(position(part));
            }
            "quoted_attribute_value" => {
                let mut inner = part.walk();
                for piece in part.named_children(&mut inner) {
                    if piece.kind() == "attribute_value" {
                        value = Some(node_text(piece, source).to_string());
                        value_position = Some(position(piece));
                    }
                }
            }
            _ => {}
        }
    }
    Some(Attribute {
        name: name?,
        value: value.unwrap_or_default(),
        // Valueless attributes anchor on the attribute itself.
        position: value_position.unwrap_or_else(|| position(node)),
    })
}

fn convert_children(node: Node, source: &str) -> Vec<SyntaxNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter_map(|child| convert(child, source))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::SyntaxKind;

    fn elements(node: &SyntaxNode) -> Vec<&SyntaxNode> {
        let mut found = Vec::new();
        node.walk(&mut |candidate| {
            if matches!(candidate.kind, SyntaxKind::Element { .. }) {
                found.push(candidate);
            }
        });
        found
    }

    #[test]
    fn element_keeps_tag_attributes_and_text() {
        let tree = parse("<button ng-click=\"save()\">{{label}}</button>").unwrap();
        let found = elements(&tree);
        assert_eq!(found.len(), 1);
        let SyntaxKind::Element {
            tag,
            attributes,
            children,
        } = &found[0].kind
        else {
            panic!("expected element");
        };
        assert_eq!(tag, "button");
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].name, "ng-click");
        assert_eq!(attributes[0].value, "save()");
        assert!(matches!(children[0].kind, SyntaxKind::Text { .. }));
    }

    #[test]
    fn attribute_position_points_at_value() {
        let tree = parse("<div ng-click=\"go()\"></div>").unwrap();
        let found = elements(&tree);
        let SyntaxKind::Element { attributes, .. } = &found[0].kind else {
            panic!("expected element");
        };
        assert_eq!(attributes[0].position.line, 1);
        // Column lands on the value text, past the opening quote.
        assert_eq!(attributes[0].position.column, 15);
    }

    #[test]
    fn script_and_style_islands_are_dropped() {
        let source = "<div>{{a.b}}</div><script>var x = c.d;</script><style>.x { color: red; }</style>";
        let tree = parse(source).unwrap();
        let found = elements(&tree);
        assert_eq!(found.len(), 1);
        let mut texts = Vec::new();
        tree.walk(&mut |node| {
            if let SyntaxKind::Text { content } = &node.kind {
                texts.push(content.clone());
            }
        });
        assert_eq!(texts, vec!["{{a.b}}".to_string()]);
    }

    #[test]
    fn nested_elements_are_reachable() {
        let tree = parse("<ul><li ng-repeat=\"item in items\">{{item.name}}</li></ul>").unwrap();
        let found = elements(&tree);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn valueless_attribute_parses() {
        let tree = parse("<input disabled>").unwrap();
        let found = elements(&tree);
        let SyntaxKind::Element { attributes, .. } = &found[0].kind else {
            panic!("expected element");
        };
        assert_eq!(attributes[0].name, "disabled");
        assert_eq!(attributes[0].value, "");
    }
}
