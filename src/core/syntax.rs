use super::SourcePosition;

/// Parser-agnostic syntax tree handed to the detectors.
///
/// Parse adapters build these from grammar-specific trees; detectors only
/// ever read them. Script and markup sources share the one node type so a
/// detector never needs to know which grammar produced its input.
#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub enum SyntaxKind {
    Root {
        children: Vec<SyntaxNode>,
    },
    Assignment {
        target: Box<SyntaxNode>,
        value: Box<SyntaxNode>,
    },
    Call {
        callee: Box<SyntaxNode>,
        arguments: Vec<SyntaxNode>,
    },
    /// Member access; `property` is None for computed access like `obj[key]`.
    Member {
        object: Box<SyntaxNode>,
        property: Option<String>,
    },
    Identifier {
        name: String,
    },
    FunctionLiteral {
        body: Vec<SyntaxNode>,
    },
    Element {
        tag: String,
        attributes: Vec<Attribute>,
        children: Vec<SyntaxNode>,
    },
    Text {
        content: String,
    },
    /// Structural node with no meaning of its own; traversal descends into it.
    Other {
        children: Vec<SyntaxNode>,
    },
}

/// Markup attribute. Position points at the attribute value.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub position: SourcePosition,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, position: SourcePosition) -> Self {
        Self { kind, position }
    }

    pub fn root(children: Vec<SyntaxNode>) -> Self {
        Self::new(SyntaxKind::Root { children }, SourcePosition::new(1, 0))
    }

    pub fn assignment(target: SyntaxNode, value: SyntaxNode, position: SourcePosition) -> Self {
        Self::new(
            SyntaxKind::Assignment {
                target: Box::new(target),
                value: Box::new(value),
            },
            position,
        )
    }

    pub fn call(callee: SyntaxNode, arguments: Vec<SyntaxNode>, position: SourcePosition) -> Self {
        Self::new(
            SyntaxKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            position,
        )
    }

    pub fn member(object: SyntaxNode, property: Option<&str>, position: SourcePosition) -> Self {
        Self::new(
            SyntaxKind::Member {
                object: Box::new(object),
                property: property.map(str::to_string),
            },
            position,
        )
    }

    pub fn identifier(name: &str, position: SourcePosition) -> Self {
        Self::new(
            SyntaxKind::Identifier {
                name: name.to_string(),
            },
            position,
        )
    }

    pub fn function_literal(body: Vec<SyntaxNode>, position: SourcePosition) -> Self {
        Self::new(SyntaxKind::FunctionLiteral { body }, position)
    }

    pub fn element(
        tag: &str,
        attributes: Vec<Attribute>,
        children: Vec<SyntaxNode>,
        position: SourcePosition,
    ) -> Self {
        Self::new(
            SyntaxKind::Element {
                tag: tag.to_string(),
                attributes,
                children,
            },
            position,
        )
    }

    pub fn text(content: &str, position: SourcePosition) -> Self {
        Self::new(
            SyntaxKind::Text {
                content: content.to_string(),
            },
            position,
        )
    }

    pub fn other(children: Vec<SyntaxNode>, position: SourcePosition) -> Self {
        Self::new(SyntaxKind::Other { children }, position)
    }

    pub fn identifier_name(&self) -> Option<&str> {
        match &self.kind {
            SyntaxKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Preorder traversal: a node is visited before any of its children.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a SyntaxNode)) {
        visit(self);
        match &self.kind {
            SyntaxKind::Root { children }
            | SyntaxKind::Other { children }
            | SyntaxKind::FunctionLiteral { body: children } => {
                for child in children {
                    child.walk(visit);
                }
            }
            SyntaxKind::Assignment { target, value } => {
                target.walk(visit);
                value.walk(visit);
            }
            SyntaxKind::Call { callee, arguments } => {
                callee.walk(visit);
                for argument in arguments {
                    argument.walk(visit);
                }
            }
            SyntaxKind::Member { object, .. } => object.walk(visit),
            SyntaxKind::Element { children, .. } => {
                for child in children {
                    child.walk(visit);
                }
            }
            SyntaxKind::Identifier { .. } | SyntaxKind::Text { .. } => {}
        }
    }
}
