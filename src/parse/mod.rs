//! Grammar adapters that turn source text into the parser-agnostic syntax
//! tree the detectors consume.

pub mod javascript;
pub mod markup;

use thiserror::Error;

use crate::core::syntax::SyntaxNode;
use crate::core::FileKind;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load the {0} grammar")]
    Grammar(&'static str),
    #[error("parser produced no syntax tree")]
    NoTree,
}

/// Parse `source` with the grammar matching `kind`.
pub fn parse_source(kind: FileKind, source: &str) -> Result<SyntaxNode, ParseError> {
    match kind {
        FileKind::Script => javascript::parse(source),
        FileKind::Markup => markup::parse(source),
    }
}
