//! File parsers for Dart sources and ARB resource files.
//!
//! - `token`: logos-based Dart tokenizer
//! - `tree`: arena syntax tree (nodes addressed by `NodeId`)
//! - `dart`: structural Dart parser producing the tree
//! - `line_index`: offset to line/column resolver
//! - `arb`: ARB resource file loader and catalog scan

pub mod arb;
pub mod dart;
pub mod error;
pub mod line_index;
pub mod token;
pub mod tree;

pub use dart::{ParsedFile, parse_dart};
pub use error::ParseError;
pub use line_index::LineIndex;
pub use tree::{
    DeclKeyword, Modifier, ModifierKind, Node, NodeId, NodeKind, Span, StringLiteral, SyntaxTree,
};
