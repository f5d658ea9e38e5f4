//! Literal extraction from parsed Dart files.
//!
//! - `harvester`: walks the syntax tree and emits `LiteralOccurrence`s
//! - `directives`: `arblift-disable-*` suppression comments

pub mod directives;
pub mod harvester;

pub use directives::{Directive, Suppressions};
pub use harvester::harvest;
