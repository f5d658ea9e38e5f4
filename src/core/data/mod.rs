//! Data types shared by every pipeline stage.
//!
//! - `source`: positions in Dart files (SourceLocation, SourceContext)
//! - `occurrence`: harvested literals (LiteralOccurrence, ArgumentRole)
//! - `verdict`: classification outcomes (Verdict and its reasons)
//! - `resource`: resource-file entries and the known-key snapshot

pub mod occurrence;
pub mod resource;
pub mod source;
pub mod verdict;

pub use occurrence::{ArgumentRole, LiteralOccurrence};
pub use resource::{KnownKeys, Placeholder, ResourceEntry};
pub use source::{SourceContext, SourceLocation};
pub use verdict::{KeepReason, SkipReason, TechnicalKind, UiCategory, Verdict};
