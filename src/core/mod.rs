//! Core analysis engine.
//!
//! ```text
//! scan files ─► parse ─► harvest literals ─► classify ─► prepare rewrite
//!                                                  (parallel, per file)
//!            ─► allocate keys + plan edits ─► write ARB ─► write sources
//!                (single-threaded)
//! ```
//!
//! [`ScanContext`] drives the pipeline; every stage below it is a plain
//! function over borrowed data.

pub mod classify;
pub mod context;
pub mod data;
pub mod extract;
pub mod file_scanner;
pub mod keys;
pub mod parsers;
pub mod rewrite;

pub use context::{AnalyzedFile, AnalyzedLiteral, ApplyOutcome, FileAnalysis, RewritePlan, ScanContext};
