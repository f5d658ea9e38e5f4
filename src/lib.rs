//! arblift - hardcoded string extraction for Flutter
//!
//! arblift finds user-facing string literals in Dart sources, moves them into
//! an ARB resource file and rewrites each literal as a localization lookup.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, actions, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Analysis and rewrite pipeline
//! - `issues`: Issue type definitions and reporting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
