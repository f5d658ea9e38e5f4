//! Rewrite planning and edit application.
//!
//! - `edit`: offset edits and per-file conflict resolution
//! - `scope`: whether a `BuildContext` is in scope at a literal
//! - `planner`: const handling, replacements, import insertion

pub mod edit;
pub mod planner;
pub mod scope;

pub use edit::{EditSet, TextEdit};
pub use planner::{
    BlockReason, FilePlan, PlannedRewrite, Rewritability, ensure_import, finish, plan_file,
    prepare,
};
pub use scope::{CallShape, call_shape};
