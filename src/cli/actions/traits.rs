//! Action trait definition.
//!
//! Actions convert Issues into Operations. Each Action can be implemented
//! for multiple Issue types, providing type-safe handling.

use std::path::Path;

use anyhow::Result;

use super::operation::{Operation, apply_operations};

/// Statistics from running an action.
#[derive(Debug, Clone, Default)]
pub struct ActionStats {
    /// Number of operations processed.
    pub processed: usize,
    /// Number of operations skipped (duplicates or conflicting edits).
    pub skipped: usize,
    /// Number of changes actually applied to files.
    pub changes_applied: usize,
    /// Number of files modified.
    pub files_modified: usize,
}

impl std::ops::AddAssign for ActionStats {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.changes_applied += other.changes_applied;
        self.files_modified += other.files_modified;
    }
}

/// Action trait - converts Issues into Operations and executes them.
///
/// # Example
///
/// ```ignore
/// if apply {
///     InsertDisableComment::run(&ctx.root_dir, &issues)?;
/// } else {
///     InsertDisableComment::preview(&issues);
/// }
/// ```
pub trait Action<I> {
    /// Convert issues to low-level operations.
    ///
    /// This is the only method that must be implemented.
    fn to_operations(issues: &[I]) -> Vec<Operation>;

    /// Execute the action (modify files under `root`).
    fn run(root: &Path, issues: &[I]) -> Result<ActionStats> {
        let ops = Self::to_operations(issues);
        execute_operations(root, &ops)
    }

    /// Preview the action (dry-run mode).
    fn preview(issues: &[I]) {
        let ops = Self::to_operations(issues);
        for op in &ops {
            op.preview();
        }
    }
}

/// Execute operations collected from one or more actions in a single pass.
pub fn execute_operations(root: &Path, ops: &[Operation]) -> Result<ActionStats> {
    if ops.is_empty() {
        return Ok(ActionStats::default());
    }
    apply_operations(root, ops)
}
