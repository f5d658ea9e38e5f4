//! InsertDisableComment action.
//!
//! Inserts `arblift-disable-next-line` comments to suppress findings.
//! Used by the `arblift baseline` command.

use crate::{
    core::extract::directives::DISABLE_NEXT_LINE,
    issues::{HardcodedTextIssue, UnrewritableIssue},
};

use super::{operation::Operation, traits::Action};

/// Action to insert `arblift-disable-next-line` comments.
///
/// Supports both kinds of finding: rewritable hardcoded text and literals
/// that cannot be rewritten.
pub struct InsertDisableComment;

impl InsertDisableComment {
    fn comment() -> String {
        format!("// {}", DISABLE_NEXT_LINE)
    }
}

impl Action<HardcodedTextIssue> for InsertDisableComment {
    fn to_operations(issues: &[HardcodedTextIssue]) -> Vec<Operation> {
        issues
            .iter()
            .map(|issue| Operation::InsertComment {
                context: issue.context.clone(),
                comment: Self::comment(),
            })
            .collect()
    }
}

impl Action<UnrewritableIssue> for InsertDisableComment {
    fn to_operations(issues: &[UnrewritableIssue]) -> Vec<Operation> {
        issues
            .iter()
            .map(|issue| Operation::InsertComment {
                context: issue.context.clone(),
                comment: Self::comment(),
            })
            .collect()
    }
}
