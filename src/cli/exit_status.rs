use std::process::ExitCode;

use crate::issues::Issue;

/// How a run ended, as seen by CI.
///
/// - `Success` (0): nothing left to localize
/// - `Failure` (1): hardcoded or unrewritable literals remain, or a dry run
///   has rewrites or comments waiting for `--apply`
/// - `Error` (2): a file could not be parsed or written, or the run failed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Status for a findings report.
    ///
    /// Parse and write errors win over findings, since they mean some
    /// files were never looked at.
    pub fn from_issues(issues: &[Issue]) -> Self {
        let errors = issues
            .iter()
            .any(|i| matches!(i, Issue::ParseError(_) | Issue::WriteError(_)));
        Self::for_run(errors, !issues.is_empty())
    }

    /// Status for a command that may leave work behind.
    pub fn for_run(errors: bool, pending: bool) -> Self {
        if errors {
            ExitStatus::Error
        } else if pending {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
