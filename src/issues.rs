//! Issue types for hardcoded-text analysis results.
//!
//! Each issue is self-contained with all information needed by:
//! - Reporter: to display the issue to users
//! - Action: to act on it (insert disable comments)

use enum_dispatch::enum_dispatch;

use crate::core::{data::KeepReason, data::SourceContext, rewrite::BlockReason};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    HardcodedText,
    Unrewritable,
    ParseError,
    WriteError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::HardcodedText => write!(f, "hardcoded"),
            Rule::Unrewritable => write!(f, "unrewritable"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::WriteError => write!(f, "write-error"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// User-facing text that is not localized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardcodedTextIssue {
    pub context: SourceContext,
    /// Normalized literal content (`{paramN}` for interpolations).
    pub text: String,
    pub reason: KeepReason,
}

impl HardcodedTextIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::HardcodedText
    }
}

/// Hardcoded text that cannot be rewritten in place, such as a literal that
/// must stay a compile-time constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrewritableIssue {
    pub context: SourceContext,
    pub text: String,
    pub reason: BlockReason,
}

impl UnrewritableIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Unrewritable
    }
}

/// File could not be parsed, or a rewrite would have broken it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// A source or resource file could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl WriteErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::WriteError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HardcodedText(HardcodedTextIssue),
    Unrewritable(UnrewritableIssue),
    ParseError(ParseErrorIssue),
    WriteError(WriteErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::HardcodedText(_) => HardcodedTextIssue::severity(),
            Issue::Unrewritable(_) => UnrewritableIssue::severity(),
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::WriteError(_) => WriteErrorIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::HardcodedText(_) => HardcodedTextIssue::rule(),
            Issue::Unrewritable(_) => UnrewritableIssue::rule(),
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::WriteError(_) => WriteErrorIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only (no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls on
/// the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (text, error, etc.).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for HardcodedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.reason.to_string())
    }
}

impl Report for UnrewritableIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some(self.reason.hint())
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} cannot be rewritten", self.reason))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for WriteErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Source(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Source(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use crate::core::data::{SourceLocation, UiCategory};
    use crate::issues::*;

    fn hardcoded(file: &str, line: usize, col: usize, text: &str) -> Issue {
        Issue::HardcodedText(HardcodedTextIssue {
            context: SourceContext::new(SourceLocation::new(file, line, col), "Text('x')"),
            text: text.to_string(),
            reason: KeepReason::UiEvidence(UiCategory::Display),
        })
    }

    #[test]
    fn test_hardcoded_issue_report() {
        let issue = hardcoded("lib/home.dart", 10, 5, "Hello");
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.rule(), Rule::HardcodedText);
        assert_eq!(issue.message(), "Hello");
        assert_eq!(issue.details().as_deref(), Some("display context"));
        assert!(issue.hint().is_none());
    }

    #[test]
    fn test_unrewritable_issue_report() {
        let issue = Issue::Unrewritable(UnrewritableIssue {
            context: SourceContext::new(
                SourceLocation::new("lib/a.dart", 3, 20),
                "void f({String t = 'Hi'}) {}",
            ),
            text: "Hi".to_string(),
            reason: BlockReason::DefaultValue,
        });
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(
            issue.details().as_deref(),
            Some("default parameter value cannot be rewritten")
        );
        assert!(issue.hint().is_some());
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::HardcodedText.to_string(), "hardcoded");
        assert_eq!(Rule::Unrewritable.to_string(), "unrewritable");
        assert_eq!(Rule::ParseError.to_string(), "parse-error");
        assert_eq!(Rule::WriteError.to_string(), "write-error");
    }

    #[test]
    fn test_issue_ordering() {
        let mut issues = vec![
            hardcoded("lib/b.dart", 1, 1, "B"),
            Issue::ParseError(ParseErrorIssue {
                file_path: "lib/a.dart".to_string(),
                error: "unexpected `}`".to_string(),
            }),
            hardcoded("lib/a.dart", 5, 9, "Second"),
            hardcoded("lib/a.dart", 5, 2, "First"),
        ];
        issues.sort();

        let order: Vec<String> = issues.iter().map(|i| i.message()).collect();
        assert_eq!(order, vec!["unexpected `}`", "First", "Second", "B"]);
    }
}
