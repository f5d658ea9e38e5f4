//! Report formatting and printing utilities.
//!
//! Displays issues in cargo-style format. Separate from core logic so the
//! analysis can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::{
    core::rewrite::PlannedRewrite,
    issues::{Issue, Report, ReportLocation, Severity},
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize) {
    print_success_to(source_files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(source_files: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Checked {} source {} - no issues found",
            source_files,
            if source_files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize) {
    print_parse_warning_to(count, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, writer: &mut W) {
    if count > 0 {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed and were skipped (run {} for details)",
            "warning:".bold().yellow(),
            count,
            "check".cyan()
        );
    }
}

/// Print planned rewrites (fix dry-run).
pub fn print_rewrites(rewrites: &[&PlannedRewrite]) {
    print_rewrites_to(rewrites, &mut io::stdout().lock());
}

pub fn print_rewrites_to<W: Write>(rewrites: &[&PlannedRewrite], writer: &mut W) {
    for rewrite in rewrites {
        let loc = &rewrite.location;
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            loc.file_path,
            loc.line,
            loc.col
        );
        let _ = writeln!(writer, "     {} {}", "-".red(), rewrite.original.red());
        let _ = writeln!(writer, "     {} {}", "+".green(), rewrite.replacement.green());
        let _ = writeln!(
            writer,
            "     {} {} {} ({})",
            "=".blue(),
            "key:".bold(),
            rewrite.key,
            if rewrite.reused { "existing" } else { "new" }
        );
        let _ = writeln!(writer);
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let (file_path, line, col, source_line) = extract_location_info(&loc);

    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col (path only for file-level issues)
    if line == 0 {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), file_path);
    } else {
        let _ = writeln!(writer, "  {} {}:{}:{}", "-->".blue(), file_path, line, col);
    }

    if let Some(source_line) = source_line {
        let caret_char = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };

        let _ = writeln!(
            writer,
            "{:>width$} {}",
            "",
            "|".blue(),
            width = max_line_width
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            line.to_string().blue(),
            "|".blue(),
            source_line,
            width = max_line_width
        );

        // col is 1-based
        let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
        let caret_padding = UnicodeWidthStr::width(prefix.as_str());
        let _ = writeln!(
            writer,
            "{:>width$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            caret_char,
            width = max_line_width,
            padding = caret_padding
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Warning)
        .count();
    let total_problems = total_errors + total_warnings;

    if total_problems > 0 {
        let _ = writeln!(
            writer,
            "{} {} problems ({} {}, {} {})",
            FAILURE_MARK.red(),
            total_problems,
            total_errors,
            if total_errors == 1 { "error" } else { "errors" }.red(),
            total_warnings,
            if total_warnings == 1 {
                "warning"
            } else {
                "warnings"
            }
            .yellow()
        );
    }
}

fn extract_location_info<'a>(
    loc: &'a ReportLocation<'a>,
) -> (&'a str, usize, usize, Option<&'a str>) {
    match loc {
        ReportLocation::Source(ctx) => (
            ctx.file_path(),
            ctx.line(),
            ctx.col(),
            Some(&ctx.source_line),
        ),
        ReportLocation::File { path } => (path, 0, 0, None),
    }
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line()),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::data::{KeepReason, SourceContext, SourceLocation},
        issues::{HardcodedTextIssue, ParseErrorIssue},
    };
    use pretty_assertions::assert_eq;

    fn render(issues: &[Issue]) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        report_to(issues, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_hardcoded_with_caret() {
        let issue = Issue::HardcodedText(HardcodedTextIssue {
            context: SourceContext::new(
                SourceLocation::new("lib/home.dart", 7, 17),
                "    return Text('Hello World');",
            ),
            text: "Hello World".to_string(),
            reason: KeepReason::UserFacingCallee("Text".to_string()),
        });

        let expected = [
            "error: \"Hello World\"  hardcoded",
            "  --> lib/home.dart:7:17",
            "  |",
            "7 |     return Text('Hello World');",
            "  |                 ^",
            "  = note: user-facing widget `Text`",
            "",
            "\u{2718} 1 problems (1 error, 0 warnings)",
            "",
        ]
        .join("\n");
        assert_eq!(render(&[issue]), expected);
    }

    #[test]
    fn test_report_file_level_issue() {
        let issue = Issue::ParseError(ParseErrorIssue {
            file_path: "lib/broken.dart".to_string(),
            error: "3:1: unclosed `{`".to_string(),
        });
        let out = render(&[issue]);
        assert!(out.starts_with("error: \"3:1: unclosed `{`\"  parse-error\n  --> lib/broken.dart\n"));
    }

    #[test]
    fn test_empty_report_prints_nothing() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn test_print_rewrites() {
        colored::control::set_override(false);
        let rewrite = PlannedRewrite {
            location: SourceLocation::new("lib/home.dart", 7, 17),
            original: "'Hello World'".to_string(),
            replacement: "AppLocalizations.of(context)!.helloWorld".to_string(),
            key: "helloWorld".to_string(),
            reused: false,
        };
        let mut out = Vec::new();
        print_rewrites_to(&[&rewrite], &mut out);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  --> lib/home.dart:7:17\n     - 'Hello World'\n     + AppLocalizations.of(context)!.helloWorld\n     = key: helloWorld (new)\n\n"
        );
    }
}
