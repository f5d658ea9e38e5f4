use std::collections::HashSet;

use crate::issues::{HardcodedTextIssue, Issue, UnrewritableIssue};

/// Findings split by kind, plus the count of files that failed to parse.
#[derive(Debug, Default)]
pub struct Findings {
    pub hardcoded: Vec<HardcodedTextIssue>,
    pub unrewritable: Vec<UnrewritableIssue>,
    pub parse_error_count: usize,
}

impl Findings {
    pub fn split(issues: Vec<Issue>) -> Self {
        let mut findings = Self::default();
        for issue in issues {
            match issue {
                Issue::HardcodedText(i) => findings.hardcoded.push(i),
                Issue::Unrewritable(i) => findings.unrewritable.push(i),
                Issue::ParseError(_) | Issue::WriteError(_) => findings.parse_error_count += 1,
            }
        }
        findings
    }

    pub fn total(&self) -> usize {
        self.hardcoded.len() + self.unrewritable.len()
    }

    /// Distinct `(file, line)` pairs carrying a finding.
    pub fn unique_lines(&self) -> usize {
        self.hardcoded
            .iter()
            .map(|i| &i.context)
            .chain(self.unrewritable.iter().map(|i| &i.context))
            .map(|ctx| (ctx.file_path(), ctx.line()))
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn file_count(&self) -> usize {
        self.hardcoded
            .iter()
            .map(|i| i.context.file_path())
            .chain(self.unrewritable.iter().map(|i| i.context.file_path()))
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::data::{KeepReason, SourceContext, SourceLocation, UiCategory},
        issues::ParseErrorIssue,
    };

    fn hardcoded(file: &str, line: usize) -> Issue {
        Issue::HardcodedText(HardcodedTextIssue {
            context: SourceContext::new(SourceLocation::new(file, line, 1), "x"),
            text: "Hi".to_string(),
            reason: KeepReason::UiEvidence(UiCategory::Display),
        })
    }

    fn parse_error() -> Issue {
        Issue::ParseError(ParseErrorIssue {
            file_path: "lib/x.dart".to_string(),
            error: "unexpected end of file".to_string(),
        })
    }

    #[test]
    fn test_findings_split_and_count() {
        let findings = Findings::split(vec![
            hardcoded("lib/a.dart", 1),
            hardcoded("lib/a.dart", 1),
            hardcoded("lib/b.dart", 4),
            parse_error(),
        ]);
        assert_eq!(findings.total(), 3);
        assert_eq!(findings.unique_lines(), 2);
        assert_eq!(findings.file_count(), 2);
        assert_eq!(findings.parse_error_count, 1);
    }
}
