//! `arblift-*` suppression comments.
//!
//! - `// arblift-disable-next-line` disables findings on the following line
//! - `// arblift-disable-line` disables findings on its own line
//! - `// arblift-disable` / `// arblift-enable` disable a range of lines

use std::collections::HashSet;

use crate::core::parsers::{LineIndex, Span};

pub const DISABLE_NEXT_LINE: &str = "arblift-disable-next-line";
pub const DISABLE_LINE: &str = "arblift-disable-line";
pub const DISABLE: &str = "arblift-disable";
pub const ENABLE: &str = "arblift-enable";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    DisableNextLine,
    DisableLine,
    Disable,
    Enable,
}

impl Directive {
    /// Parse a directive from comment text with the comment markers removed.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let word = text.split_whitespace().next()?;
        match word {
            DISABLE_NEXT_LINE => Some(Self::DisableNextLine),
            DISABLE_LINE => Some(Self::DisableLine),
            DISABLE => Some(Self::Disable),
            ENABLE => Some(Self::Enable),
            _ => None,
        }
    }
}

/// Inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisabledRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Suppressions {
    pub disabled_lines: HashSet<usize>,
    pub disabled_ranges: Vec<DisabledRange>,
}

impl Suppressions {
    /// Collect directives from the comment spans of one file.
    pub fn collect(source: &str, comments: &[Span], index: &LineIndex) -> Self {
        let mut suppressions = Self::default();
        let mut open_range: Option<usize> = None;

        for span in comments {
            let Some(text) = source.get(span.start..span.end) else {
                continue;
            };
            let Some(directive) = Directive::parse(strip_comment_markers(text)) else {
                continue;
            };
            let line = index.line(span.start);
            match directive {
                Directive::DisableNextLine => {
                    let end_line = index.line(span.end.saturating_sub(1));
                    suppressions.disabled_lines.insert(end_line + 1);
                }
                Directive::DisableLine => {
                    suppressions.disabled_lines.insert(line);
                }
                Directive::Disable => {
                    open_range.get_or_insert(line);
                }
                Directive::Enable => {
                    if let Some(start) = open_range.take() {
                        suppressions
                            .disabled_ranges
                            .push(DisabledRange { start, end: line });
                    }
                }
            }
        }

        if let Some(start) = open_range {
            suppressions.disabled_ranges.push(DisabledRange {
                start,
                end: usize::MAX,
            });
        }
        suppressions
    }

    pub fn is_suppressed(&self, line: usize) -> bool {
        self.disabled_lines.contains(&line)
            || self
                .disabled_ranges
                .iter()
                .any(|r| line >= r.start && line <= r.end)
    }
}

fn strip_comment_markers(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("//") {
        rest.trim_start_matches('/')
    } else if let Some(rest) = text.strip_prefix("/*") {
        rest.strip_suffix("*/").unwrap_or(rest).trim_start_matches('*')
    } else {
        text
    }
}
