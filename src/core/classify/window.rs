use crate::core::parsers::{LineIndex, Span};

/// Source lines around a literal, as seen by the classifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextWindow<'a> {
    /// `before` lines, the literal's own line, then `after` lines. Lines
    /// holding nothing but blanked comments are empty.
    pub lines: Vec<&'a str>,
    pub own_line: &'a str,
    pub suppressed: bool,
}

impl<'a> ContextWindow<'a> {
    /// `blank` holds the comment spans to hide, in source order; pass an
    /// empty slice to keep comments visible.
    pub fn build(
        source: &'a str,
        index: &LineIndex,
        line: usize,
        before: usize,
        after: usize,
        blank: &[Span],
    ) -> Self {
        let first = line.saturating_sub(before).max(1);
        let last = (line + after).min(index.line_count());

        let lines = (first..=last)
            .map(|n| {
                let text = index.line_text(source, n);
                if n != line && is_comment_only(text, index.line_start(n), blank) {
                    ""
                } else {
                    text
                }
            })
            .collect();

        Self {
            lines,
            own_line: index.line_text(source, line),
            suppressed: false,
        }
    }

    pub fn with_suppressed(mut self, suppressed: bool) -> Self {
        self.suppressed = suppressed;
        self
    }
}

/// True when every non-whitespace byte of the line at `start` lies inside
/// one of `comments`.
fn is_comment_only(text: &str, start: usize, comments: &[Span]) -> bool {
    let end = start + text.len();
    let mut covered = false;
    let mut pos = start;
    for span in comments.iter().filter(|s| s.start < end && s.end > start) {
        if !is_blank(text, pos - start, span.start.max(pos) - start) {
            return false;
        }
        covered = true;
        pos = pos.max(span.end.min(end));
    }
    covered && is_blank(text, pos - start, text.len())
}

fn is_blank(text: &str, from: usize, to: usize) -> bool {
    text.get(from..to).is_none_or(|s| s.trim().is_empty())
}
