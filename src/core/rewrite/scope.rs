//! Call-shape detection: is a `BuildContext` in scope at a literal?
//!
//! This is a wider analysis than the classifier's context window. It scans
//! back up to `scan_lines` lines for a construct that provides a context
//! (a `BuildContext` parameter, a builder callback, an overlay call) and
//! lexes forward from it to check the literal is still inside its body.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::parsers::{
    LineIndex,
    token::{Lexeme, Token, lex_at},
};

/// How a replacement reaches the localizations object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallShape {
    /// A `BuildContext` named `context` is in scope.
    Ambient { context: String },
    /// No context; an explicit locale handle is required.
    Static,
}

/// Function or closure with a `BuildContext` parameter.
static CONTEXT_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((?:[^()]*?[,\s])?BuildContext\??\s+(\w+)").unwrap());

/// Builder callback; its first parameter is the context.
static BUILDER_CALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w*[bB]uilder\s*:\s*(\()\s*(\w+)").unwrap());

/// Overlay construction that takes a `context:` argument.
static OVERLAY_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:showDialog|showModalBottomSheet|showCupertinoDialog|showCupertinoModalPopup|showGeneralDialog|showBottomSheet|showMenu|showSearch|showDatePicker|showTimePicker|showAboutDialog)\s*(?:<[^>]*>)?\s*(\()").unwrap()
});

static CONTEXT_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*context\s*:\s*(\w+(?:\.\w+)*)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Construct {
    /// Parameter list followed by a block or arrow body.
    Params,
    /// Argument list of a call.
    Call,
}

struct Candidate {
    /// Offset of the opening parenthesis.
    anchor: usize,
    construct: Construct,
    context: String,
}

/// Decide the call shape for a literal starting at `offset`.
pub fn call_shape(source: &str, index: &LineIndex, offset: usize, scan_lines: usize) -> CallShape {
    let line = index.line(offset);
    let first = line.saturating_sub(scan_lines).max(1);
    let start = index.line_start(first);
    let Some(window) = source.get(start..offset) else {
        return CallShape::Static;
    };

    let mut candidates = collect_candidates(window, start);
    candidates.sort_by(|a, b| b.anchor.cmp(&a.anchor));

    candidates
        .into_iter()
        .find(|c| encloses(source, c.anchor, offset, c.construct))
        .map(|c| CallShape::Ambient { context: c.context })
        .unwrap_or(CallShape::Static)
}

fn collect_candidates(window: &str, base: usize) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for caps in CONTEXT_PARAM.captures_iter(window) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            candidates.push(Candidate {
                anchor: base + whole.start(),
                construct: Construct::Params,
                context: name.as_str().to_string(),
            });
        }
    }

    for caps in BUILDER_CALLBACK.captures_iter(window) {
        if let (Some(paren), Some(name)) = (caps.get(1), caps.get(2)) {
            if name.as_str() == "_" {
                continue;
            }
            candidates.push(Candidate {
                anchor: base + paren.start(),
                construct: Construct::Params,
                context: name.as_str().to_string(),
            });
        }
    }

    for caps in OVERLAY_CALL.captures_iter(window) {
        if let Some(paren) = caps.get(1) {
            let Some(name) = CONTEXT_ARG
                .captures(&window[paren.end()..])
                .and_then(|c| c.get(1))
            else {
                continue;
            };
            candidates.push(Candidate {
                anchor: base + paren.start(),
                construct: Construct::Call,
                context: name.as_str().to_string(),
            });
        }
    }

    candidates
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Params,
    AfterParams,
    Body,
    Arrow,
}

/// Whether the construct opened at `anchor` is still open at `target`.
fn encloses(source: &str, anchor: usize, target: usize, construct: Construct) -> bool {
    let Some(slice) = source.get(anchor..target) else {
        return false;
    };
    let Ok(lexed) = lex_at(slice, anchor) else {
        return false;
    };

    match construct {
        Construct::Call => call_encloses(&lexed.tokens),
        Construct::Params => function_encloses(&lexed.tokens),
    }
}

fn call_encloses(tokens: &[Lexeme]) -> bool {
    let mut depth = 0usize;
    for lexeme in tokens {
        if lexeme.token.is_opener() {
            depth += 1;
        } else if lexeme.token.is_closer() {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return false;
            }
        }
    }
    depth > 0
}

fn function_encloses(tokens: &[Lexeme]) -> bool {
    let mut phase = Phase::Params;
    let mut depth = 0usize;

    for lexeme in tokens {
        let token = &lexeme.token;
        match phase {
            Phase::Params => {
                if token.is_opener() {
                    depth += 1;
                } else if token.is_closer() {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        phase = Phase::AfterParams;
                    }
                }
            }
            Phase::AfterParams => match token {
                Token::LBrace => {
                    phase = Phase::Body;
                    depth = 1;
                }
                Token::FatArrow => {
                    phase = Phase::Arrow;
                    depth = 0;
                }
                Token::Ident | Token::Operator => {}
                _ => return false,
            },
            Phase::Body => {
                if token.is_opener() {
                    depth += 1;
                } else if token.is_closer() {
                    depth -= 1;
                    if depth == 0 {
                        return false;
                    }
                }
            }
            Phase::Arrow => {
                if token.is_opener() {
                    depth += 1;
                } else if token.is_closer() {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                } else if depth == 0 && matches!(token, Token::Semi | Token::Comma) {
                    return false;
                }
            }
        }
    }

    matches!(phase, Phase::Body | Phase::Arrow)
}
