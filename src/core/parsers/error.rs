use thiserror::Error;

/// A structural failure while parsing a Dart file.
///
/// Offsets are byte offsets into the file text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character '{found}' at byte {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unterminated block comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("unbalanced '{found}' at byte {offset}")]
    Unbalanced { found: char, offset: usize },

    #[error("'{open}' opened at byte {offset} is never closed")]
    Unclosed { open: char, offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedChar { offset, .. }
            | ParseError::UnterminatedString { offset }
            | ParseError::UnterminatedComment { offset }
            | ParseError::Unbalanced { offset, .. }
            | ParseError::Unclosed { offset, .. } => *offset,
        }
    }
}
