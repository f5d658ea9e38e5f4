//! Dart tokenizer built on `logos`.
//!
//! Only the token shapes the structural parser cares about are distinguished.
//! Every other operator collapses into [`Token::Operator`]. String literals are
//! scanned by a callback so that interpolation (`$name`, `${expr}`) with nested
//! braces and nested strings is handled in one pass.

use logos::{Lexer, Logos};

use super::error::ParseError;
use super::tree::Span;

/// One piece of a string literal after escape processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrPart {
    /// Literal text with escapes cooked.
    Text(String),
    /// An embedded expression. `span` covers the expression source only
    /// (without `$`, `${` or `}`).
    Interpolation { source: String, span: Span },
}

/// Payload of a string token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringToken {
    pub raw: bool,
    pub triple: bool,
    pub parts: Vec<StrPart>,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f\u{feff}]+")]
pub enum Token {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    #[regex(r#"r?['"]"#, string_literal)]
    Str(StringToken),

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9][0-9_]*(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?")]
    Number,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token(":")]
    Colon,
    #[token("=>")]
    FatArrow,
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token("?.")]
    QuestionDot,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("@")]
    At,

    #[regex(r"[+\-*/%!?&|^~#]=?")]
    #[regex(r"==|!=|<=|>=|<<=?|>>>?=?|&&=?|\|\|=?|\+\+|--|\?\?=?")]
    #[regex(r"\.\.\.?\??|\?\.\.")]
    Operator,
}

impl Token {
    pub fn is_comment(&self) -> bool {
        matches!(self, Token::LineComment | Token::BlockComment)
    }

    pub fn is_opener(&self) -> bool {
        matches!(self, Token::LParen | Token::LBrace | Token::LBracket)
    }

    pub fn is_closer(&self) -> bool {
        matches!(self, Token::RParen | Token::RBrace | Token::RBracket)
    }

    /// The closing token matching an opener.
    pub fn closer(&self) -> Option<Token> {
        match self {
            Token::LParen => Some(Token::RParen),
            Token::LBrace => Some(Token::RBrace),
            Token::LBracket => Some(Token::RBracket),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Token::LParen => '(',
            Token::RParen => ')',
            Token::LBrace => '{',
            Token::RBrace => '}',
            Token::LBracket => '[',
            Token::RBracket => ']',
            Token::Comma => ',',
            Token::Semi => ';',
            Token::Colon => ':',
            Token::Eq => '=',
            Token::Dot => '.',
            Token::Lt => '<',
            Token::Gt => '>',
            Token::At => '@',
            _ => '?',
        }
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
}

/// Output of [`lex`]: code tokens and comment spans, kept apart.
#[derive(Debug, Default)]
pub struct Lexed {
    pub tokens: Vec<Lexeme>,
    pub comments: Vec<Span>,
}

/// Tokenize Dart source.
pub fn lex(source: &str) -> Result<Lexed, ParseError> {
    lex_at(source, 0)
}

/// Tokenize a slice of a larger buffer, shifting spans by `base`.
pub fn lex_at(source: &str, base: usize) -> Result<Lexed, ParseError> {
    let mut lexed = Lexed::default();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(base + range.start, base + range.end);
        match result {
            Ok(token) if token.is_comment() => lexed.comments.push(span),
            Ok(token) => lexed.tokens.push(Lexeme { token, span }),
            Err(()) => {
                let slice = &source[range.start..];
                let offset = base + range.start;
                return Err(if slice.starts_with("/*") {
                    ParseError::UnterminatedComment { offset }
                } else if slice.starts_with(['\'', '"']) || slice.starts_with("r'") || slice.starts_with("r\"") {
                    ParseError::UnterminatedString { offset }
                } else {
                    ParseError::UnexpectedChar {
                        found: slice.chars().next().unwrap_or('\0'),
                        offset,
                    }
                });
            }
        }
    }

    Ok(lexed)
}

fn block_comment(lex: &mut Lexer<Token>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        if rest[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if rest[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                lex.bump(i);
                return true;
            }
        } else {
            i += 1;
        }
    }
    false
}

fn string_literal(lex: &mut Lexer<Token>) -> Option<StringToken> {
    let opening = lex.slice();
    let raw = opening.starts_with('r');
    let quote = opening.chars().last()?;
    let base = lex.span().end;
    let rest = lex.remainder();

    let triple_tail: String = [quote, quote].iter().collect();
    let triple = rest.starts_with(&triple_tail);
    let start = if triple { 2 } else { 0 };

    let (parts, end) = scan_string_body(rest, start, quote, triple, raw, base)?;
    lex.bump(end);
    Some(StringToken { raw, triple, parts })
}

/// Scan a string body starting at `from` (just past the opening quotes).
///
/// Returns the parts and the index just past the closing quotes. `base` is the
/// absolute offset of `text[0]`, used for interpolation spans.
fn scan_string_body(
    text: &str,
    from: usize,
    quote: char,
    triple: bool,
    raw: bool,
    base: usize,
) -> Option<(Vec<StrPart>, usize)> {
    let closing: String = if triple {
        [quote, quote, quote].iter().collect()
    } else {
        quote.to_string()
    };
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut i = from;

    loop {
        let rest = text.get(i..)?;
        if rest.is_empty() {
            return None;
        }
        if rest.starts_with(&closing) {
            if !buf.is_empty() {
                parts.push(StrPart::Text(buf));
            }
            return Some((parts, i + closing.len()));
        }

        let c = rest.chars().next()?;
        if c == '\n' && !triple {
            return None;
        }

        if c == '\\' && !raw {
            let (cooked, consumed) = cook_escape(&rest[1..])?;
            buf.push_str(&cooked);
            i += 1 + consumed;
            continue;
        }

        if c == '$' && !raw {
            let after = &rest[1..];
            if after.starts_with('{') {
                let expr_start = i + 2;
                let close = scan_interpolation(text, expr_start)?;
                let inner = &text[expr_start..close];
                let leading = inner.len() - inner.trim_start().len();
                let trimmed = inner.trim();
                if !buf.is_empty() {
                    parts.push(StrPart::Text(std::mem::take(&mut buf)));
                }
                let start = base + expr_start + leading;
                parts.push(StrPart::Interpolation {
                    source: trimmed.to_string(),
                    span: Span::new(start, start + trimmed.len()),
                });
                i = close + 1;
                continue;
            }
            let ident_len = after
                .chars()
                .take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
                .count();
            if ident_len > 0 && !after.starts_with(|ch: char| ch.is_ascii_digit()) {
                if !buf.is_empty() {
                    parts.push(StrPart::Text(std::mem::take(&mut buf)));
                }
                let start = base + i + 1;
                parts.push(StrPart::Interpolation {
                    source: after[..ident_len].to_string(),
                    span: Span::new(start, start + ident_len),
                });
                i += 1 + ident_len;
                continue;
            }
        }

        buf.push(c);
        i += c.len_utf8();
    }
}

/// Find the `}` closing an interpolation whose expression starts at `from`.
fn scan_interpolation(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = from;
    let mut prev: Option<char> = None;

    while let Some(c) = text.get(i..).and_then(|rest| rest.chars().next()) {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            '\'' | '"' => {
                let raw = prev == Some('r');
                let rest = &text[i + 1..];
                let tail: String = [c, c].iter().collect();
                let triple = rest.starts_with(&tail);
                let start = i + 1 + if triple { 2 } else { 0 };
                let (_, end) = scan_string_body(text, start, c, triple, raw, 0)?;
                i = end;
                prev = None;
                continue;
            }
            _ => {}
        }
        prev = Some(c);
        i += c.len_utf8();
    }
    None
}

/// Cook one escape sequence. `rest` starts right after the backslash.
/// Returns the cooked text and the number of bytes consumed from `rest`.
fn cook_escape(rest: &str) -> Option<(String, usize)> {
    let c = rest.chars().next()?;
    let simple = match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'v' => Some('\u{b}'),
        _ => None,
    };
    if let Some(ch) = simple {
        return Some((ch.to_string(), 1));
    }

    match c {
        'x' => {
            let hex = rest.get(1..3)?;
            let value = u32::from_str_radix(hex, 16).ok()?;
            Some((char::from_u32(value)?.to_string(), 3))
        }
        'u' if rest[1..].starts_with('{') => {
            let close = rest.find('}')?;
            let value = u32::from_str_radix(&rest[2..close], 16).ok()?;
            Some((code_point(value).to_string(), close + 1))
        }
        'u' => {
            let value = hex4(rest.get(1..5)?)?;
            if (0xD800..0xDC00).contains(&value)
                && let Some(low) = rest
                    .get(5..11)
                    .and_then(|next| next.strip_prefix("\\u"))
                    .and_then(hex4)
                    .filter(|low| (0xDC00..0xE000).contains(low))
            {
                let combined = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
                return Some((code_point(combined).to_string(), 11));
            }
            Some((code_point(value).to_string(), 5))
        }
        other => Some((other.to_string(), other.len_utf8())),
    }
}

fn hex4(hex: &str) -> Option<u32> {
    if hex.len() != 4 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

/// Unpaired surrogates become U+FFFD.
fn code_point(value: u32) -> char {
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}
