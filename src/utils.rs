//! Common utility functions shared across the codebase.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

/// A `{paramN}` placeholder in normalized literal content.
pub static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{param\d+\}").unwrap());

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use arblift::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Hello"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("123"));
/// assert!(!contains_alphabetic("$100"));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Name of the placeholder for the `index`-th interpolated expression.
pub fn placeholder_name(index: usize) -> String {
    format!("param{}", index)
}

/// Remove `{paramN}` placeholders from normalized literal content.
pub fn strip_placeholders(content: &str) -> Cow<'_, str> {
    PLACEHOLDER.replace_all(content, "")
}

/// True when braces in `content` come from the literal text itself rather
/// than from the `placeholders` interpolations it was built from.
///
/// ARB messages read any `{...}` as placeholder syntax.
pub fn has_literal_braces(content: &str, placeholders: usize) -> bool {
    PLACEHOLDER.find_iter(content).count() != placeholders
        || strip_placeholders(content).contains(['{', '}'])
}
