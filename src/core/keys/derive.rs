use crate::utils::PLACEHOLDER;

/// Dart reserved words and built-in identifiers that cannot be used as a
/// generated getter name.
const RESERVED: &[&str] = &[
    "abstract", "as", "assert", "async", "await", "base", "break", "case", "catch", "class",
    "const", "continue", "covariant", "default", "deferred", "do", "dynamic", "else", "enum",
    "export", "extends", "extension", "external", "factory", "false", "final", "finally", "for",
    "function", "get", "hide", "if", "implements", "import", "in", "interface", "is", "late",
    "library", "mixin", "new", "null", "of", "on", "operator", "part", "required", "rethrow",
    "return", "sealed", "set", "show", "static", "super", "switch", "sync", "this", "throw",
    "true", "try", "type", "typedef", "var", "void", "when", "while", "with", "yield",
];

const FALLBACK: &str = "text";

/// Derive a lowerCamelCase resource key from normalized literal content.
///
/// Placeholders and apostrophes are dropped, any other non-alphanumeric
/// character separates words. Whole words are appended while the key stays
/// within `max_len`.
///
/// ```
/// use arblift::core::keys::derive_key;
///
/// assert_eq!(derive_key("Hello World", 40), "helloWorld");
/// assert_eq!(derive_key("Don't have an account?", 40), "dontHaveAnAccount");
/// assert_eq!(derive_key("Welcome, {param0}!", 40), "welcome");
/// ```
pub fn derive_key(content: &str, max_len: usize) -> String {
    let text = PLACEHOLDER
        .replace_all(content, " ")
        .replace(['\'', '\u{2019}'], "");

    let mut key = String::new();
    for word in text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let word = word.to_ascii_lowercase();
        if key.is_empty() {
            key = word;
            continue;
        }
        if key.len() + word.len() > max_len {
            break;
        }
        key.push_str(&capitalize(&word));
    }
    key.truncate(max_len);

    if key.is_empty() {
        return FALLBACK.to_string();
    }
    if key.starts_with(|c: char| c.is_ascii_digit()) {
        key = format!("{}{}", FALLBACK, key);
    }
    if RESERVED.contains(&key.as_str()) {
        key.push_str("Text");
    }
    key
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
