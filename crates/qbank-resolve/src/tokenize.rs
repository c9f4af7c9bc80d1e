//! Lowercase alphanumeric tokenizer.

/// Lowercase `text` and return its maximal `[a-z0-9]+` runs in order.
///
/// Everything else, including non-ASCII letters, separates tokens. No stop
/// words are removed and single characters are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
