//! Cleanup for text scraped from page elements

/// Remove line breaks and tabs from element text
///
/// Other whitespace, including `\r` and runs of spaces, is left alone.
pub fn remove_extra_text_content(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '\n' | '\t')).collect()
}
