//! Loop-scoped variable markers
//!
//! Nodes inside a loop block reference the current iteration with
//! `{{loopData.<expr>}}` or `{{loopData@<expr>}}`.

use regex::Regex;
use std::sync::LazyLock;

static LOOP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{loopData[.@](.*?)\}\}").expect("loop marker pattern is valid")
});

/// The expression of the first loop marker, `None` if there is no marker
///
/// Distinguishes a missing marker from an empty one (`{{loopData.}}`).
pub fn find_loop_variable(template: &str) -> Option<&str> {
    LOOP_MARKER
        .captures(template)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// The expression of the first loop marker, or an empty string
pub fn extract_loop_variable(template: &str) -> String {
    find_loop_variable(template).unwrap_or_default().to_string()
}
