//! Variable store error types

use thiserror::Error;

/// Failures when reading a variable as a scalar string
///
/// Resolution never surfaces these; they tell the resolver to fall back to the
/// JSON rendering of the value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No variable with this key
    #[error("unknown variable '{key}'{}", .suggestion.as_ref().map(|s| format!(", did you mean '{}'?", s)).unwrap_or_default())]
    Missing {
        key: String,
        suggestion: Option<String>,
    },

    /// The variable exists but holds a non-string value
    #[error("variable '{key}' is {actual}, not a string")]
    NotAString { key: String, actual: &'static str },
}

impl StoreError {
    /// Create a missing-key error, suggesting the closest known key
    pub fn missing(key: impl Into<String>, known_keys: &[&str]) -> Self {
        let key = key.into();
        let suggestion = suggest_key(&key, known_keys);
        Self::Missing { key, suggestion }
    }

    pub fn not_a_string(key: impl Into<String>, actual: &'static str) -> Self {
        Self::NotAString {
            key: key.into(),
            actual,
        }
    }
}

/// Closest key by edit distance, within half the key length
pub fn suggest_key(typo: &str, candidates: &[&str]) -> Option<String> {
    let max_distance = (typo.chars().count() / 2).max(2);

    candidates
        .iter()
        .map(|candidate| (edit_distance(typo, candidate), *candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}

/// Levenshtein distance over chars, single-row
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, a_char) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != *b_char);
            let next = (row[j + 1] + 1).min(row[j] + 1).min(diagonal + cost);
            diagonal = row[j + 1];
            row[j + 1] = next;
        }
    }

    row[b_chars.len()]
}
