//! Selector parsing and XPath rendering

use serde::Serialize;
use std::fmt;

/// One step of a selector, between `>` combinators
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag.class`
    TagClass { tag: String, class: String },
    /// Anything else, emitted verbatim
    Tag(String),
}

impl Segment {
    /// Classify a single, already trimmed selector segment
    pub fn from_segment(segment: &str) -> Self {
        if let Some(id) = segment.strip_prefix('#') {
            return Self::Id(id.to_string());
        }
        if let Some(class) = segment.strip_prefix('.') {
            return Self::Class(class.to_string());
        }
        match segment.split_once('.') {
            Some((tag, rest)) => {
                // Only the first class of `tag.a.b` is matched
                let class = rest.split('.').next().unwrap_or(rest);
                Self::TagClass {
                    tag: tag.to_string(),
                    class: class.to_string(),
                }
            }
            None => Self::Tag(segment.to_string()),
        }
    }
}

/// Space-padded class predicate so `item` does not match `item-list`
fn class_predicate(class: &str) -> String {
    format!(
        "[contains(concat(' ', normalize-space(@class), ' '), ' {} ')]",
        class
    )
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Id(id) => write!(f, "*[@id='{}']", id),
            Segment::Class(class) => write!(f, "*{}", class_predicate(class)),
            Segment::TagClass { tag, class } => write!(f, "{}{}", tag, class_predicate(class)),
            Segment::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// Split a selector on `>` and classify each trimmed segment
pub fn parse(selector: &str) -> Vec<Segment> {
    selector
        .trim()
        .split('>')
        .map(|part| Segment::from_segment(part.trim()))
        .collect()
}

/// Translate a CSS-like selector into an absolute-descendant XPath
///
/// An empty selector yields `//`.
pub fn to_xpath(selector: &str) -> String {
    let steps: Vec<String> = parse(selector).iter().map(Segment::to_string).collect();
    let xpath = format!("//{}", steps.join("/"));

    tracing::trace!(selector, xpath = %xpath, "Translated selector");
    xpath
}
