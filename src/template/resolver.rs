//! Variable substitution in node parameters

use super::store::VariableStore;
use serde::{Deserialize, Serialize};

/// Control marker for append semantics, meaningless in resolved text
pub const PUSH_MARKER: &str = "$push:";

/// Order in which store keys are substituted
///
/// Substitution is plain substring replacement, so when one key is a
/// substring of another the order decides the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrder {
    /// The store's own iteration order
    #[default]
    Store,
    /// Longer keys first, ties broken by key text; empty keys are skipped
    LongestFirst,
}

/// Substitutes variable keys in template text
#[derive(Debug, Clone)]
pub struct Resolver {
    key_order: KeyOrder,
    push_marker: String,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Resolver with store key order and the standard push marker
    pub fn new() -> Self {
        Self {
            key_order: KeyOrder::Store,
            push_marker: PUSH_MARKER.to_string(),
        }
    }

    pub fn with_key_order(mut self, key_order: KeyOrder) -> Self {
        self.key_order = key_order;
        self
    }

    pub fn with_push_marker(mut self, marker: impl Into<String>) -> Self {
        self.push_marker = marker.into();
        self
    }

    pub fn key_order(&self) -> KeyOrder {
        self.key_order
    }

    fn ordered_keys<'s, S: VariableStore + ?Sized>(&self, store: &'s S) -> Vec<&'s str> {
        let mut keys = store.keys();
        if self.key_order == KeyOrder::LongestFirst {
            keys.retain(|k| !k.is_empty());
            keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        }
        keys
    }

    /// Replace every occurrence of every store key in `template`
    ///
    /// Each key is visited once; replacements see the output of earlier
    /// replacements. Keys that do not occur are skipped without rendering.
    pub fn resolve<S: VariableStore + ?Sized>(&self, template: &str, store: &S) -> String {
        let mut text = if self.push_marker.is_empty() {
            template.to_string()
        } else {
            template.replace(&self.push_marker, "")
        };

        for key in self.ordered_keys(store) {
            if text.contains(key) {
                let value = store.render(key);
                tracing::trace!(key, value = %value, "Substituting variable");
                text = text.replace(key, &value);
            }
        }

        text
    }
}

/// Resolve `template` against `store` with store key order
///
/// Known limitation: matching is substring based, so a key that is part of a
/// longer key can clobber it depending on store order. Use
/// [`Resolver::with_key_order`] with [`KeyOrder::LongestFirst`] to avoid it.
pub fn resolve<S: VariableStore + ?Sized>(template: &str, store: &S) -> String {
    Resolver::new().resolve(template, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn store(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test store must be an object"),
        }
    }

    #[test]
    fn test_simple_substitution() {
        let vars = store(json!({ "{{name}}": "World" }));
        assert_eq!(resolve("Hello {{name}}", &vars), "Hello World");
    }

    #[test]
    fn test_push_marker_removed() {
        let vars = Map::new();
        assert_eq!(resolve("$push:data", &vars), "data");
        assert_eq!(resolve("a$push:b$push:c", &vars), "abc");
    }

    #[test]
    fn test_object_value_renders_as_json() {
        let vars = store(json!({ "{{user}}": { "id": 1, "roles": ["admin"] } }));
        assert_eq!(
            resolve("user={{user}}", &vars),
            r#"user={"id":1,"roles":["admin"]}"#
        );
    }

    #[test]
    fn test_scalar_values() {
        let vars = store(json!({ "$count": 42, "$ok": true, "$ratio": 0.5, "$none": null }));
        assert_eq!(
            resolve("$count $ok $ratio $none", &vars),
            "42 true 0.5 null"
        );
    }

    #[test]
    fn test_all_occurrences_replaced() {
        let vars = store(json!({ "X": "y" }));
        assert_eq!(resolve("X-X-X", &vars), "y-y-y");
    }

    #[test]
    fn test_missing_keys_untouched() {
        let vars = store(json!({ "{{a}}": "1" }));
        assert_eq!(resolve("{{a}} {{b}}", &vars), "1 {{b}}");
    }

    #[test]
    fn test_idempotent_on_resolved_text() {
        let vars = store(json!({ "{{name}}": "World" }));
        let once = resolve("Hello {{name}}", &vars);
        assert_eq!(resolve(&once, &vars), once);
    }

    #[test]
    fn test_store_order_overlap_is_legacy() {
        // serde_json maps iterate in key order, so `name` runs before `name_full`
        let vars = store(json!({ "name": "A", "name_full": "B" }));
        assert_eq!(resolve("name_full", &vars), "A_full");
    }

    #[test]
    fn test_longest_first_handles_overlap() {
        let vars = store(json!({ "name": "A", "name_full": "B" }));
        let resolver = Resolver::new().with_key_order(KeyOrder::LongestFirst);
        assert_eq!(resolver.resolve("name_full / name", &vars), "B / A");
    }

    #[test]
    fn test_empty_key() {
        let vars = store(json!({ "": "-" }));
        // Legacy order matches the empty key everywhere
        assert_eq!(resolve("ab", &vars), "-a-b-");

        let resolver = Resolver::new().with_key_order(KeyOrder::LongestFirst);
        assert_eq!(resolver.resolve("ab", &vars), "ab");
    }

    #[test]
    fn test_value_containing_other_key() {
        // Each key is visited once, so self-referencing values terminate
        let vars = store(json!({ "a": "aa" }));
        assert_eq!(resolve("a", &vars), "aa");
    }

    #[test]
    fn test_custom_push_marker() {
        let vars = Map::new();
        let resolver = Resolver::new().with_push_marker("@@");
        assert_eq!(resolver.resolve("@@x$push:", &vars), "x$push:");
    }

    #[test]
    fn test_key_order_deserialize() {
        let order: KeyOrder = serde_json::from_str("\"longest_first\"").unwrap();
        assert_eq!(order, KeyOrder::LongestFirst);
        assert_eq!(KeyOrder::default(), KeyOrder::Store);
    }
}
