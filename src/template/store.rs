//! Read-only access to runtime variables

use super::errors::StoreError;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Variables visible to template resolution
///
/// The engine owns and mutates the pool between node executions; resolution
/// only needs to enumerate keys and read values.
pub trait VariableStore {
    /// All variable keys, in the store's iteration order
    fn keys(&self) -> Vec<&str>;

    /// The value of `key` if it is a plain JSON string
    fn get_str(&self, key: &str) -> Result<&str, StoreError>;

    /// The value of `key` as canonical JSON text, `None` if the key is absent
    fn get_json(&self, key: &str) -> Option<String>;

    /// Text substituted for `key`: the raw string for string values, JSON
    /// text for everything else, empty if nothing can be rendered
    fn render(&self, key: &str) -> String {
        match self.get_str(key) {
            Ok(s) => s.to_string(),
            Err(_) => self.get_json(key).unwrap_or_default(),
        }
    }
}

/// Human-readable JSON type name for error messages
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn lookup_str<'a>(
    value: Option<&'a Value>,
    key: &str,
    known_keys: impl FnOnce() -> Vec<&'a str>,
) -> Result<&'a str, StoreError> {
    match value {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(StoreError::not_a_string(key, kind_of(other))),
        None => Err(StoreError::missing(key, &known_keys())),
    }
}

fn to_json(value: Option<&Value>) -> Option<String> {
    value.and_then(|v| match serde_json::to_string(v) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(error = %e, "Variable could not be serialized");
            None
        }
    })
}

impl VariableStore for Map<String, Value> {
    fn keys(&self) -> Vec<&str> {
        Map::keys(self).map(String::as_str).collect()
    }

    fn get_str(&self, key: &str) -> Result<&str, StoreError> {
        lookup_str(self.get(key), key, || VariableStore::keys(self))
    }

    fn get_json(&self, key: &str) -> Option<String> {
        to_json(self.get(key))
    }
}

impl VariableStore for HashMap<String, Value> {
    fn keys(&self) -> Vec<&str> {
        HashMap::keys(self).map(String::as_str).collect()
    }

    fn get_str(&self, key: &str) -> Result<&str, StoreError> {
        lookup_str(self.get(key), key, || VariableStore::keys(self))
    }

    fn get_json(&self, key: &str) -> Option<String> {
        to_json(self.get(key))
    }
}

/// A JSON document used as a store; only objects have variables
impl VariableStore for Value {
    fn keys(&self) -> Vec<&str> {
        match self {
            Value::Object(map) => VariableStore::keys(map),
            _ => Vec::new(),
        }
    }

    fn get_str(&self, key: &str) -> Result<&str, StoreError> {
        match self {
            Value::Object(map) => map.get_str(key),
            _ => Err(StoreError::missing(key, &[])),
        }
    }

    fn get_json(&self, key: &str) -> Option<String> {
        to_json(self.as_object().and_then(|map| map.get(key)))
    }
}

/// Parse a JSON object into a store
///
/// Anything that is not a JSON object yields an empty store.
pub fn parse_store(text: &str) -> Map<String, Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            tracing::debug!(kind = kind_of(&other), "Variable store is not an object");
            Map::new()
        }
        Err(e) => {
            tracing::debug!(error = %e, "Variable store is not valid JSON");
            Map::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> Map<String, Value> {
        match json!({
            "name": "World",
            "count": 3,
            "flag": false,
            "user": { "id": 7 },
            "tags": ["a", "b"],
            "nothing": null,
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_get_str() {
        let store = store();
        assert_eq!(store.get_str("name"), Ok("World"));
        assert_eq!(
            store.get_str("count"),
            Err(StoreError::not_a_string("count", "a number"))
        );
        assert!(matches!(
            store.get_str("nmae"),
            Err(StoreError::Missing { suggestion: Some(ref s), .. }) if s == "name"
        ));
    }

    #[test]
    fn test_get_json() {
        let store = store();
        assert_eq!(store.get_json("name").as_deref(), Some("\"World\""));
        assert_eq!(store.get_json("user").as_deref(), Some(r#"{"id":7}"#));
        assert_eq!(store.get_json("missing"), None);
    }

    #[test]
    fn test_render() {
        let store = store();
        assert_eq!(store.render("name"), "World");
        assert_eq!(store.render("count"), "3");
        assert_eq!(store.render("flag"), "false");
        assert_eq!(store.render("tags"), r#"["a","b"]"#);
        assert_eq!(store.render("nothing"), "null");
        assert_eq!(store.render("missing"), "");
    }

    #[test]
    fn test_value_store() {
        let value = json!({ "a": "1" });
        assert_eq!(VariableStore::keys(&value), ["a"]);
        assert_eq!(value.get_str("a"), Ok("1"));

        let scalar = json!("just text");
        assert!(VariableStore::keys(&scalar).is_empty());
        assert_eq!(scalar.render("anything"), "");
    }

    #[test]
    fn test_hashmap_store() {
        let mut vars = HashMap::new();
        vars.insert("k".to_string(), json!([1, 2]));
        assert_eq!(vars.render("k"), "[1,2]");
    }

    #[test]
    fn test_parse_store() {
        assert_eq!(parse_store(r#"{"x": "y"}"#).len(), 1);
        assert!(parse_store("[1, 2]").is_empty());
        assert!(parse_store("{oops").is_empty());
    }
}
