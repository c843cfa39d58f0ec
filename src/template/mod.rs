//! Template resolution for node parameters
//!
//! Node parameters are free text that may mention runtime variables by key.
//! Resolution is literal: every key found in the text is replaced by the
//! variable's value, strings as-is and everything else as JSON.
//!
//! # Features
//!
//! - Substitution against any [`VariableStore`]: `resolve("Hi {{user}}", &vars)`
//! - `$push:` append markers are stripped
//! - Loop markers: `{{loopData.item}}`, `{{loopData@item}}`
//! - Optional longest-key-first ordering for overlapping keys
//!
//! # Example
//!
//! ```
//! use flow_resolve::template::{extract_loop_variable, resolve};
//! use serde_json::json;
//!
//! let vars = json!({ "{{name}}": "World", "{{ids}}": [1, 2] });
//! assert_eq!(resolve("Hello {{name}} {{ids}}", &vars), "Hello World [1,2]");
//! assert_eq!(extract_loop_variable("{{loopData.rows}}"), "rows");
//! ```

mod errors;
mod loop_marker;
mod resolver;
mod store;

pub use errors::StoreError;
pub use loop_marker::{extract_loop_variable, find_loop_variable};
pub use resolver::{KeyOrder, PUSH_MARKER, Resolver, resolve};
pub use store::{VariableStore, parse_store};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loop_node_parameters() {
        // A node inside a loop references both workflow variables and the
        // current iteration
        let vars = json!({
            "{{baseUrl}}": "https://example.test",
            "{{page}}": 3,
        });

        let template = "$push:{{baseUrl}}/list?page={{page}}&row={{loopData.row}}";
        let resolved = resolve(template, &vars);

        assert_eq!(
            resolved,
            "https://example.test/list?page=3&row={{loopData.row}}"
        );
        assert_eq!(extract_loop_variable(&resolved), "row");
    }

    #[test]
    fn test_loop_value_substitution() {
        // The engine stores the iteration value under the full marker text
        let marker = "{{loopData@item}}";
        let name = extract_loop_variable(marker);
        assert_eq!(name, "item");

        let vars = json!({ marker: { "title": "first" } });
        assert_eq!(
            resolve("open {{loopData@item}}", &vars),
            r#"open {"title":"first"}"#
        );
    }
}
