//! CLI command implementations

use super::output::{CommandOutput, OutputEvent, OutputHandler};
use crate::graph::{self, AdjacencyMap};
use crate::selector;
use crate::template::{self, Resolver};
use crate::text;
use serde_json::{Map, Value};
use std::io::{self, Read};
use std::path::Path;

/// Read a file, or stdin when the path is `-`
pub fn read_input(path: &Path) -> io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
    }
}

fn read_document(path: &Path) -> Result<String, String> {
    read_input(path).map_err(|e| format!("Failed to read workflow '{}': {}", path.display(), e))
}

/// Adjacency map from raw workflow text
fn adjacency_from_text(
    text: &str,
    strict: bool,
    handler: &dyn OutputHandler,
) -> Result<AdjacencyMap, String> {
    if !strict {
        return Ok(graph::parse_document(text));
    }

    let document: Value =
        serde_json::from_str(text).map_err(|e| format!("Workflow is not valid JSON: {}", e))?;
    graph::try_extract_adjacency(&document).map_err(|e| {
        handler.emit(OutputEvent::Debug {
            message: format!("strict extraction rejected document: {:?}", e),
        });
        e.to_string()
    })
}

/// Print the adjacency map of a workflow
pub fn show_edges(path: &Path, strict: bool, handler: &dyn OutputHandler) -> Result<i32, String> {
    let text = read_document(path)?;

    match adjacency_from_text(&text, strict, handler) {
        Ok(adjacency) => {
            handler.emit(OutputEvent::Debug {
                message: format!(
                    "{} sources, {} edges",
                    adjacency.len(),
                    adjacency.edge_count()
                ),
            });
            handler.result(true, Some(&CommandOutput::Adjacency(adjacency)));
            Ok(0)
        }
        Err(error) => {
            handler.emit(OutputEvent::Error { error });
            handler.result(false, None);
            Ok(1)
        }
    }
}

/// Print the execution order of a workflow
pub fn show_order(path: &Path, strict: bool, handler: &dyn OutputHandler) -> Result<i32, String> {
    let text = read_document(path)?;

    let order = adjacency_from_text(&text, strict, handler)
        .and_then(|adjacency| graph::execution_order(&adjacency).map_err(|e| e.to_string()));

    match order {
        Ok(nodes) => {
            handler.result(true, Some(&CommandOutput::Order(nodes)));
            Ok(0)
        }
        Err(error) => {
            handler.emit(OutputEvent::Error { error });
            handler.result(false, None);
            Ok(1)
        }
    }
}

/// Load a variable store, treating a missing file as an empty store
pub fn load_store(
    path: Option<&Path>,
    handler: &dyn OutputHandler,
) -> Result<Map<String, Value>, String> {
    let Some(path) = path else {
        return Ok(Map::new());
    };

    match read_input(path) {
        Ok(text) => Ok(template::parse_store(&text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            handler.emit(OutputEvent::Warning {
                message: format!(
                    "variables file '{}' not found, using no variables",
                    path.display()
                ),
            });
            Ok(Map::new())
        }
        Err(e) => Err(format!("Failed to read variables '{}': {}", path.display(), e)),
    }
}

/// Resolve a template against a variables file
pub fn resolve_template(
    template_text: &str,
    vars: Option<&Path>,
    resolver: &Resolver,
    handler: &dyn OutputHandler,
) -> Result<i32, String> {
    let store = load_store(vars, handler)?;

    handler.emit(OutputEvent::Debug {
        message: format!(
            "{} variables, key order {:?}",
            store.len(),
            resolver.key_order()
        ),
    });

    let resolved = resolver.resolve(template_text, &store);
    handler.result(true, Some(&CommandOutput::Text(resolved)));
    Ok(0)
}

/// Print the loop variable referenced by a template
pub fn loop_variable(template_text: &str, handler: &dyn OutputHandler) -> i32 {
    let name = template::find_loop_variable(template_text);
    if name.is_none() {
        handler.emit(OutputEvent::Info {
            message: "no loop marker found".into(),
        });
    }

    handler.result(
        true,
        Some(&CommandOutput::Text(name.unwrap_or_default().to_string())),
    );
    0
}

/// Print the XPath for a selector
pub fn xpath(selector_text: &str, handler: &dyn OutputHandler) -> i32 {
    handler.emit(OutputEvent::Debug {
        message: format!("segments: {:?}", selector::parse(selector_text)),
    });
    handler.result(
        true,
        Some(&CommandOutput::Text(selector::to_xpath(selector_text))),
    );
    0
}

/// Print text with line breaks and tabs removed
pub fn clean_text(input: &str, handler: &dyn OutputHandler) -> i32 {
    handler.result(
        true,
        Some(&CommandOutput::Text(text::remove_extra_text_content(input))),
    );
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::tests::MockHandler;
    use crate::template::KeyOrder;
    use tempfile::TempDir;

    const WORKFLOW: &str = r#"{
        "drawflow": {
            "edges": [
                { "source": "start", "target": "open" },
                { "source": "open", "target": "click" },
                { "source": "open", "target": "scrape" }
            ]
        }
    }"#;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_show_edges() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "wf.json", WORKFLOW);
        let handler = MockHandler::default();

        assert_eq!(show_edges(&path, false, &handler), Ok(0));
        assert_eq!(
            handler.last_output(),
            Some((true, Some("start -> open\nopen -> click, scrape".into())))
        );
    }

    #[test]
    fn test_show_edges_strict_rejects_missing_edges() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "wf.json", r#"{"drawflow":{}}"#);
        let handler = MockHandler::default();

        assert_eq!(show_edges(&path, false, &handler), Ok(0));
        assert_eq!(show_edges(&path, true, &handler), Ok(1));
        assert!(handler
            .events()
            .iter()
            .any(|e| matches!(e, OutputEvent::Error { .. })));
    }

    #[test]
    fn test_show_edges_missing_file() {
        let handler = MockHandler::default();
        let result = show_edges(Path::new("/no/such/workflow.json"), false, &handler);
        assert!(result.unwrap_err().contains("Failed to read workflow"));
    }

    #[test]
    fn test_show_order() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "wf.json", WORKFLOW);
        let handler = MockHandler::default();

        assert_eq!(show_order(&path, false, &handler), Ok(0));
        assert_eq!(
            handler.last_output(),
            Some((true, Some("start\nopen\nclick\nscrape".into())))
        );
    }

    #[test]
    fn test_show_order_cycle() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "wf.json",
            r#"{"drawflow":{"edges":[{"source":"a","target":"b"},{"source":"b","target":"a"}]}}"#,
        );
        let handler = MockHandler::default();

        assert_eq!(show_order(&path, false, &handler), Ok(1));
        assert_eq!(handler.last_output(), Some((false, None)));
    }

    #[test]
    fn test_resolve_template() {
        let dir = TempDir::new().unwrap();
        let vars = write(&dir, "vars.json", r#"{"{{user}}": "ana", "{{ids}}": [1, 2]}"#);
        let handler = MockHandler::default();

        let code = resolve_template(
            "$push:{{user}} {{ids}}",
            Some(&vars),
            &Resolver::new(),
            &handler,
        );
        assert_eq!(code, Ok(0));
        assert_eq!(
            handler.last_output(),
            Some((true, Some("ana [1,2]".into())))
        );
    }

    #[test]
    fn test_resolve_missing_vars_file() {
        let handler = MockHandler::default();
        let resolver = Resolver::new().with_key_order(KeyOrder::LongestFirst);

        let code = resolve_template(
            "{{x}}",
            Some(Path::new("/no/such/vars.json")),
            &resolver,
            &handler,
        );
        assert_eq!(code, Ok(0));
        assert_eq!(handler.last_output(), Some((true, Some("{{x}}".into()))));
        assert!(handler
            .events()
            .iter()
            .any(|e| matches!(e, OutputEvent::Warning { .. })));
    }

    #[test]
    fn test_loop_variable() {
        let handler = MockHandler::default();
        assert_eq!(loop_variable("{{loopData.row}}", &handler), 0);
        assert_eq!(handler.last_output(), Some((true, Some("row".into()))));

        assert_eq!(loop_variable("plain", &handler), 0);
        assert_eq!(handler.last_output(), Some((true, Some(String::new()))));
        assert_eq!(handler.events().len(), 1);
    }

    #[test]
    fn test_xpath() {
        let handler = MockHandler::default();
        assert_eq!(xpath("ul > li", &handler), 0);
        assert_eq!(handler.last_output(), Some((true, Some("//ul/li".into()))));
    }

    #[test]
    fn test_clean_text() {
        let handler = MockHandler::default();
        assert_eq!(clean_text("a\n\tb", &handler), 0);
        assert_eq!(handler.last_output(), Some((true, Some("ab".into()))));
    }
}
