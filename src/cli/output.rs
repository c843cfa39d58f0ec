//! Output handlers for CLI commands
//!
//! Supports console (pretty), JSON, and quiet output modes.

use crate::graph::{AdjacencyMap, NodeId};
use serde::{Deserialize, Serialize};

/// Output mode for CLI
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Console,
    Json,
    Quiet,
}

/// Diagnostic events emitted while a command runs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputEvent {
    Info { message: String },
    Warning { message: String },
    Error { error: String },
    Debug { message: String },
}

/// Final result of a command
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CommandOutput {
    Adjacency(AdjacencyMap),
    Order(Vec<NodeId>),
    Text(String),
}

impl CommandOutput {
    /// Plain-text rendering used by console and quiet modes
    pub fn to_plain(&self) -> String {
        match self {
            CommandOutput::Adjacency(map) => map
                .iter()
                .map(|(source, targets)| format!("{} -> {}", source, targets.join(", ")))
                .collect::<Vec<_>>()
                .join("\n"),
            CommandOutput::Order(nodes) => nodes.join("\n"),
            CommandOutput::Text(text) => text.clone(),
        }
    }
}

/// Output handler trait
pub trait OutputHandler: Send + Sync {
    /// Emit an event
    fn emit(&self, event: OutputEvent);

    /// Write final result
    fn result(&self, success: bool, output: Option<&CommandOutput>);
}

/// Console output handler
pub struct ConsoleHandler {
    debug: bool,
}

impl ConsoleHandler {
    /// Create a new console handler
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }
}

impl OutputHandler for ConsoleHandler {
    fn emit(&self, event: OutputEvent) {
        match event {
            OutputEvent::Info { message } => eprintln!("{}", message),
            OutputEvent::Warning { message } => eprintln!("warning: {}", message),
            OutputEvent::Error { error } => eprintln!("Error: {}", error),
            OutputEvent::Debug { message } => {
                if self.debug {
                    eprintln!("[debug] {}", message);
                }
            }
        }
    }

    fn result(&self, _success: bool, output: Option<&CommandOutput>) {
        if let Some(out) = output {
            let text = out.to_plain();
            if !text.is_empty() {
                println!("{}", text);
            }
        }
    }
}

/// JSON output handler
pub struct JsonHandler {
    pretty: bool,
}

impl JsonHandler {
    /// Create a new JSON handler
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn print_json<T: Serialize>(&self, value: &T) {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };

        if let Ok(s) = json {
            println!("{}", s);
        }
    }
}

impl OutputHandler for JsonHandler {
    fn emit(&self, event: OutputEvent) {
        self.print_json(&event);
    }

    fn result(&self, success: bool, output: Option<&CommandOutput>) {
        #[derive(Serialize)]
        struct FinalResult<'a> {
            success: bool,
            output: Option<&'a CommandOutput>,
        }

        self.print_json(&FinalResult { success, output });
    }
}

/// Quiet handler that only prints the final output
pub struct QuietHandler;

impl OutputHandler for QuietHandler {
    fn emit(&self, _event: OutputEvent) {}

    fn result(&self, _success: bool, output: Option<&CommandOutput>) {
        if let Some(out) = output {
            println!("{}", out.to_plain());
        }
    }
}

/// Create an output handler based on mode
pub fn create_handler(mode: OutputMode, debug: bool) -> Box<dyn OutputHandler> {
    match mode {
        OutputMode::Console => Box::new(ConsoleHandler::new(debug)),
        OutputMode::Json => Box::new(JsonHandler::new(true)),
        OutputMode::Quiet => Box::new(QuietHandler),
    }
}
