//! CLI module for flowres
//!
//! This module provides:
//! - Command implementations (edges, order, resolve, loop-var, xpath, clean-text)
//! - Output handlers (console, JSON, quiet)
//!
//! # Example
//!
//! ```ignore
//! use flow_resolve::cli::{commands, output};
//!
//! let handler = output::create_handler(output::OutputMode::Console, false);
//! let exit_code = commands::show_edges(Path::new("workflow.json"), false, &*handler)?;
//! ```

pub mod commands;
pub mod output;

pub use commands::{
    clean_text, load_store, loop_variable, read_input, resolve_template, show_edges, show_order,
    xpath,
};
pub use output::{CommandOutput, OutputEvent, OutputHandler, OutputMode, create_handler};
