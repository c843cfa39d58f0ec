//! Expression resolution for drawflow browser-automation workflows
//!
//! - [`graph`]: node adjacency and execution order from `drawflow.edges`
//! - [`template`]: variable substitution and loop markers in node parameters
//! - [`selector`]: CSS-like selectors to XPath
//! - [`text`]: cleanup for scraped element text
//!
//! All operations are pure and lenient: malformed input degrades to empty
//! results instead of errors.

pub mod cli;
pub mod config;
pub mod graph;
pub mod logging;
pub mod selector;
pub mod template;
pub mod text;
