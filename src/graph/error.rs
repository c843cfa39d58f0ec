//! Graph error types

use thiserror::Error;

/// Errors from strict edge extraction and ordering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The document has no array at `drawflow.edges`
    #[error("document has no edge list at 'drawflow.edges'")]
    MissingEdges,

    /// An edge record lacks a string `source` or `target`
    #[error("edge #{index} has no string '{field}' field")]
    MalformedEdge { index: usize, field: &'static str },

    /// The edges do not form a DAG
    #[error("cycle detected involving node '{node}'")]
    Cycle { node: String },
}
