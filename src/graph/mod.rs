//! Workflow graph adjacency
//!
//! Workflows are authored on a drawflow canvas and saved as JSON. The canvas
//! stores connections under `drawflow.edges`:
//!
//! ```json
//! { "drawflow": { "edges": [ { "source": "a", "target": "b" } ] } }
//! ```
//!
//! This module turns that list into an [`AdjacencyMap`] and derives a node
//! visiting order from it.
//!
//! Extraction is lenient: a missing path, a non-array value or an edge with
//! missing fields never fails, it just contributes nothing (or empty ids).
//! Callers that want validation use [`try_extract_adjacency`] instead.
//!
//! # Example
//!
//! ```
//! use flow_resolve::graph::{extract_adjacency, execution_order};
//! use serde_json::json;
//!
//! let doc = json!({ "drawflow": { "edges": [
//!     { "source": "start", "target": "open" },
//!     { "source": "open", "target": "click" },
//! ]}});
//!
//! let adjacency = extract_adjacency(&doc);
//! assert_eq!(adjacency.targets("start"), ["open"]);
//! assert_eq!(execution_order(&adjacency).unwrap(), ["start", "open", "click"]);
//! ```

mod edges;
mod error;
mod order;

pub use edges::{
    AdjacencyMap, Edge, EdgeFields, NodeId, edge_records, extract_adjacency, parse_document,
    try_extract_adjacency,
};
pub use error::GraphError;
pub use order::execution_order;
