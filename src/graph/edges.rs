//! Edge extraction from drawflow documents

use super::GraphError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::collections::HashMap;

/// Opaque node identifier as written by the canvas
pub type NodeId = String;

/// JSON pointer to the edge list inside a workflow document
const EDGES_POINTER: &str = "/drawflow/edges";

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Read an edge record leniently: missing or non-string fields become `""`
    pub fn from_record(record: &Value) -> Self {
        EdgeFields::read(record).into_edge()
    }
}

/// Raw view of an edge record that keeps "missing" distinct from "empty"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeFields<'a> {
    pub source: Option<&'a str>,
    pub target: Option<&'a str>,
}

impl<'a> EdgeFields<'a> {
    /// Look up `source` and `target` on a record without defaulting
    pub fn read(record: &'a Value) -> Self {
        Self {
            source: record.get("source").and_then(Value::as_str),
            target: record.get("target").and_then(Value::as_str),
        }
    }

    /// Lenient conversion, absent fields become empty ids
    pub fn into_edge(self) -> Edge {
        Edge::new(
            self.source.unwrap_or_default(),
            self.target.unwrap_or_default(),
        )
    }

    /// Strict conversion, the first absent field is reported
    pub fn require(self, index: usize) -> Result<Edge, GraphError> {
        let source = self.source.ok_or(GraphError::MalformedEdge {
            index,
            field: "source",
        })?;
        let target = self.target.ok_or(GraphError::MalformedEdge {
            index,
            field: "target",
        })?;
        Ok(Edge::new(source, target))
    }
}

/// Source node to ordered downstream nodes
///
/// Targets keep document order and are never deduplicated. Sources iterate in
/// the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    targets: HashMap<NodeId, Vec<NodeId>>,
    sources: Vec<NodeId>,
}

impl AdjacencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge
    pub fn push(&mut self, edge: Edge) {
        match self.targets.get_mut(&edge.source) {
            Some(list) => list.push(edge.target),
            None => {
                self.sources.push(edge.source.clone());
                self.targets.insert(edge.source, vec![edge.target]);
            }
        }
    }

    /// Downstream nodes of `source`, or `None` if no edge starts there
    pub fn get(&self, source: &str) -> Option<&[NodeId]> {
        self.targets.get(source).map(Vec::as_slice)
    }

    /// Downstream nodes of `source`, empty if none
    pub fn targets(&self, source: &str) -> &[NodeId] {
        self.get(source).unwrap_or_default()
    }

    /// Check whether any edge starts at `source`
    pub fn contains_source(&self, source: &str) -> bool {
        self.targets.contains_key(source)
    }

    /// Sources in first-seen order
    pub fn sources(&self) -> impl Iterator<Item = &NodeId> {
        self.sources.iter()
    }

    /// `(source, targets)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &[NodeId])> {
        self.sources
            .iter()
            .map(move |source| (source, self.targets(source)))
    }

    /// Number of distinct sources
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Total number of edges, duplicates included
    pub fn edge_count(&self) -> usize {
        self.targets.values().map(Vec::len).sum()
    }

    /// Drop ordering information and return the plain map
    pub fn into_map(self) -> HashMap<NodeId, Vec<NodeId>> {
        self.targets
    }
}

impl FromIterator<Edge> for AdjacencyMap {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut map = Self::new();
        for edge in iter {
            map.push(edge);
        }
        map
    }
}

impl Serialize for AdjacencyMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (source, targets) in self.iter() {
            map.serialize_entry(source, targets)?;
        }
        map.end()
    }
}

/// The edge array of a workflow document, if present
///
/// Returns `None` when any level of `drawflow.edges` is missing or the value
/// is not an array, which lets callers tell "no edges" from "no edge list".
pub fn edge_records(document: &Value) -> Option<&Vec<Value>> {
    document.pointer(EDGES_POINTER).and_then(Value::as_array)
}

/// Build the adjacency map of a workflow document
///
/// Never fails: a missing edge list yields an empty map and malformed records
/// contribute empty ids.
pub fn extract_adjacency(document: &Value) -> AdjacencyMap {
    let Some(records) = edge_records(document) else {
        tracing::debug!("No edge list in workflow document");
        return AdjacencyMap::new();
    };

    records.iter().map(Edge::from_record).collect()
}

/// Build the adjacency map, rejecting missing or malformed edge data
pub fn try_extract_adjacency(document: &Value) -> Result<AdjacencyMap, GraphError> {
    let records = edge_records(document).ok_or(GraphError::MissingEdges)?;

    records
        .iter()
        .enumerate()
        .map(|(index, record)| EdgeFields::read(record).require(index))
        .collect()
}

/// Parse raw workflow JSON and build its adjacency map
///
/// Unparseable text is treated like a document without edges.
pub fn parse_document(text: &str) -> AdjacencyMap {
    match serde_json::from_str::<Value>(text) {
        Ok(document) => extract_adjacency(&document),
        Err(e) => {
            tracing::debug!(error = %e, "Workflow document is not valid JSON");
            AdjacencyMap::new()
        }
    }
}
