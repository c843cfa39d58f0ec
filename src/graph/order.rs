//! Execution order derived from the adjacency map

use super::{AdjacencyMap, GraphError, NodeId};
use std::collections::{HashMap, HashSet, VecDeque};

/// Every node mentioned by the map, sources before their targets
fn collect_nodes(adjacency: &AdjacencyMap) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();

    for (source, targets) in adjacency.iter() {
        for node in std::iter::once(source).chain(targets) {
            if seen.insert(node.as_str()) {
                nodes.push(node.as_str());
            }
        }
    }

    nodes
}

/// Order nodes so that every node comes after all of its upstream nodes
///
/// Roots are visited in the order they appear in the map, downstream nodes in
/// edge order once their last upstream node has been visited. Parallel edges
/// count once per occurrence.
pub fn execution_order(adjacency: &AdjacencyMap) -> Result<Vec<NodeId>, GraphError> {
    let nodes = collect_nodes(adjacency);

    let mut in_degree: HashMap<&str, usize> = nodes.iter().map(|n| (*n, 0)).collect();
    for (_, targets) in adjacency.iter() {
        for target in targets {
            *in_degree.entry(target.as_str()).or_default() += 1;
        }
    }

    let mut queue: VecDeque<&str> = nodes
        .iter()
        .copied()
        .filter(|n| in_degree.get(n).copied() == Some(0))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(node) = queue.pop_front() {
        order.push(node.to_string());

        for target in adjacency.targets(node) {
            if let Some(degree) = in_degree.get_mut(target.as_str()) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(target.as_str());
                }
            }
        }
    }

    if order.len() < nodes.len() {
        let visited: HashSet<&str> = order.iter().map(String::as_str).collect();
        let node = nodes
            .iter()
            .find(|n| !visited.contains(*n))
            .map(|n| n.to_string())
            .unwrap_or_default();
        return Err(GraphError::Cycle { node });
    }

    tracing::debug!(nodes = order.len(), "Computed execution order");
    Ok(order)
}
