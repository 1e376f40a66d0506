//! Undirected weighted multigraph
//!
//! Nodes keep creation order; the first node is the implicit traversal source
//! and the last node the implicit shortest-path target. Ids are assigned from
//! a counter that never goes backwards, so removing a node never lets its id
//! be reused.

use crate::error::GraphError;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::fmt;

/// Stable node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

/// Edge between two nodes; direction is ignored by every algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: u32,
}

impl Edge {
    /// The endpoint opposite `id`, if the edge touches `id`
    pub fn other(&self, id: NodeId) -> Option<NodeId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_id: u32,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            next_id: 1,
        }
    }

    /// The five-node sample: A..E with seven weighted edges
    pub fn sample() -> Self {
        let mut graph = Graph::new();
        let ids: Vec<NodeId> = (0..5).map(|_| graph.add_node()).collect();
        let (a, b, c, d, e) = (ids[0], ids[1], ids[2], ids[3], ids[4]);

        for (from, to, weight) in [
            (a, b, 4),
            (a, d, 2),
            (b, c, 3),
            (b, d, 1),
            (b, e, 5),
            (c, e, 2),
            (d, e, 3),
        ] {
            // Ids come straight from add_node and weights are non-zero
            let _ = graph.add_edge(from, to, weight);
        }
        graph
    }

    /// Add a node labelled by its id (1 → "A", 2 → "B", ...)
    pub fn add_node(&mut self) -> NodeId {
        let label = auto_label(self.next_id);
        self.add_labeled_node(label)
    }

    pub fn add_labeled_node(&mut self, label: impl Into<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node {
            id,
            label: label.into(),
        });
        id
    }

    /// Remove a node and every edge touching it. Returns false if it was absent.
    pub fn remove_node(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|node| node.id != id);
        if self.nodes.len() == before {
            return false;
        }
        self.edges.retain(|edge| edge.from != id && edge.to != id);
        true
    }

    /// Add an edge. Duplicate and self-loop edges are accepted.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: u32) -> Result<(), GraphError> {
        if weight == 0 {
            return Err(GraphError::ZeroWeight);
        }
        for id in [from, to] {
            if !self.contains(id) {
                return Err(GraphError::UnknownNode(id));
            }
        }
        self.edges.push(Edge { from, to, weight });
        Ok(())
    }

    /// Add an edge with a random weight in `1..=9`
    pub fn add_random_edge<R: Rng + ?Sized>(
        &mut self,
        from: NodeId,
        to: NodeId,
        rng: &mut R,
    ) -> Result<u32, GraphError> {
        let weight = rng.gen_range(1..=9);
        self.add_edge(from, to, weight)?;
        Ok(weight)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.label.as_str())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// First inserted node
    pub fn first(&self) -> Option<NodeId> {
        self.nodes.first().map(|node| node.id)
    }

    /// Last inserted node
    pub fn last(&self) -> Option<NodeId> {
        self.nodes.last().map(|node| node.id)
    }

    /// Neighbour lists in edge order, each edge contributing in both directions
    pub fn adjacency(&self) -> FxHashMap<NodeId, Vec<NodeId>> {
        let mut adj: FxHashMap<NodeId, Vec<NodeId>> =
            self.nodes.iter().map(|node| (node.id, Vec::new())).collect();
        for edge in &self.edges {
            if let Some(list) = adj.get_mut(&edge.from) {
                list.push(edge.to);
            }
            if let Some(list) = adj.get_mut(&edge.to) {
                list.push(edge.from);
            }
        }
        adj
    }

    /// Edges touching `id`, in insertion order
    pub fn incident(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.from == id || edge.to == id)
    }
}

fn auto_label(id: u32) -> String {
    // A..Z, then fall back to the numeric id
    match id {
        1..=26 => char::from(b'A' + (id - 1) as u8).to_string(),
        _ => format!("N{}", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_monotonic() {
        let mut graph = Graph::new();
        let a = graph.add_node();
        let b = graph.add_node();
        assert!(graph.remove_node(b));
        let c = graph.add_node();
        assert_eq!(a, NodeId(1));
        assert_eq!(c, NodeId(3));
        assert_eq!(graph.label(c), Some("C"));
    }

    #[test]
    fn test_remove_node_drops_incident_edges() {
        let mut graph = Graph::sample();
        let b = NodeId(2);
        assert!(graph.remove_node(b));
        assert!(graph
            .edges()
            .iter()
            .all(|edge| edge.from != b && edge.to != b));
        assert_eq!(graph.edges().len(), 3);
        assert!(!graph.remove_node(b));
    }

    #[test]
    fn test_add_edge_validation() {
        let mut graph = Graph::new();
        let a = graph.add_node();
        assert_eq!(
            graph.add_edge(a, NodeId(9), 1),
            Err(GraphError::UnknownNode(NodeId(9)))
        );
        assert_eq!(graph.add_edge(a, a, 0), Err(GraphError::ZeroWeight));
        // Duplicates are fine
        let b = graph.add_node();
        assert!(graph.add_edge(a, b, 2).is_ok());
        assert!(graph.add_edge(a, b, 2).is_ok());
        assert_eq!(graph.edges().len(), 2);
    }

    #[test]
    fn test_adjacency_is_undirected() {
        let graph = Graph::sample();
        let adj = graph.adjacency();
        assert_eq!(adj[&NodeId(1)], vec![NodeId(2), NodeId(4)]);
        assert_eq!(adj[&NodeId(5)], vec![NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn test_first_and_last() {
        let graph = Graph::sample();
        assert_eq!(graph.first(), Some(NodeId(1)));
        assert_eq!(graph.last(), Some(NodeId(5)));
        assert_eq!(Graph::new().first(), None);
    }
}
