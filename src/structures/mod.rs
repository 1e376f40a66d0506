//! Structure snapshots and the pre-run mutation API
//!
//! - [`array`]: helpers for the numeric sequence sorted in place
//! - [`graph`]: node/edge sets with monotonically assigned ids
//! - [`tree`]: strict binary search tree with owned subtrees
//!
//! A [`Structure`] is moved into a run when it starts; observers only see
//! clones of it carried by Steps.

pub mod array;
pub mod graph;
pub mod tree;

use graph::Graph;
use tree::Bst;

/// Which of the three domains a structure or algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Array,
    Graph,
    Tree,
}

/// A snapshot of one of the three visualized domains
#[derive(Debug, Clone, PartialEq)]
pub enum Structure {
    Array(Vec<i64>),
    Graph(Graph),
    Tree(Bst),
}

impl Structure {
    pub fn domain(&self) -> Domain {
        match self {
            Structure::Array(_) => Domain::Array,
            Structure::Graph(_) => Domain::Graph,
            Structure::Tree(_) => Domain::Tree,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Structure::Array(values) => values.is_empty(),
            Structure::Graph(graph) => graph.is_empty(),
            Structure::Tree(tree) => tree.is_empty(),
        }
    }

    pub fn as_array(&self) -> Option<&[i64]> {
        match self {
            Structure::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_graph(&self) -> Option<&Graph> {
        match self {
            Structure::Graph(graph) => Some(graph),
            _ => None,
        }
    }

    pub fn as_tree(&self) -> Option<&Bst> {
        match self {
            Structure::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Array => write!(f, "array"),
            Domain::Graph => write!(f, "graph"),
            Domain::Tree => write!(f, "tree"),
        }
    }
}
