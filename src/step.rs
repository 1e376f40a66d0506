//! The event type produced by every algorithm
//!
//! A [`Step`] is one externally observable state change. Each variant carries
//! enough for an observer to re-render without knowing the algorithm: the
//! highlighted positions, and for anything that changed the structure, a full
//! copy of it.

use crate::structures::graph::NodeId;
use crate::structures::Structure;

/// Something a Step points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Position in an array
    Index(usize),
    /// Graph node
    Node(NodeId),
    /// Tree node, identified by its (unique) value
    Key(i64),
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The structure was empty; no work was done
    NothingToDo,
    /// Every listed position is in its final place
    Sorted { positions: Vec<usize> },
    /// Nodes in the order they were visited
    Traversed { order: Vec<Target> },
    /// Shortest path from source to target; empty when unreachable
    Path {
        nodes: Vec<NodeId>,
        distance: Option<u64>,
    },
    Found { value: i64, path: Vec<i64> },
    NotFound { value: i64, path: Vec<i64> },
    Inserted { value: i64 },
    AlreadyPresent { value: i64 },
    Deleted { value: i64 },
    /// The producer ran out without reporting an outcome
    Finished,
}

/// One discrete event emitted by a producer
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Read-only comparison between the targets
    Compare { targets: Vec<Target> },
    /// Swap, overwrite, or structural change; `state` is the structure after it
    Mutate {
        targets: Vec<Target>,
        state: Structure,
    },
    /// `target` became current; `trail` is everything visited so far, in order
    Visit { target: Target, trail: Vec<Target> },
    /// Terminal event
    Complete { state: Structure, outcome: Outcome },
}

impl Step {
    pub fn is_complete(&self) -> bool {
        matches!(self, Step::Complete { .. })
    }

    /// Short lowercase label used in logs and the status bar
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Compare { .. } => "compare",
            Step::Mutate { .. } => "mutate",
            Step::Visit { .. } => "visit",
            Step::Complete { .. } => "complete",
        }
    }
}
