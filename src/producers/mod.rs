//! Algorithm step-producers
//!
//! Each producer owns the structure it works on and advances one [`Step`] per
//! call to [`StepProducer::next_step`]. Stable Rust has no generators, so
//! every recursive algorithm keeps its own explicit work stack (pending
//! subranges, DFS frames, traversal frames) between calls. A producer can sit
//! between any two Steps indefinitely without losing state.
//!
//! - [`sorting`]: bubble, selection, insertion, merge, and quick sort
//! - [`graph`]: breadth-first search, depth-first search, Dijkstra
//! - [`tree`]: BST insert, delete, search, and ordered traversal
//!
//! The set is closed: [`build`] maps an [`Algorithm`] to its producer.

pub mod graph;
pub mod sorting;
pub mod tree;

use crate::error::RunError;
use crate::stats::StatsCollector;
use crate::step::Step;
use crate::structures::{Domain, Structure};
use std::fmt;

pub use crate::structures::tree::TraversalOrder;

/// A suspendable algorithm
pub trait StepProducer {
    fn algorithm(&self) -> Algorithm;

    /// Advance to the next Step. `None` once the sequence is exhausted.
    ///
    /// Producers bump [`crate::stats::Counter::EdgesExplored`] here; the
    /// counters implied by the Step kind are applied by the caller.
    fn next_step(&mut self, stats: &mut StatsCollector) -> Option<Step>;

    /// Current state of the owned structure
    fn structure(&self) -> Structure;

    /// True when the structure gave the algorithm nothing to work on
    fn nothing_to_do(&self) -> bool;
}

/// The closed set of algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    BubbleSort,
    SelectionSort,
    InsertionSort,
    MergeSort,
    QuickSort,
    BreadthFirst,
    DepthFirst,
    Dijkstra,
    TreeInsert,
    TreeDelete,
    TreeSearch,
    TreeTraversal,
}

impl Algorithm {
    pub const SORTING: [Algorithm; 5] = [
        Algorithm::BubbleSort,
        Algorithm::SelectionSort,
        Algorithm::InsertionSort,
        Algorithm::MergeSort,
        Algorithm::QuickSort,
    ];

    pub const GRAPH: [Algorithm; 3] = [
        Algorithm::BreadthFirst,
        Algorithm::DepthFirst,
        Algorithm::Dijkstra,
    ];

    pub const TREE: [Algorithm; 4] = [
        Algorithm::TreeInsert,
        Algorithm::TreeDelete,
        Algorithm::TreeSearch,
        Algorithm::TreeTraversal,
    ];

    /// The structure kind this algorithm runs on
    pub fn domain(self) -> Domain {
        match self {
            Algorithm::BubbleSort
            | Algorithm::SelectionSort
            | Algorithm::InsertionSort
            | Algorithm::MergeSort
            | Algorithm::QuickSort => Domain::Array,
            Algorithm::BreadthFirst | Algorithm::DepthFirst | Algorithm::Dijkstra => Domain::Graph,
            Algorithm::TreeInsert
            | Algorithm::TreeDelete
            | Algorithm::TreeSearch
            | Algorithm::TreeTraversal => Domain::Tree,
        }
    }

    /// Whether [`Params::value`] must be set
    pub fn needs_value(self) -> bool {
        matches!(
            self,
            Algorithm::TreeInsert | Algorithm::TreeDelete | Algorithm::TreeSearch
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::BubbleSort => "Bubble Sort",
            Algorithm::SelectionSort => "Selection Sort",
            Algorithm::InsertionSort => "Insertion Sort",
            Algorithm::MergeSort => "Merge Sort",
            Algorithm::QuickSort => "Quick Sort",
            Algorithm::BreadthFirst => "Breadth-First Search",
            Algorithm::DepthFirst => "Depth-First Search",
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::TreeInsert => "BST Insert",
            Algorithm::TreeDelete => "BST Delete",
            Algorithm::TreeSearch => "BST Search",
            Algorithm::TreeTraversal => "BST Traversal",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-run parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Params {
    /// Value to insert, delete, or search for
    pub value: Option<i64>,
    pub order: TraversalOrder,
}

impl Params {
    pub fn with_value(value: i64) -> Self {
        Params {
            value: Some(value),
            ..Params::default()
        }
    }

    pub fn with_order(order: TraversalOrder) -> Self {
        Params {
            order,
            ..Params::default()
        }
    }
}

/// Select and construct the producer for `algorithm`
pub fn build(
    algorithm: Algorithm,
    structure: Structure,
    params: Params,
) -> Result<Box<dyn StepProducer>, RunError> {
    let mismatch = |got: Domain| RunError::StructureMismatch {
        algorithm,
        expected: algorithm.domain(),
        got,
    };
    let value = || {
        params
            .value
            .ok_or(RunError::MissingValue { algorithm })
    };

    let producer: Box<dyn StepProducer> = match (algorithm, structure) {
        (Algorithm::BubbleSort, Structure::Array(values)) => {
            Box::new(sorting::BubbleSort::new(values))
        }
        (Algorithm::SelectionSort, Structure::Array(values)) => {
            Box::new(sorting::SelectionSort::new(values))
        }
        (Algorithm::InsertionSort, Structure::Array(values)) => {
            Box::new(sorting::InsertionSort::new(values))
        }
        (Algorithm::MergeSort, Structure::Array(values)) => {
            Box::new(sorting::MergeSort::new(values))
        }
        (Algorithm::QuickSort, Structure::Array(values)) => {
            Box::new(sorting::QuickSort::new(values))
        }
        (Algorithm::BreadthFirst, Structure::Graph(g)) => Box::new(graph::BreadthFirst::new(g)),
        (Algorithm::DepthFirst, Structure::Graph(g)) => Box::new(graph::DepthFirst::new(g)),
        (Algorithm::Dijkstra, Structure::Graph(g)) => Box::new(graph::Dijkstra::new(g)),
        (Algorithm::TreeInsert, Structure::Tree(t)) => Box::new(tree::TreeInsert::new(t, value()?)),
        (Algorithm::TreeDelete, Structure::Tree(t)) => Box::new(tree::TreeDelete::new(t, value()?)),
        (Algorithm::TreeSearch, Structure::Tree(t)) => Box::new(tree::TreeSearch::new(t, value()?)),
        (Algorithm::TreeTraversal, Structure::Tree(t)) => {
            Box::new(tree::TreeTraversal::new(t, params.order))
        }
        (_, other) => return Err(mismatch(other.domain())),
    };
    Ok(producer)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::stats::StatsSnapshot;

    /// Drain a producer, applying stats the way the scheduler does
    pub fn drain(producer: &mut dyn StepProducer) -> (Vec<Step>, StatsSnapshot) {
        let mut stats = StatsCollector::new();
        let mut steps = Vec::new();
        while let Some(step) = producer.next_step(&mut stats) {
            stats.record(&step);
            let done = step.is_complete();
            steps.push(step);
            if done {
                break;
            }
        }
        (steps, stats.snapshot())
    }
}
