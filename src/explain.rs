//! Algorithm explanations
//!
//! An [`Explainer`] is an opaque text source with two outcomes: markdown, or
//! a failure. [`explanation_or_fallback`] is the boundary that turns any
//! failure into [`FALLBACK`], so explanation problems never reach a run.

use crate::error::ExplainError;
use crate::producers::Algorithm;
use tracing::warn;

/// Shown whenever an explanation cannot be produced
pub const FALLBACK: &str = "Error: Unable to generate explanation. Please try again.";

pub trait Explainer {
    fn explain(&self, algorithm: Algorithm) -> Result<String, ExplainError>;
}

/// Offline explanations bundled with the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinExplainer;

impl Explainer for BuiltinExplainer {
    fn explain(&self, algorithm: Algorithm) -> Result<String, ExplainError> {
        let (summary, complexity) = match algorithm {
            Algorithm::BubbleSort => (
                "Repeatedly walks the array swapping adjacent out-of-order pairs; \
                 after pass k the k largest values are in place.",
                "O(n²) time, O(1) space",
            ),
            Algorithm::SelectionSort => (
                "Finds the minimum of the unsorted suffix and swaps it to the front \
                 of that suffix.",
                "O(n²) time, O(1) space",
            ),
            Algorithm::InsertionSort => (
                "Grows a sorted prefix by sinking each new element left past every \
                 larger neighbour.",
                "O(n²) time, O(n) best case, O(1) space",
            ),
            Algorithm::MergeSort => (
                "Sorts each half recursively, then merges the two sorted halves by \
                 repeatedly taking the smaller head.",
                "O(n log n) time, O(n) space",
            ),
            Algorithm::QuickSort => (
                "Partitions around the last element (Lomuto), placing the pivot in \
                 its final position, then sorts each side.",
                "O(n log n) average, O(n²) worst, O(log n) stack",
            ),
            Algorithm::BreadthFirst => (
                "Visits nodes level by level from the start node using a FIFO queue.",
                "O(V + E) time, O(V) space",
            ),
            Algorithm::DepthFirst => (
                "Follows each branch as deep as possible before backtracking, \
                 marking nodes before descending so cycles terminate.",
                "O(V + E) time, O(V) space",
            ),
            Algorithm::Dijkstra => (
                "Settles nodes in order of tentative distance from the source, \
                 relaxing every edge of each settled node.",
                "O((V + E) log V) with a heap",
            ),
            Algorithm::TreeInsert => (
                "Descends left for smaller values and right for larger ones, \
                 attaching a new leaf where the search falls off the tree.",
                "O(h) time",
            ),
            Algorithm::TreeDelete => (
                "Removes a leaf directly, splices out a single-child node, or \
                 replaces a two-child node with its in-order successor.",
                "O(h) time",
            ),
            Algorithm::TreeSearch => (
                "Follows the ordering invariant from the root until the value is \
                 found or a missing child is reached.",
                "O(h) time",
            ),
            Algorithm::TreeTraversal => (
                "Pre-order visits a node before its subtrees, in-order between \
                 them, post-order after them.",
                "O(n) time, O(h) stack",
            ),
        };
        Ok(format!(
            "### {}\n\n{}\n\n**Complexity:** {}\n",
            algorithm.label(),
            summary,
            complexity
        ))
    }
}

/// Ask `explainer`, substituting [`FALLBACK`] on failure
pub fn explanation_or_fallback(explainer: &dyn Explainer, algorithm: Algorithm) -> String {
    match explainer.explain(algorithm) {
        Ok(text) => text,
        Err(err) => {
            warn!(%algorithm, error = %err, "explanation failed");
            FALLBACK.to_string()
        }
    }
}
