//! Render model derived from the Step stream
//!
//! Highlighting is never stored on the structures themselves. A [`RunView`]
//! folds delivered Steps into "what is current, what has been seen, what is
//! on the result path", and [`classify`] turns that into a single
//! [`Highlight`] per element.

use crate::stats::StatsSnapshot;
use crate::step::{Outcome, Step, Target};
use crate::structures::Structure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Unvisited,
    Visiting,
    Visited,
    OnPath,
    Selected,
}

#[derive(Debug, Clone, Default)]
pub struct RunView {
    pub structure: Option<Structure>,
    /// Targets of the latest Compare or Mutate
    pub active: Vec<Target>,
    pub current: Option<Target>,
    pub visited: Vec<Target>,
    pub path: Vec<Target>,
    pub selected: Option<Target>,
    pub outcome: Option<Outcome>,
    pub stats: StatsSnapshot,
    pub steps: usize,
}

impl RunView {
    pub fn new(structure: Structure) -> Self {
        RunView {
            structure: Some(structure),
            ..RunView::default()
        }
    }

    /// Clear run-derived state but keep the structure and selection
    pub fn clear_run(&mut self) {
        let structure = self.structure.take();
        let selected = self.selected;
        *self = RunView {
            structure,
            selected,
            ..RunView::default()
        };
    }

    pub fn apply(&mut self, step: &Step, stats: &StatsSnapshot) {
        self.stats = *stats;
        self.steps += 1;
        match step {
            Step::Compare { targets } => {
                self.active = targets.clone();
            }
            Step::Mutate { targets, state } => {
                self.active = targets.clone();
                self.structure = Some(state.clone());
            }
            Step::Visit { target, trail } => {
                self.active.clear();
                self.current = Some(*target);
                self.visited = trail.clone();
            }
            Step::Complete { state, outcome } => {
                self.active.clear();
                self.current = None;
                self.structure = Some(state.clone());
                match outcome {
                    Outcome::Sorted { positions } => {
                        self.visited = positions.iter().map(|&i| Target::Index(i)).collect();
                    }
                    Outcome::Traversed { order } => self.visited = order.clone(),
                    Outcome::Path { nodes, .. } => {
                        self.path = nodes.iter().map(|&id| Target::Node(id)).collect();
                    }
                    Outcome::Found { path, .. } => {
                        self.path = path.iter().map(|&v| Target::Key(v)).collect();
                    }
                    _ => {}
                }
                self.outcome = Some(outcome.clone());
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Highlight for one element, highest priority first:
/// selected, on the result path, current, already visited
pub fn classify(target: Target, view: &RunView) -> Highlight {
    if view.selected == Some(target) {
        Highlight::Selected
    } else if view.path.contains(&target) {
        Highlight::OnPath
    } else if view.current == Some(target) || view.active.contains(&target) {
        Highlight::Visiting
    } else if view.visited.contains(&target) {
        Highlight::Visited
    } else {
        Highlight::Unvisited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::graph::NodeId;

    #[test]
    fn test_compare_marks_visiting() {
        let mut view = RunView::new(Structure::Array(vec![2, 1]));
        view.apply(
            &Step::Compare {
                targets: vec![Target::Index(0), Target::Index(1)],
            },
            &StatsSnapshot::default(),
        );
        assert_eq!(classify(Target::Index(0), &view), Highlight::Visiting);
        assert_eq!(classify(Target::Index(2), &view), Highlight::Unvisited);
    }

    #[test]
    fn test_path_outranks_visited() {
        let a = Target::Node(NodeId(1));
        let b = Target::Node(NodeId(2));
        let c = Target::Node(NodeId(3));
        let mut view = RunView::default();
        view.apply(
            &Step::Visit {
                target: c,
                trail: vec![a, b, c],
            },
            &StatsSnapshot::default(),
        );
        assert_eq!(classify(c, &view), Highlight::Visiting);
        assert_eq!(classify(b, &view), Highlight::Visited);

        view.apply(
            &Step::Complete {
                state: Structure::Array(Vec::new()),
                outcome: Outcome::Path {
                    nodes: vec![NodeId(1), NodeId(3)],
                    distance: Some(4),
                },
            },
            &StatsSnapshot::default(),
        );
        assert_eq!(classify(a, &view), Highlight::OnPath);
        assert_eq!(classify(b, &view), Highlight::Visited);
        assert_eq!(classify(c, &view), Highlight::OnPath);

        view.selected = Some(a);
        assert_eq!(classify(a, &view), Highlight::Selected);
    }

    #[test]
    fn test_sorted_outcome_marks_every_position() {
        let mut view = RunView::default();
        view.apply(
            &Step::Complete {
                state: Structure::Array(vec![1, 2]),
                outcome: Outcome::Sorted {
                    positions: vec![0, 1],
                },
            },
            &StatsSnapshot::default(),
        );
        assert!(view.is_complete());
        assert_eq!(classify(Target::Index(1), &view), Highlight::Visited);
    }

    #[test]
    fn test_clear_run_keeps_structure() {
        let mut view = RunView::new(Structure::Array(vec![1]));
        view.current = Some(Target::Index(0));
        view.steps = 3;
        view.clear_run();
        assert_eq!(view.structure, Some(Structure::Array(vec![1])));
        assert_eq!(view.current, None);
        assert_eq!(view.steps, 0);
    }
}
