//! Live run counters
//!
//! A [`StatsCollector`] belongs to exactly one run. The scheduler bumps the
//! comparison, swap, and visit counters as it pulls each [`Step`]; producers
//! bump [`Counter::EdgesExplored`] directly since edge checks have no Step of
//! their own. Observers only ever see a [`StatsSnapshot`] copy.

use crate::step::Step;

/// One named counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Comparisons,
    Swaps,
    NodesVisited,
    EdgesExplored,
}

/// Immutable copy of the counters handed to observers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub comparisons: u64,
    pub swaps: u64,
    pub nodes_visited: u64,
    pub edges_explored: u64,
}

/// Mutable counters for a single run
#[derive(Debug, Default)]
pub struct StatsCollector {
    counters: StatsSnapshot,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        self.counters = StatsSnapshot::default();
    }

    pub fn increment(&mut self, counter: Counter) {
        let slot = match counter {
            Counter::Comparisons => &mut self.counters.comparisons,
            Counter::Swaps => &mut self.counters.swaps,
            Counter::NodesVisited => &mut self.counters.nodes_visited,
            Counter::EdgesExplored => &mut self.counters.edges_explored,
        };
        *slot += 1;
    }

    /// Apply the counter implied by a Step kind (Complete bumps nothing)
    pub fn record(&mut self, step: &Step) {
        match step {
            Step::Compare { .. } => self.increment(Counter::Comparisons),
            Step::Mutate { .. } => self.increment(Counter::Swaps),
            Step::Visit { .. } => self.increment(Counter::NodesVisited),
            Step::Complete { .. } => {}
        }
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Target;

    #[test]
    fn test_increment_and_reset() {
        let mut stats = StatsCollector::new();
        stats.increment(Counter::Comparisons);
        stats.increment(Counter::Comparisons);
        stats.increment(Counter::EdgesExplored);

        let snap = stats.snapshot();
        assert_eq!(snap.comparisons, 2);
        assert_eq!(snap.edges_explored, 1);
        assert_eq!(snap.swaps, 0);

        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut stats = StatsCollector::new();
        let before = stats.snapshot();
        stats.increment(Counter::Swaps);
        assert_eq!(before.swaps, 0);
        assert_eq!(stats.snapshot().swaps, 1);
    }

    #[test]
    fn test_record_maps_step_kinds() {
        let mut stats = StatsCollector::new();
        stats.record(&Step::Compare {
            targets: vec![Target::Index(0), Target::Index(1)],
        });
        stats.record(&Step::Visit {
            target: Target::Key(3),
            trail: vec![Target::Key(3)],
        });
        let snap = stats.snapshot();
        assert_eq!(snap.comparisons, 1);
        assert_eq!(snap.nodes_visited, 1);
        assert_eq!(snap.swaps, 0);
    }
}
