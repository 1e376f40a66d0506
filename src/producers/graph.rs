//! Graph traversal and shortest-path producers
//!
//! All three start from the first inserted node and treat edges as
//! undirected. Each adjacency check bumps the edges-explored counter; only
//! node visits surface as Steps.

use super::{Algorithm, StepProducer};
use crate::stats::{Counter, StatsCollector};
use crate::step::{Outcome, Step, Target};
use crate::structures::graph::{Graph, NodeId};
use crate::structures::Structure;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

fn visit(id: NodeId, order: &[NodeId]) -> Step {
    Step::Visit {
        target: Target::Node(id),
        trail: order.iter().map(|&n| Target::Node(n)).collect(),
    }
}

fn complete(graph: &Graph, outcome: Outcome) -> Step {
    Step::Complete {
        state: Structure::Graph(graph.clone()),
        outcome,
    }
}

fn traversed(order: &[NodeId]) -> Outcome {
    Outcome::Traversed {
        order: order.iter().map(|&n| Target::Node(n)).collect(),
    }
}

/// Breadth-first search with a FIFO frontier
pub struct BreadthFirst {
    graph: Graph,
    adjacency: FxHashMap<NodeId, Vec<NodeId>>,
    frontier: VecDeque<NodeId>,
    seen: FxHashSet<NodeId>,
    order: Vec<NodeId>,
    done: bool,
}

impl BreadthFirst {
    pub fn new(graph: Graph) -> Self {
        let adjacency = graph.adjacency();
        let mut frontier = VecDeque::new();
        let mut seen = FxHashSet::default();
        if let Some(start) = graph.first() {
            frontier.push_back(start);
            seen.insert(start);
        }
        BreadthFirst {
            graph,
            adjacency,
            frontier,
            seen,
            order: Vec::new(),
            done: false,
        }
    }
}

impl StepProducer for BreadthFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BreadthFirst
    }

    fn next_step(&mut self, stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }

        let Some(current) = self.frontier.pop_front() else {
            self.done = true;
            let outcome = if self.graph.is_empty() {
                Outcome::NothingToDo
            } else {
                traversed(&self.order)
            };
            return Some(complete(&self.graph, outcome));
        };

        self.order.push(current);
        for &neighbor in self.adjacency.get(&current).into_iter().flatten() {
            stats.increment(Counter::EdgesExplored);
            if self.seen.insert(neighbor) {
                self.frontier.push_back(neighbor);
            }
        }
        Some(visit(current, &self.order))
    }

    fn structure(&self) -> Structure {
        Structure::Graph(self.graph.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.graph.is_empty()
    }
}

/// One level of the DFS recursion: a node and how far through its neighbours
struct Frame {
    node: NodeId,
    cursor: usize,
}

/// Depth-first search, marking nodes visited before descending
pub struct DepthFirst {
    graph: Graph,
    adjacency: FxHashMap<NodeId, Vec<NodeId>>,
    stack: Vec<Frame>,
    seen: FxHashSet<NodeId>,
    order: Vec<NodeId>,
    started: bool,
    done: bool,
}

impl DepthFirst {
    pub fn new(graph: Graph) -> Self {
        let adjacency = graph.adjacency();
        DepthFirst {
            graph,
            adjacency,
            stack: Vec::new(),
            seen: FxHashSet::default(),
            order: Vec::new(),
            started: false,
            done: false,
        }
    }

    fn enter(&mut self, node: NodeId) -> Step {
        self.seen.insert(node);
        self.order.push(node);
        self.stack.push(Frame { node, cursor: 0 });
        visit(node, &self.order)
    }
}

impl StepProducer for DepthFirst {
    fn algorithm(&self) -> Algorithm {
        Algorithm::DepthFirst
    }

    fn next_step(&mut self, stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            if let Some(start) = self.graph.first() {
                return Some(self.enter(start));
            }
        }

        while let Some(frame) = self.stack.last_mut() {
            let next = self
                .adjacency
                .get(&frame.node)
                .and_then(|list| list.get(frame.cursor))
                .copied();
            match next {
                Some(neighbor) => {
                    frame.cursor += 1;
                    stats.increment(Counter::EdgesExplored);
                    if !self.seen.contains(&neighbor) {
                        return Some(self.enter(neighbor));
                    }
                }
                None => {
                    self.stack.pop();
                }
            }
        }

        self.done = true;
        let outcome = if self.graph.is_empty() {
            Outcome::NothingToDo
        } else {
            traversed(&self.order)
        };
        Some(complete(&self.graph, outcome))
    }

    fn structure(&self) -> Structure {
        Structure::Graph(self.graph.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.graph.is_empty()
    }
}

/// Dijkstra from the first inserted node to the last inserted node.
///
/// The frontier is a plain list re-sorted before every extraction; a node may
/// appear in it more than once and stale entries are skipped.
pub struct Dijkstra {
    graph: Graph,
    target: Option<NodeId>,
    dist: FxHashMap<NodeId, u64>,
    parent: FxHashMap<NodeId, NodeId>,
    settled: FxHashSet<NodeId>,
    frontier: Vec<(NodeId, u64)>,
    order: Vec<NodeId>,
    pending: Option<Outcome>,
    done: bool,
}

impl Dijkstra {
    pub fn new(graph: Graph) -> Self {
        let mut dist = FxHashMap::default();
        let mut frontier = Vec::new();
        if let Some(source) = graph.first() {
            dist.insert(source, 0);
            frontier.push((source, 0));
        }
        Dijkstra {
            target: graph.last(),
            graph,
            dist,
            parent: FxHashMap::default(),
            settled: FxHashSet::default(),
            frontier,
            order: Vec::new(),
            pending: None,
            done: false,
        }
    }

    fn path_to(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut node = target;
        while let Some(&prev) = self.parent.get(&node) {
            path.push(prev);
            node = prev;
        }
        path.reverse();
        path
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.done = true;
        complete(&self.graph, outcome)
    }
}

impl StepProducer for Dijkstra {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Dijkstra
    }

    fn next_step(&mut self, stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }
        if let Some(outcome) = self.pending.take() {
            return Some(self.finish(outcome));
        }
        if self.graph.is_empty() {
            return Some(self.finish(Outcome::NothingToDo));
        }

        loop {
            if self.frontier.is_empty() {
                let unreachable = Outcome::Path {
                    nodes: Vec::new(),
                    distance: None,
                };
                return Some(self.finish(unreachable));
            }

            self.frontier.sort_by_key(|&(_, distance)| distance);
            let (current, _) = self.frontier.remove(0);
            if !self.settled.insert(current) {
                continue;
            }
            self.order.push(current);

            if Some(current) == self.target {
                self.pending = Some(Outcome::Path {
                    nodes: self.path_to(current),
                    distance: self.dist.get(&current).copied(),
                });
                return Some(visit(current, &self.order));
            }

            let base = self.dist.get(&current).copied().unwrap_or(u64::MAX);
            for edge in self.graph.incident(current) {
                stats.increment(Counter::EdgesExplored);
                let Some(neighbor) = edge.other(current) else {
                    continue;
                };
                let candidate = base.saturating_add(u64::from(edge.weight));
                let known = self.dist.get(&neighbor).copied().unwrap_or(u64::MAX);
                if candidate < known {
                    self.dist.insert(neighbor, candidate);
                    self.parent.insert(neighbor, current);
                    self.frontier.push((neighbor, candidate));
                }
            }
            return Some(visit(current, &self.order));
        }
    }

    fn structure(&self) -> Structure {
        Structure::Graph(self.graph.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.graph.is_empty()
    }
}
