// Property tests for producers and the scheduler

use algotty::producers::{self, Algorithm, Params, TraversalOrder};
use algotty::scheduler::{Observer, RunState, Scheduler};
use algotty::stats::{StatsCollector, StatsSnapshot};
use algotty::step::{Outcome, Step, Target};
use algotty::structures::array::is_sorted;
use algotty::structures::graph::{Graph, NodeId};
use algotty::structures::tree::Bst;
use algotty::structures::Structure;
use proptest::collection::vec;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Pull every Step straight from the producer
fn drain(algorithm: Algorithm, structure: Structure, params: Params) -> Vec<Step> {
    let mut producer = producers::build(algorithm, structure, params).expect("matching structure");
    let mut stats = StatsCollector::new();
    let mut steps = Vec::new();
    while let Some(step) = producer.next_step(&mut stats) {
        let done = step.is_complete();
        steps.push(step);
        if done {
            break;
        }
    }
    steps
}

fn final_state(steps: &[Step]) -> Structure {
    match steps.last() {
        Some(Step::Complete { state, .. }) => state.clone(),
        other => panic!("Run did not end with Complete: {:?}", other),
    }
}

fn visits(steps: &[Step]) -> Vec<NodeId> {
    steps
        .iter()
        .filter_map(|s| match s {
            Step::Visit {
                target: Target::Node(id),
                ..
            } => Some(*id),
            _ => None,
        })
        .collect()
}

/// Node count plus edges as (from index, to index, weight)
fn arb_graph() -> impl Strategy<Value = Graph> {
    (1usize..8)
        .prop_flat_map(|n| (Just(n), vec((0..n, 0..n, 1u32..10), 0..16)))
        .prop_map(|(n, edges)| {
            let mut graph = Graph::new();
            let ids: Vec<NodeId> = (0..n).map(|_| graph.add_node()).collect();
            for (from, to, weight) in edges {
                graph
                    .add_edge(ids[from], ids[to], weight)
                    .expect("ids and weights are valid");
            }
            graph
        })
}

/// Nodes reachable from `start`, ignoring edge direction
fn reachable(graph: &Graph, start: NodeId) -> BTreeSet<NodeId> {
    let mut seen = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(id) = queue.pop_front() {
        for edge in graph.incident(id) {
            if let Some(next) = edge.other(id) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    seen
}

/// Bellman-Ford over undirected edges
fn shortest_distance(graph: &Graph, from: NodeId, to: NodeId) -> Option<u64> {
    let mut dist: Vec<(NodeId, Option<u64>)> = graph
        .nodes()
        .iter()
        .map(|n| (n.id, (n.id == from).then_some(0)))
        .collect();
    let get = |dist: &[(NodeId, Option<u64>)], id: NodeId| {
        dist.iter().find(|(n, _)| *n == id).and_then(|(_, d)| *d)
    };
    for _ in 0..graph.len() {
        for edge in graph.edges() {
            for (a, b) in [(edge.from, edge.to), (edge.to, edge.from)] {
                if let Some(da) = get(&dist, a) {
                    let candidate = da + edge.weight as u64;
                    if let Some(slot) = dist.iter_mut().find(|(n, _)| *n == b) {
                        if slot.1.map_or(true, |db| candidate < db) {
                            slot.1 = Some(candidate);
                        }
                    }
                }
            }
        }
    }
    get(&dist, to)
}

type Log = Rc<RefCell<Vec<Step>>>;

fn recorder() -> (Log, Box<dyn Observer>) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let observer = move |step: &Step, _: &StatsSnapshot| sink.borrow_mut().push(step.clone());
    (log, Box::new(observer))
}

fn sorting_algorithm() -> impl Strategy<Value = Algorithm> {
    prop::sample::select(Algorithm::SORTING.to_vec())
}

proptest! {
    #[test]
    fn sorts_produce_a_sorted_permutation(
        algorithm in sorting_algorithm(),
        values in vec(5i64..=104, 0..40),
    ) {
        let steps = drain(algorithm, Structure::Array(values.clone()), Params::default());
        let state = final_state(&steps);
        let sorted = state.as_array().expect("array state");
        prop_assert!(is_sorted(sorted));

        let mut expected = values.clone();
        expected.sort();
        prop_assert_eq!(sorted, expected.as_slice());
        prop_assert_eq!(steps.iter().filter(|s| s.is_complete()).count(), 1);
    }

    #[test]
    fn traversals_visit_the_component_once(graph in arb_graph()) {
        let start = graph.first().expect("at least one node");
        let component = reachable(&graph, start);

        for algorithm in [Algorithm::BreadthFirst, Algorithm::DepthFirst] {
            let order = visits(&drain(algorithm, Structure::Graph(graph.clone()), Params::default()));
            let unique: BTreeSet<NodeId> = order.iter().copied().collect();
            prop_assert_eq!(unique.len(), order.len(), "{} visited a node twice", algorithm);
            prop_assert_eq!(&unique, &component);
            prop_assert_eq!(order.first(), Some(&start));
        }
    }

    #[test]
    fn dijkstra_finds_a_shortest_path(graph in arb_graph()) {
        let source = graph.first().expect("at least one node");
        let target = graph.last().expect("at least one node");
        let steps = drain(Algorithm::Dijkstra, Structure::Graph(graph.clone()), Params::default());

        let Some(Step::Complete { outcome: Outcome::Path { nodes, distance }, .. }) = steps.last() else {
            panic!("Dijkstra must end with a path outcome");
        };
        prop_assert_eq!(*distance, shortest_distance(&graph, source, target));

        if let Some(distance) = distance {
            prop_assert_eq!(nodes.first(), Some(&source));
            prop_assert_eq!(nodes.last(), Some(&target));
            let cost: u64 = nodes
                .windows(2)
                .map(|pair| {
                    graph
                        .edges()
                        .iter()
                        .filter(|e| e.other(pair[0]) == Some(pair[1]))
                        .map(|e| e.weight as u64)
                        .min()
                        .expect("consecutive path nodes share an edge")
                })
                .sum();
            prop_assert_eq!(cost, *distance);
        } else {
            prop_assert!(nodes.is_empty());
        }
    }

    #[test]
    fn bst_stays_ordered_under_inserts_and_deletes(
        ops in vec((any::<bool>(), 0i64..50), 0..40),
    ) {
        let mut tree = Bst::new();
        let mut model = BTreeSet::new();
        for (insert, value) in ops {
            let algorithm = if insert { Algorithm::TreeInsert } else { Algorithm::TreeDelete };
            let steps = drain(algorithm, Structure::Tree(tree), Params::with_value(value));
            tree = match final_state(&steps) {
                Structure::Tree(tree) => tree,
                other => panic!("Expected a tree, got {:?}", other),
            };
            if insert {
                model.insert(value);
            } else {
                model.remove(&value);
            }
            prop_assert!(tree.is_ordered());
        }
        prop_assert_eq!(tree.walk(TraversalOrder::In), model.into_iter().collect::<Vec<_>>());
    }

    #[test]
    fn bst_insert_is_idempotent(
        values in vec(0i64..100, 0..20),
        extra in 0i64..100,
    ) {
        let tree = Bst::from_values(values);
        let once = final_state(&drain(Algorithm::TreeInsert, Structure::Tree(tree), Params::with_value(extra)));
        let twice = final_state(&drain(Algorithm::TreeInsert, once.clone(), Params::with_value(extra)));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn pause_and_resume_do_not_change_the_steps(
        values in vec(5i64..=104, 1..20),
        pauses in vec(0usize..200, 0..10),
    ) {
        let t0 = Instant::now();
        let speed = Duration::from_millis(5);

        let (straight, observer) = recorder();
        let mut scheduler = Scheduler::new();
        let producer = producers::build(Algorithm::QuickSort, Structure::Array(values.clone()), Params::default())
            .expect("array");
        scheduler.start(producer, observer, speed, t0).expect("idle scheduler");
        let mut now = t0;
        while scheduler.state() == RunState::Running {
            scheduler.tick(now);
            now += speed;
        }

        let (paused, observer) = recorder();
        let mut scheduler = Scheduler::new();
        let producer = producers::build(Algorithm::QuickSort, Structure::Array(values), Params::default())
            .expect("array");
        scheduler.start(producer, observer, speed, t0).expect("idle scheduler");
        let mut now = t0;
        let mut tick = 0;
        while scheduler.state() == RunState::Running {
            if pauses.contains(&tick) {
                scheduler.pause(now);
                // A long hold delivers nothing
                scheduler.tick(now + Duration::from_secs(5));
                now += Duration::from_secs(10);
                scheduler.resume(now);
            }
            scheduler.tick(now);
            now += Duration::from_millis(2);
            tick += 1;
        }

        prop_assert_eq!(straight.borrow().clone(), paused.borrow().clone());
    }

    #[test]
    fn stop_ends_delivery(
        values in vec(5i64..=104, 2..30),
        after in 0usize..10,
    ) {
        let (log, observer) = recorder();
        let mut scheduler = Scheduler::new();
        let producer = producers::build(Algorithm::BubbleSort, Structure::Array(values), Params::default())
            .expect("array");
        let t0 = Instant::now();
        scheduler.start(producer, observer, Duration::ZERO, t0).expect("idle scheduler");
        for _ in 0..after {
            scheduler.tick(t0);
        }
        let delivered = log.borrow().len();
        prop_assert!(scheduler.stop().is_some() || scheduler.state() == RunState::Completed);
        for _ in 0..5 {
            scheduler.tick(t0);
        }
        prop_assert_eq!(log.borrow().len(), delivered);
    }
}
