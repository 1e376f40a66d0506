// Integration tests for runs driven through the controller

use algotty::controller::{Launch, RunController};
use algotty::error::RunError;
use algotty::producers::{Algorithm, Params, TraversalOrder};
use algotty::scheduler::RunState;
use algotty::stats::StatsSnapshot;
use algotty::step::{Outcome, Step, Target};
use algotty::structures::graph::{Graph, NodeId};
use algotty::structures::tree::Bst;
use algotty::structures::Structure;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

type Log = Rc<RefCell<Vec<Step>>>;

/// Start `algorithm` with a recording observer
fn start(
    controller: &mut RunController,
    algorithm: Algorithm,
    structure: Structure,
    params: Params,
) -> (Log, Result<Launch, RunError>) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let launch = controller.run(
        algorithm,
        structure,
        params,
        move |step: &Step, _: &StatsSnapshot| sink.borrow_mut().push(step.clone()),
        Instant::now(),
    );
    (log, launch)
}

/// Run to completion with no pacing delay
fn run_to_end(algorithm: Algorithm, structure: Structure, params: Params) -> (Vec<Step>, StatsSnapshot) {
    let mut controller = RunController::new(Duration::ZERO);
    let (log, launch) = start(&mut controller, algorithm, structure, params);
    assert!(launch.is_ok(), "Launch failed: {:?}", launch);
    assert_eq!(controller.finish_blocking(), RunState::Completed);
    let steps = log.borrow().clone();
    (steps, controller.stats())
}

fn complete(steps: &[Step]) -> (&Structure, &Outcome) {
    match steps.last() {
        Some(Step::Complete { state, outcome }) => (state, outcome),
        other => panic!("Run did not end with Complete: {:?}", other),
    }
}

#[test]
fn test_quick_sort_scenario() {
    let (steps, stats) = run_to_end(
        Algorithm::QuickSort,
        Structure::Array(vec![5, 1, 4, 2, 8]),
        Params::default(),
    );

    let (state, outcome) = complete(&steps);
    assert_eq!(state, &Structure::Array(vec![1, 2, 4, 5, 8]));
    assert_eq!(
        outcome,
        &Outcome::Sorted {
            positions: vec![0, 1, 2, 3, 4]
        }
    );
    assert_eq!(stats.swaps, 4);
    // Exactly one Complete, at the end
    assert_eq!(steps.iter().filter(|s| s.is_complete()).count(), 1);
}

#[test]
fn test_every_sort_on_a_reversed_array() {
    let input: Vec<i64> = (1..=25).rev().collect();
    for algorithm in Algorithm::SORTING {
        let (steps, stats) = run_to_end(algorithm, Structure::Array(input.clone()), Params::default());
        let (state, _) = complete(&steps);
        assert_eq!(
            state,
            &Structure::Array((1..=25).collect()),
            "{} left the array unsorted",
            algorithm
        );
        assert!(stats.comparisons > 0);
        assert!(stats.swaps > 0);
    }
}

#[test]
fn test_dijkstra_on_sample_graph() {
    let (steps, _) = run_to_end(Algorithm::Dijkstra, Structure::Graph(Graph::sample()), Params::default());

    let (_, outcome) = complete(&steps);
    let Outcome::Path { nodes, distance } = outcome else {
        panic!("Expected a path, got {:?}", outcome);
    };
    assert_eq!(nodes.first(), Some(&NodeId(1)));
    assert_eq!(nodes.last(), Some(&NodeId(5)));
    // A → D → E
    assert_eq!(*distance, Some(5));

    // Reported distance equals the sum of the path's edge weights
    let graph = Graph::sample();
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
    assert_eq!(Some(cost), *distance);
}

#[test]
fn test_bfs_visits_each_reachable_node_once() {
    let (steps, stats) = run_to_end(
        Algorithm::BreadthFirst,
        Structure::Graph(Graph::sample()),
        Params::default(),
    );
    let visits: Vec<Target> = steps
        .iter()
        .filter_map(|s| match s {
            Step::Visit { target, .. } => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(
        visits,
        [1, 2, 4, 3, 5].map(|id| Target::Node(NodeId(id))).to_vec()
    );
    assert_eq!(stats.nodes_visited, 5);
}

#[test]
fn test_bst_delete_two_children() {
    let (steps, _) = run_to_end(
        Algorithm::TreeDelete,
        Structure::Tree(Bst::sample()),
        Params::with_value(30),
    );

    // The successor is shown before the structural change
    let successor = steps
        .iter()
        .position(|s| {
            matches!(
                s,
                Step::Visit {
                    target: Target::Key(35),
                    ..
                }
            )
        })
        .expect("successor visit");
    let mutate = steps
        .iter()
        .position(|s| matches!(s, Step::Mutate { .. }))
        .expect("structural mutate");
    assert!(successor < mutate);

    let (state, outcome) = complete(&steps);
    assert_eq!(outcome, &Outcome::Deleted { value: 30 });
    let tree = state.as_tree().expect("tree state");
    assert_eq!(tree.root().and_then(|r| r.left_value()), Some(35));
    assert_eq!(
        tree.walk(TraversalOrder::In),
        vec![10, 20, 25, 35, 40, 45, 50, 60, 70, 80]
    );
}

#[test]
fn test_bst_insert_search_and_duplicate() {
    let (steps, _) = run_to_end(
        Algorithm::TreeInsert,
        Structure::Tree(Bst::sample()),
        Params::with_value(55),
    );
    let (state, outcome) = complete(&steps);
    assert_eq!(outcome, &Outcome::Inserted { value: 55 });

    let (steps, _) = run_to_end(Algorithm::TreeSearch, state.clone(), Params::with_value(55));
    let (_, outcome) = complete(&steps);
    assert_eq!(
        outcome,
        &Outcome::Found {
            value: 55,
            path: vec![50, 70, 60, 55]
        }
    );

    let (steps, stats) = run_to_end(Algorithm::TreeInsert, state.clone(), Params::with_value(55));
    let (again, outcome) = complete(&steps);
    assert_eq!(outcome, &Outcome::AlreadyPresent { value: 55 });
    assert_eq!(again, state);
    assert_eq!(stats.swaps, 0);
}

#[test]
fn test_empty_structures_are_nothing_to_do() {
    let cases = [
        (Algorithm::MergeSort, Structure::Array(Vec::new()), Params::default()),
        (Algorithm::DepthFirst, Structure::Graph(Graph::new()), Params::default()),
        (Algorithm::TreeSearch, Structure::Tree(Bst::new()), Params::with_value(1)),
    ];
    for (algorithm, structure, params) in cases {
        let mut controller = RunController::new(Duration::ZERO);
        let (log, launch) = start(&mut controller, algorithm, structure, params);
        assert_eq!(launch, Ok(Launch::NothingToDo));
        assert_eq!(controller.finish_blocking(), RunState::Completed);
        let steps = log.borrow();
        assert_eq!(steps.len(), 1);
        assert_eq!(complete(&steps).1, &Outcome::NothingToDo);
    }
}

#[test]
fn test_second_run_is_rejected_while_busy() {
    let mut controller = RunController::new(Duration::from_millis(100));
    let (_, first) = start(
        &mut controller,
        Algorithm::BubbleSort,
        Structure::Array(vec![3, 2, 1]),
        Params::default(),
    );
    assert_eq!(first, Ok(Launch::Started));

    let (log, second) = start(
        &mut controller,
        Algorithm::QuickSort,
        Structure::Array(vec![3, 2, 1]),
        Params::default(),
    );
    assert_eq!(second, Err(RunError::Busy));
    assert!(log.borrow().is_empty());
    assert_eq!(controller.state(), RunState::Running);
}

#[test]
fn test_wrong_structure_is_rejected() {
    let mut controller = RunController::new(Duration::ZERO);
    let (_, launch) = start(
        &mut controller,
        Algorithm::BubbleSort,
        Structure::Graph(Graph::sample()),
        Params::default(),
    );
    assert!(matches!(launch, Err(RunError::StructureMismatch { .. })));
    assert_eq!(controller.state(), RunState::Idle);
}

#[test]
fn test_reset_keeps_partial_progress() {
    let mut controller = RunController::new(Duration::ZERO);
    let (log, _) = start(
        &mut controller,
        Algorithm::BubbleSort,
        Structure::Array(vec![4, 3, 2, 1]),
        Params::default(),
    );
    let now = Instant::now();
    // Compare, then the first swap
    controller.tick(now);
    controller.tick(now);

    let partial = controller.reset();
    assert_eq!(partial, Some(Structure::Array(vec![3, 4, 2, 1])));
    assert_eq!(controller.state(), RunState::Idle);

    let delivered = log.borrow().len();
    controller.tick(now);
    assert_eq!(log.borrow().len(), delivered);
}

#[test]
fn test_pause_holds_delivery() {
    let speed = Duration::from_millis(50);
    let mut controller = RunController::new(speed);
    let (log, _) = start(
        &mut controller,
        Algorithm::InsertionSort,
        Structure::Array(vec![2, 1]),
        Params::default(),
    );
    let t0 = Instant::now();
    controller.tick(t0);
    assert_eq!(log.borrow().len(), 1);

    assert_eq!(controller.toggle(t0 + Duration::from_millis(20)), RunState::Paused);
    controller.tick(t0 + Duration::from_secs(60));
    assert_eq!(log.borrow().len(), 1);

    // 30ms of the delay were left when paused
    let resumed = t0 + Duration::from_secs(61);
    assert_eq!(controller.toggle(resumed), RunState::Running);
    controller.tick(resumed + Duration::from_millis(29));
    assert_eq!(log.borrow().len(), 1);
    controller.tick(resumed + Duration::from_millis(30));
    assert_eq!(log.borrow().len(), 2);
}
