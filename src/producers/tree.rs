//! Binary search tree producers
//!
//! Tree nodes are addressed by value (values are unique), so the producers
//! keep plain values as cursors and re-find nodes in the owned tree on each
//! step instead of holding references into it.

use super::{Algorithm, StepProducer, TraversalOrder};
use crate::stats::StatsCollector;
use crate::step::{Outcome, Step, Target};
use crate::structures::tree::Bst;
use crate::structures::Structure;

fn keys(values: &[i64]) -> Vec<Target> {
    values.iter().map(|&v| Target::Key(v)).collect()
}

fn complete(tree: &Bst, outcome: Outcome) -> Step {
    Step::Complete {
        state: Structure::Tree(tree.clone()),
        outcome,
    }
}

/// Child of `at` on the way to `value`
fn next_toward(tree: &Bst, at: i64, value: i64) -> Option<i64> {
    tree.find(at)
        .and_then(|node| node.child_toward(value))
        .map(|child| child.value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertPhase {
    Descend,
    Attached,
    Duplicate,
    Done,
}

/// Descend comparing against each node, then attach a new leaf
pub struct TreeInsert {
    tree: Bst,
    value: i64,
    cursor: Option<i64>,
    phase: InsertPhase,
}

impl TreeInsert {
    pub fn new(tree: Bst, value: i64) -> Self {
        TreeInsert {
            cursor: tree.root().map(|node| node.value),
            tree,
            value,
            phase: InsertPhase::Descend,
        }
    }
}

impl StepProducer for TreeInsert {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TreeInsert
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        match self.phase {
            InsertPhase::Descend => match self.cursor {
                Some(at) => {
                    if at == self.value {
                        self.phase = InsertPhase::Duplicate;
                    } else {
                        self.cursor = next_toward(&self.tree, at, self.value);
                    }
                    Some(Step::Compare {
                        targets: vec![Target::Key(at)],
                    })
                }
                None => {
                    self.tree.insert(self.value);
                    self.phase = InsertPhase::Attached;
                    Some(Step::Mutate {
                        targets: vec![Target::Key(self.value)],
                        state: Structure::Tree(self.tree.clone()),
                    })
                }
            },
            InsertPhase::Attached => {
                self.phase = InsertPhase::Done;
                Some(complete(&self.tree, Outcome::Inserted { value: self.value }))
            }
            InsertPhase::Duplicate => {
                self.phase = InsertPhase::Done;
                Some(complete(
                    &self.tree,
                    Outcome::AlreadyPresent { value: self.value },
                ))
            }
            InsertPhase::Done => None,
        }
    }

    fn structure(&self) -> Structure {
        Structure::Tree(self.tree.clone())
    }

    fn nothing_to_do(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeletePhase {
    Descend,
    /// Found, with two children: show the successor first
    Successor(i64),
    Remove,
    Removed,
    Done,
}

/// Descend to `value`, then remove it
pub struct TreeDelete {
    tree: Bst,
    value: i64,
    cursor: Option<i64>,
    path: Vec<i64>,
    phase: DeletePhase,
}

impl TreeDelete {
    pub fn new(tree: Bst, value: i64) -> Self {
        TreeDelete {
            cursor: tree.root().map(|node| node.value),
            tree,
            value,
            path: Vec::new(),
            phase: DeletePhase::Descend,
        }
    }
}

impl StepProducer for TreeDelete {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TreeDelete
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        match self.phase {
            DeletePhase::Descend => match self.cursor {
                Some(at) => {
                    self.path.push(at);
                    if at == self.value {
                        let two_children = self
                            .tree
                            .find(at)
                            .is_some_and(|node| node.left.is_some() && node.right.is_some());
                        self.phase = match self.tree.successor_of(at) {
                            Some(successor) if two_children => DeletePhase::Successor(successor),
                            _ => DeletePhase::Remove,
                        };
                    } else {
                        self.cursor = next_toward(&self.tree, at, self.value);
                    }
                    Some(Step::Compare {
                        targets: vec![Target::Key(at)],
                    })
                }
                None => {
                    self.phase = DeletePhase::Done;
                    let outcome = if self.tree.is_empty() {
                        Outcome::NothingToDo
                    } else {
                        Outcome::NotFound {
                            value: self.value,
                            path: self.path.clone(),
                        }
                    };
                    Some(complete(&self.tree, outcome))
                }
            },
            DeletePhase::Successor(successor) => {
                self.phase = DeletePhase::Remove;
                Some(Step::Visit {
                    target: Target::Key(successor),
                    trail: vec![Target::Key(successor)],
                })
            }
            DeletePhase::Remove => {
                self.tree.delete(self.value);
                self.phase = DeletePhase::Removed;
                Some(Step::Mutate {
                    targets: vec![Target::Key(self.value)],
                    state: Structure::Tree(self.tree.clone()),
                })
            }
            DeletePhase::Removed => {
                self.phase = DeletePhase::Done;
                Some(complete(&self.tree, Outcome::Deleted { value: self.value }))
            }
            DeletePhase::Done => None,
        }
    }

    fn structure(&self) -> Structure {
        Structure::Tree(self.tree.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.tree.is_empty()
    }
}

/// Visit each node on the search path
pub struct TreeSearch {
    tree: Bst,
    value: i64,
    cursor: Option<i64>,
    path: Vec<i64>,
    found: bool,
    done: bool,
}

impl TreeSearch {
    pub fn new(tree: Bst, value: i64) -> Self {
        TreeSearch {
            cursor: tree.root().map(|node| node.value),
            tree,
            value,
            path: Vec::new(),
            found: false,
            done: false,
        }
    }
}

impl StepProducer for TreeSearch {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TreeSearch
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }

        match self.cursor.take() {
            Some(at) if !self.found => {
                self.path.push(at);
                if at == self.value {
                    self.found = true;
                } else {
                    self.cursor = next_toward(&self.tree, at, self.value);
                }
                Some(Step::Visit {
                    target: Target::Key(at),
                    trail: keys(&self.path),
                })
            }
            _ => {
                self.done = true;
                let path = self.path.clone();
                let outcome = if self.tree.is_empty() {
                    Outcome::NothingToDo
                } else if self.found {
                    Outcome::Found {
                        value: self.value,
                        path,
                    }
                } else {
                    Outcome::NotFound {
                        value: self.value,
                        path,
                    }
                };
                Some(complete(&self.tree, outcome))
            }
        }
    }

    fn structure(&self) -> Structure {
        Structure::Tree(self.tree.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.tree.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Enter,
    Left,
    Middle,
    Right,
    Exit,
}

#[derive(Clone, Copy)]
struct Frame {
    value: i64,
    stage: Stage,
}

/// Pre-, in-, or post-order walk emitting one Visit per node
pub struct TreeTraversal {
    tree: Bst,
    order: TraversalOrder,
    stack: Vec<Frame>,
    result: Vec<i64>,
    done: bool,
}

impl TreeTraversal {
    pub fn new(tree: Bst, order: TraversalOrder) -> Self {
        let stack = tree
            .root()
            .map(|node| Frame {
                value: node.value,
                stage: Stage::Enter,
            })
            .into_iter()
            .collect();
        TreeTraversal {
            tree,
            order,
            stack,
            result: Vec::new(),
            done: false,
        }
    }

    fn emit(&mut self, value: i64) -> Step {
        self.result.push(value);
        Step::Visit {
            target: Target::Key(value),
            trail: keys(&self.result),
        }
    }
}

impl StepProducer for TreeTraversal {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TreeTraversal
    }

    fn next_step(&mut self, _stats: &mut StatsCollector) -> Option<Step> {
        if self.done {
            return None;
        }

        while let Some(top) = self.stack.len().checked_sub(1) {
            let Frame { value, stage } = self.stack[top];
            let (left, right) = self
                .tree
                .find(value)
                .map(|node| (node.left_value(), node.right_value()))
                .unwrap_or((None, None));

            match stage {
                Stage::Enter => {
                    self.stack[top].stage = Stage::Left;
                    if self.order == TraversalOrder::Pre {
                        return Some(self.emit(value));
                    }
                }
                Stage::Left => {
                    self.stack[top].stage = Stage::Middle;
                    if let Some(child) = left {
                        self.stack.push(Frame {
                            value: child,
                            stage: Stage::Enter,
                        });
                    }
                }
                Stage::Middle => {
                    self.stack[top].stage = Stage::Right;
                    if self.order == TraversalOrder::In {
                        return Some(self.emit(value));
                    }
                }
                Stage::Right => {
                    self.stack[top].stage = Stage::Exit;
                    if let Some(child) = right {
                        self.stack.push(Frame {
                            value: child,
                            stage: Stage::Enter,
                        });
                    }
                }
                Stage::Exit => {
                    self.stack.pop();
                    if self.order == TraversalOrder::Post {
                        return Some(self.emit(value));
                    }
                }
            }
        }

        self.done = true;
        let outcome = if self.tree.is_empty() {
            Outcome::NothingToDo
        } else {
            Outcome::Traversed {
                order: keys(&self.result),
            }
        };
        Some(complete(&self.tree, outcome))
    }

    fn structure(&self) -> Structure {
        Structure::Tree(self.tree.clone())
    }

    fn nothing_to_do(&self) -> bool {
        self.tree.is_empty()
    }
}
