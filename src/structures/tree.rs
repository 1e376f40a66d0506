//! Binary search tree
//!
//! Every node exclusively owns its subtrees. Values are unique: everything in
//! a node's left subtree is strictly less and everything in its right subtree
//! strictly greater, so a value doubles as a node's identity.

use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub value: i64,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn leaf(value: i64) -> Self {
        TreeNode {
            value,
            left: None,
            right: None,
        }
    }

    pub fn left_value(&self) -> Option<i64> {
        self.left.as_ref().map(|node| node.value)
    }

    pub fn right_value(&self) -> Option<i64> {
        self.right.as_ref().map(|node| node.value)
    }

    /// Child to descend into when looking for `value`
    pub fn child_toward(&self, value: i64) -> Option<&TreeNode> {
        if value < self.value {
            self.left.as_deref()
        } else {
            self.right.as_deref()
        }
    }
}

/// Node count, height and leaf count of a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeMetrics {
    pub nodes: usize,
    pub height: usize,
    pub leaves: usize,
}

/// Traversal order for [`Bst::walk`] and the traversal producer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalOrder {
    Pre,
    #[default]
    In,
    Post,
}

impl TraversalOrder {
    pub fn label(self) -> &'static str {
        match self {
            TraversalOrder::Pre => "pre-order",
            TraversalOrder::In => "in-order",
            TraversalOrder::Post => "post-order",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bst {
    root: Option<Box<TreeNode>>,
}

impl Bst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut tree = Bst::new();
        for value in values {
            tree.insert(value);
        }
        tree
    }

    pub fn sample() -> Self {
        Bst::from_values([50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45])
    }

    /// 5 to 10 distinct values in `10..=99`
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let count = rng.gen_range(5..=10);
        let mut values: Vec<i64> = Vec::with_capacity(count);
        while values.len() < count {
            let value = rng.gen_range(10..=99);
            if !values.contains(&value) {
                values.push(value);
            }
        }
        Bst::from_values(values)
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert `value`; returns false if it was already present
    pub fn insert(&mut self, value: i64) -> bool {
        attach(&mut self.root, value)
    }

    /// Remove `value`; returns false if it was not present.
    ///
    /// A node with two children takes the value of its in-order successor,
    /// which is then removed from the right subtree.
    pub fn delete(&mut self, value: i64) -> bool {
        remove(&mut self.root, value)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).is_some()
    }

    pub fn find(&self, value: i64) -> Option<&TreeNode> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.value == value {
                return Some(node);
            }
            current = node.child_toward(value);
        }
        None
    }

    /// Minimum of the right subtree of `value`'s node
    pub fn successor_of(&self, value: i64) -> Option<i64> {
        let mut node = self.find(value)?.right.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(node.value)
    }

    /// Values in the given order
    pub fn walk(&self, order: TraversalOrder) -> Vec<i64> {
        let mut out = Vec::new();
        walk_into(self.root.as_deref(), order, &mut out);
        out
    }

    pub fn metrics(&self) -> TreeMetrics {
        fn measure(node: Option<&TreeNode>) -> TreeMetrics {
            match node {
                None => TreeMetrics::default(),
                Some(node) => {
                    let left = measure(node.left.as_deref());
                    let right = measure(node.right.as_deref());
                    TreeMetrics {
                        nodes: 1 + left.nodes + right.nodes,
                        height: 1 + left.height.max(right.height),
                        leaves: if node.left.is_none() && node.right.is_none() {
                            1
                        } else {
                            left.leaves + right.leaves
                        },
                    }
                }
            }
        }
        measure(self.root.as_deref())
    }

    /// Check the strict ordering invariant over the whole tree
    pub fn is_ordered(&self) -> bool {
        fn check(node: Option<&TreeNode>, low: Option<i64>, high: Option<i64>) -> bool {
            match node {
                None => true,
                Some(node) => {
                    low.map_or(true, |low| node.value > low)
                        && high.map_or(true, |high| node.value < high)
                        && check(node.left.as_deref(), low, Some(node.value))
                        && check(node.right.as_deref(), Some(node.value), high)
                }
            }
        }
        check(self.root.as_deref(), None, None)
    }
}

fn attach(slot: &mut Option<Box<TreeNode>>, value: i64) -> bool {
    match slot {
        None => {
            *slot = Some(Box::new(TreeNode::leaf(value)));
            true
        }
        Some(node) if value < node.value => attach(&mut node.left, value),
        Some(node) if value > node.value => attach(&mut node.right, value),
        Some(_) => false,
    }
}

fn remove(slot: &mut Option<Box<TreeNode>>, value: i64) -> bool {
    let Some(node) = slot else {
        return false;
    };

    if value < node.value {
        return remove(&mut node.left, value);
    }
    if value > node.value {
        return remove(&mut node.right, value);
    }

    match (node.left.take(), node.right.take()) {
        (None, None) => *slot = None,
        (Some(child), None) | (None, Some(child)) => *slot = Some(child),
        (Some(left), Some(right)) => {
            node.left = Some(left);
            node.right = Some(right);
            let mut successor = node.right.as_deref();
            let mut min = node.value;
            while let Some(candidate) = successor {
                min = candidate.value;
                successor = candidate.left.as_deref();
            }
            node.value = min;
            remove(&mut node.right, min);
        }
    }
    true
}

fn walk_into(node: Option<&TreeNode>, order: TraversalOrder, out: &mut Vec<i64>) {
    let Some(node) = node else {
        return;
    };
    if order == TraversalOrder::Pre {
        out.push(node.value);
    }
    walk_into(node.left.as_deref(), order, out);
    if order == TraversalOrder::In {
        out.push(node.value);
    }
    walk_into(node.right.as_deref(), order, out);
    if order == TraversalOrder::Post {
        out.push(node.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_duplicate_is_noop() {
        let mut once = Bst::from_values([5, 3, 8]);
        let twice = once.clone();
        assert!(!once.insert(3));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_delete_two_children_uses_successor() {
        let mut tree = Bst::from_values([50, 30, 70, 20, 40, 60, 80]);
        assert!(tree.delete(30));
        let root = tree.root().unwrap();
        assert_eq!(root.left_value(), Some(40));
        let left = root.left.as_deref().unwrap();
        assert_eq!(left.left_value(), Some(20));
        assert_eq!(left.right_value(), None);
        assert!(tree.is_ordered());
    }

    #[test]
    fn test_delete_root_and_missing() {
        let mut tree = Bst::from_values([2, 1, 3]);
        assert!(tree.delete(2));
        assert_eq!(tree.root().map(|n| n.value), Some(3));
        assert!(!tree.delete(42));
        assert!(!Bst::new().delete(1));
    }

    #[test]
    fn test_walk_orders() {
        let tree = Bst::from_values([2, 1, 3]);
        assert_eq!(tree.walk(TraversalOrder::Pre), vec![2, 1, 3]);
        assert_eq!(tree.walk(TraversalOrder::In), vec![1, 2, 3]);
        assert_eq!(tree.walk(TraversalOrder::Post), vec![1, 3, 2]);
    }

    #[test]
    fn test_metrics() {
        let tree = Bst::sample();
        assert_eq!(
            tree.metrics(),
            TreeMetrics {
                nodes: 11,
                height: 4,
                leaves: 6
            }
        );
        assert_eq!(Bst::new().metrics(), TreeMetrics::default());
    }

    #[test]
    fn test_successor() {
        let tree = Bst::sample();
        assert_eq!(tree.successor_of(30), Some(35));
        assert_eq!(tree.successor_of(10), None);
    }
}
