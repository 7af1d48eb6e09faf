use std::cmp::Ordering;
use std::fmt::Debug;
use std::iter::FusedIterator;

use crate::error::InvariantViolation;

// =============================================================================
// Nodes: each node exclusively owns its children
// =============================================================================

type Link<K> = Option<Box<Node<K>>>;

#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    height: usize,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

/// Height of an absent subtree is 0, a leaf is 1.
fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

// =============================================================================
// Rotations
// =============================================================================

/// Lifts the left child above `node`. The left child's right subtree
/// moves across to become `node`'s new left subtree.
fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

/// Mirror of [`rotate_right`].
fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

// =============================================================================
// Tree
// =============================================================================

/// Self-balancing binary search tree over unique keys.
///
/// The tree stores keys only (for the registry, faculty ids); the records
/// themselves live in the [`RecordStore`](crate::store::RecordStore).
/// Inserting a key that is already present is a no-op.
#[derive(Debug, Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
    len: usize,
    rotations: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        AvlTree {
            root: None,
            len: 0,
            rotations: 0,
        }
    }
}

impl<K> AvlTree<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Single rotations performed so far. A double rotation counts twice.
    pub fn rotations(&self) -> usize {
        self.rotations
    }

    /// Ascending in-order iterator. Lazy, and restartable by calling again.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root, self.len)
    }

    /// Visits every key in ascending order.
    pub fn display(&self, mut visit: impl FnMut(&K)) {
        for key in self.iter() {
            visit(key);
        }
    }
}

impl<K: Ord> AvlTree<K> {
    /// Inserts `key`, rebalancing on the way back up.
    ///
    /// Returns `false` and leaves the tree untouched when the key is
    /// already present.
    pub fn insert(&mut self, key: K) -> bool {
        let mut outcome = InsertOutcome::default();
        self.root = Some(insert_at(self.root.take(), key, &mut outcome));
        if outcome.inserted {
            self.len += 1;
        }
        self.rotations += outcome.rotations;
        if outcome.rotations > 0 {
            tracing::trace!(rotations = outcome.rotations, "rebalanced sorted index");
        }
        outcome.inserted
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }
}

impl<K: Ord + Debug> AvlTree<K> {
    /// Walks the whole tree checking key order, cached heights and balance.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        check_subtree(&self.root, None, None).map(|_| ())
    }
}

#[derive(Default)]
struct InsertOutcome {
    inserted: bool,
    rotations: usize,
}

fn insert_at<K: Ord>(link: Link<K>, key: K, outcome: &mut InsertOutcome) -> Box<Node<K>> {
    let mut node = match link {
        None => {
            outcome.inserted = true;
            return Node::leaf(key);
        }
        Some(node) => node,
    };

    // The rebalancing case depends on where the key sits relative to the
    // heavy child, and the key is moved into the recursion below.
    let (side, grandchild_side) = match key.cmp(&node.key) {
        Ordering::Less => {
            let below = node.left.as_ref().map(|child| key.cmp(&child.key));
            node.left = Some(insert_at(node.left.take(), key, outcome));
            (Ordering::Less, below)
        }
        Ordering::Greater => {
            let below = node.right.as_ref().map(|child| key.cmp(&child.key));
            node.right = Some(insert_at(node.right.take(), key, outcome));
            (Ordering::Greater, below)
        }
        Ordering::Equal => return node,
    };

    node.update_height();
    let balance = node.balance_factor();

    match (side, grandchild_side) {
        // Left-Left
        (Ordering::Less, Some(Ordering::Less)) if balance > 1 => {
            outcome.rotations += 1;
            rotate_right(node)
        }
        // Left-Right
        (Ordering::Less, Some(Ordering::Greater)) if balance > 1 => {
            outcome.rotations += 2;
            node.left = node.left.take().map(rotate_left);
            rotate_right(node)
        }
        // Right-Right
        (Ordering::Greater, Some(Ordering::Greater)) if balance < -1 => {
            outcome.rotations += 1;
            rotate_left(node)
        }
        // Right-Left
        (Ordering::Greater, Some(Ordering::Less)) if balance < -1 => {
            outcome.rotations += 2;
            node.right = node.right.take().map(rotate_right);
            rotate_left(node)
        }
        _ => node,
    }
}

/// Returns the true height of the subtree when it is valid.
fn check_subtree<K: Ord + Debug>(
    link: &Link<K>,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<usize, InvariantViolation> {
    let Some(node) = link else {
        return Ok(0);
    };

    let above_lower = lower.map_or(true, |lower| node.key > *lower);
    let below_upper = upper.map_or(true, |upper| node.key < *upper);
    if !above_lower || !below_upper {
        return Err(InvariantViolation::Order {
            key: format!("{:?}", node.key),
        });
    }

    let left = check_subtree(&node.left, lower, Some(&node.key))?;
    let right = check_subtree(&node.right, Some(&node.key), upper)?;

    let actual = 1 + left.max(right);
    if node.height != actual {
        return Err(InvariantViolation::Height {
            key: format!("{:?}", node.key),
            cached: node.height,
            actual,
        });
    }

    let factor = left as isize - right as isize;
    if factor.abs() > 1 {
        return Err(InvariantViolation::Balance {
            key: format!("{:?}", node.key),
            factor,
        });
    }

    Ok(actual)
}

// =============================================================================
// Iteration
// =============================================================================

/// In-order iterator holding the path of pending ancestors.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(root: &'a Link<K>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
