//! Pointer-based AVL tree
//!
//! Textbook linked representation: rotations only swap links, no data moves.
//! Used to cross-check the shape produced by [`crate::ImplicitAvl`] and as
//! the baseline of the benchmark.

use std::cmp::Ordering;

use crate::tree::{left_child, right_child};

type Link<K> = Option<Box<Node<K>>>;

/// Tree node with owned children
#[derive(Debug, Clone)]
struct Node<K> {
    key: K,
    height: u32,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance(&self) -> i64 {
        i64::from(height(&self.left)) - i64::from(height(&self.right))
    }
}

fn height<K>(link: &Link<K>) -> u32 {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance<K>(link: &Link<K>) -> i64 {
    link.as_ref().map_or(0, |n| n.balance())
}

/// Right rotation: O(1) link exchange
fn rotate_right<K>(mut y: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

/// Left rotation: O(1) link exchange
fn rotate_left<K>(mut x: Box<Node<K>>) -> Box<Node<K>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Pointer-based AVL set
#[derive(Debug, Clone)]
pub struct ReferenceAvl<K> {
    root: Link<K>,
    len: usize,
}

impl<K: Ord + Copy> ReferenceAvl<K> {
    /// Empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (0 when empty)
    pub fn height(&self) -> u32 {
        height(&self.root)
    }

    /// Key at the root
    pub fn root_key(&self) -> Option<K> {
        self.root.as_ref().map(|n| n.key)
    }

    /// Insert `key`; `false` if it was already present
    pub fn insert(&mut self, key: K) -> bool {
        let mut inserted = false;
        self.root = Some(Self::insert_node(self.root.take(), key, &mut inserted));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    fn insert_node(link: Link<K>, key: K, inserted: &mut bool) -> Box<Node<K>> {
        let Some(mut node) = link else {
            *inserted = true;
            return Node::leaf(key);
        };

        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::insert_node(node.left.take(), key, inserted)),
            Ordering::Greater => {
                node.right = Some(Self::insert_node(node.right.take(), key, inserted))
            }
            Ordering::Equal => return node,
        }

        node.update_height();
        let balance = node.balance();
        let left_key = node.left.as_ref().map(|n| n.key);
        let right_key = node.right.as_ref().map(|n| n.key);

        match (left_key, right_key) {
            // Left-Left
            (Some(lk), _) if balance > 1 && key < lk => rotate_right(node),
            // Right-Right
            (_, Some(rk)) if balance < -1 && key > rk => rotate_left(node),
            // Left-Right
            (Some(lk), _) if balance > 1 && key > lk => {
                node.left = node.left.take().map(rotate_left);
                rotate_right(node)
            }
            // Right-Left
            (_, Some(rk)) if balance < -1 && key < rk => {
                node.right = node.right.take().map(rotate_right);
                rotate_left(node)
            }
            _ => node,
        }
    }

    /// Remove `key`; `false` if it was absent
    pub fn delete(&mut self, key: &K) -> bool {
        let mut removed = false;
        self.root = Self::delete_node(self.root.take(), key, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn delete_node(link: Link<K>, key: &K, removed: &mut bool) -> Link<K> {
        let mut node = link?;

        match key.cmp(&node.key) {
            Ordering::Less => node.left = Self::delete_node(node.left.take(), key, removed),
            Ordering::Greater => node.right = Self::delete_node(node.right.take(), key, removed),
            Ordering::Equal => {
                *removed = true;
                match (node.left.take(), node.right.take()) {
                    (None, right) => return right,
                    (left, None) => return left,
                    (left, Some(right)) => {
                        // Two children: take the in-order successor's key
                        let successor = Self::min_key(&right);
                        node.key = successor;
                        node.left = left;
                        let mut ignored = false;
                        node.right = Self::delete_node(Some(right), &successor, &mut ignored);
                    }
                }
            }
        }

        node.update_height();
        let balance = node.balance();

        let rebalanced = if balance > 1 {
            if self::balance(&node.left) < 0 {
                node.left = node.left.take().map(rotate_left);
            }
            rotate_right(node)
        } else if balance < -1 {
            if self::balance(&node.right) > 0 {
                node.right = node.right.take().map(rotate_right);
            }
            rotate_left(node)
        } else {
            node
        };
        Some(rebalanced)
    }

    fn min_key(node: &Node<K>) -> K {
        let mut current = node;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        current.key
    }

    /// Check whether `key` is stored
    pub fn contains(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Keys in ascending order
    pub fn in_order(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();

        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            keys.push(node.key);
            current = node.right.as_deref();
        }

        keys
    }

    /// Each node as `(implicit slot, key, height)`, sorted by slot
    ///
    /// The slot is where the node would live in an implicit array, which
    /// makes shapes directly comparable with [`crate::ImplicitAvl`].
    pub fn implicit_layout(&self) -> Vec<(usize, K, u32)> {
        let mut layout = Vec::with_capacity(self.len);
        let mut stack: Vec<(&Node<K>, usize)> = self.root.as_deref().map(|n| (n, 0)).into_iter().collect();

        while let Some((node, index)) = stack.pop() {
            layout.push((index, node.key, node.height));
            if let (Some(left), Some(slot)) = (node.left.as_deref(), left_child(index)) {
                stack.push((left, slot));
            }
            if let (Some(right), Some(slot)) = (node.right.as_deref(), right_child(index)) {
                stack.push((right, slot));
            }
        }

        layout.sort_unstable_by_key(|&(index, _, _)| index);
        layout
    }

    /// Parent/child key pairs in pre-order
    pub fn edges(&self) -> Vec<(K, K)> {
        let mut edges = Vec::new();
        let mut stack: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();

        while let Some(node) = stack.pop() {
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                edges.push((node.key, child.key));
            }
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }

        edges
    }

    /// Heap bytes held by the nodes
    pub fn approx_bytes(&self) -> usize {
        self.len * std::mem::size_of::<Node<K>>()
    }
}

impl<K: Ord + Copy> Default for ReferenceAvl<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> Extend<K> for ReferenceAvl<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + Copy> FromIterator<K> for ReferenceAvl<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_balanced<K>(link: &Link<K>) -> bool {
        match link {
            None => true,
            Some(n) => {
                n.balance().abs() <= 1
                    && n.height == 1 + height(&n.left).max(height(&n.right))
                    && is_balanced(&n.left)
                    && is_balanced(&n.right)
            }
        }
    }

    #[test]
    fn test_insert_scenario() {
        let tree: ReferenceAvl<i32> = [10, 20, 30, 40, 50, 25].into_iter().collect();
        assert_eq!(tree.in_order(), vec![10, 20, 25, 30, 40, 50]);
        assert_eq!(tree.root_key(), Some(30));
        assert_eq!(tree.height(), 3);
        assert!(tree.contains(&25));
        assert!(!tree.contains(&99));
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut tree = ReferenceAvl::new();
        assert!(tree.insert(1));
        assert!(!tree.insert(1));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_implicit_layout() {
        let tree: ReferenceAvl<i32> = [30, 20, 10].into_iter().collect();
        assert_eq!(tree.implicit_layout(), vec![(0, 20, 2), (1, 10, 1), (2, 30, 1)]);
        assert_eq!(tree.edges(), vec![(20, 10), (20, 30)]);
    }

    #[test]
    fn test_delete_rebalances() {
        let mut tree: ReferenceAvl<i32> = (1..=100).collect();
        for key in (1..=100).step_by(3) {
            assert!(tree.delete(&key));
            assert!(is_balanced(&tree.root));
        }
        assert!(!tree.delete(&1));
        assert_eq!(tree.len(), 66);
        assert!(tree.in_order().iter().all(|k| k % 3 != 1));
    }

    #[test]
    fn test_delete_two_children() {
        let mut tree: ReferenceAvl<i32> = [20, 10, 30, 25, 35].into_iter().collect();
        assert!(tree.delete(&20));
        assert_eq!(tree.root_key(), Some(25));
        assert_eq!(tree.in_order(), vec![10, 25, 30, 35]);
        assert!(is_balanced(&tree.root));
    }

    #[test]
    fn test_delete_to_empty() {
        let mut tree: ReferenceAvl<i32> = [1, 2].into_iter().collect();
        assert!(tree.delete(&1));
        assert!(tree.delete(&2));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }
}
