//! Implicit slot arithmetic
//!
//! Slot i has children at 2i+1 (left) and 2i+2 (right).
//! Root is slot 0. No links are stored anywhere.

use std::fmt;

/// Left child slot of `index`, or `None` if it is not addressable
#[inline]
pub fn left_child(index: usize) -> Option<usize> {
    index.checked_mul(2)?.checked_add(1)
}

/// Right child slot of `index`, or `None` if it is not addressable
#[inline]
pub fn right_child(index: usize) -> Option<usize> {
    index.checked_mul(2)?.checked_add(2)
}

/// Parent slot of `index` (`None` for the root)
#[inline]
pub fn parent(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 2)
    }
}

/// Depth of `index` below the root (root = 0)
#[inline]
pub fn depth(index: usize) -> u32 {
    // Slots at depth d span [2^d - 1, 2^(d+1) - 2]
    (index as u128 + 1).ilog2()
}

/// Read-only view of one slot, as handed to exporters
///
/// Carries exactly what is needed to rebuild the tree shape:
/// occupancy, key, and whether the implied children are occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SlotView<K> {
    /// Absolute slot index
    pub index: usize,

    /// Key stored in the slot (`None` = empty)
    pub key: Option<K>,

    /// Cached subtree height (0 when empty)
    pub height: u32,

    /// Whether slot 2i+1 is occupied
    pub has_left: bool,

    /// Whether slot 2i+2 is occupied
    pub has_right: bool,
}

impl<K> SlotView<K> {
    /// Check if the slot holds a node
    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.key.is_some()
    }

    /// Check if the slot is an occupied leaf
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.is_occupied() && !self.has_left && !self.has_right
    }
}

impl<K: fmt::Display> fmt::Display for SlotView<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "[{}: {} h={}]", self.index, key, self.height),
            None => write!(f, "[{}: -]", self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_parent_round_trip() {
        for i in 0..1000usize {
            let l = left_child(i).unwrap();
            let r = right_child(i).unwrap();
            assert_eq!(r, l + 1);
            assert_eq!(parent(l), Some(i));
            assert_eq!(parent(r), Some(i));
        }
        assert_eq!(parent(0), None);
    }

    #[test]
    fn test_child_overflow() {
        assert_eq!(left_child(usize::MAX / 2 + 1), None);
        assert_eq!(right_child(usize::MAX / 2), None);
        assert!(left_child(usize::MAX / 2 - 1).is_some());
    }

    #[test]
    fn test_depth_levels() {
        assert_eq!(depth(0), 0);
        assert_eq!(depth(1), 1);
        assert_eq!(depth(2), 1);
        assert_eq!(depth(3), 2);
        assert_eq!(depth(6), 2);
        assert_eq!(depth(7), 3);
        assert_eq!(depth(usize::MAX), usize::BITS);
    }
}
