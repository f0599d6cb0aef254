//! Relative index paths
//!
//! A relative index names a node as if its subtree root sat at slot 0.
//! Decoding it yields the Left/Right path from that root; replaying the
//! path from any other slot gives the node's absolute position there.
//! This is what lets a rotation move a subtree without changing its shape.

/// One step down the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Step to 2x+1
    Left,

    /// Step to 2x+2
    Right,
}

impl Direction {
    /// Apply this step to a slot index
    #[inline]
    pub fn apply(self, index: usize) -> Option<usize> {
        match self {
            Direction::Left => super::node::left_child(index),
            Direction::Right => super::node::right_child(index),
        }
    }

    /// The other side
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Root-to-node path decoded from a relative index
///
/// Stack depth: O(height of the subtree)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexPath {
    /// Steps in root-to-node order
    steps: Vec<Direction>,
}

impl IndexPath {
    /// Decode the canonical path of `relative` (root at 0)
    pub fn from_relative(relative: usize) -> Self {
        let mut steps = Vec::new();
        let mut value = relative;

        // Walk node -> root by parity
        while value > 0 {
            if value % 2 == 1 {
                steps.push(Direction::Left);
                value = (value - 1) / 2;
            } else {
                steps.push(Direction::Right);
                value = (value - 2) / 2;
            }
        }

        steps.reverse();
        Self { steps }
    }

    /// Push one more step
    pub fn push(&mut self, direction: Direction) {
        self.steps.push(direction);
    }

    /// Pop the deepest step
    pub fn pop(&mut self) -> Option<Direction> {
        self.steps.pop()
    }

    /// Number of steps
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Steps in root-to-node order
    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    /// Replay the path starting from `base`
    ///
    /// Returns `None` if an intermediate index is not addressable.
    pub fn replay_from(&self, base: usize) -> Option<usize> {
        self.steps
            .iter()
            .try_fold(base, |index, step| step.apply(index))
    }
}

/// Absolute slot of relative node `relative` in a subtree rooted at `new_root`
///
/// `None` if the target index does not fit in `usize`.
pub fn map_relative_to_absolute(new_root: usize, relative: usize) -> Option<usize> {
    if relative == 0 {
        return Some(new_root);
    }
    IndexPath::from_relative(relative).replay_from(new_root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_paths() {
        assert!(IndexPath::from_relative(0).steps().is_empty());
        assert_eq!(IndexPath::from_relative(1).steps(), &[Direction::Left]);
        assert_eq!(IndexPath::from_relative(2).steps(), &[Direction::Right]);
        assert_eq!(
            IndexPath::from_relative(5).steps(),
            &[Direction::Right, Direction::Left]
        );
        assert_eq!(
            IndexPath::from_relative(10).steps(),
            &[Direction::Left, Direction::Right, Direction::Right]
        );
    }

    #[test]
    fn test_replay_from_root_is_identity() {
        for relative in 0..512 {
            assert_eq!(map_relative_to_absolute(0, relative), Some(relative));
        }
    }

    #[test]
    fn test_push_pop() {
        let mut path = IndexPath::from_relative(1);
        path.push(Direction::Right);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.replay_from(0), Some(4));
        assert_eq!(path.pop(), Some(Direction::Right));
        assert_eq!(path.replay_from(0), Some(1));
    }

    #[test]
    fn test_replay_overflow() {
        assert_eq!(map_relative_to_absolute(usize::MAX / 2, 2), None);
        assert_eq!(map_relative_to_absolute(usize::MAX, 0), Some(usize::MAX));
    }
}
