//! Rotations as data movement
//!
//! Right rotation at y (left rotation is the mirror image):
//!
//! ```text
//!        y                 x
//!       / \               / \
//!      x   T3    ->      T1  y
//!     / \                   / \
//!    T1  T2                T2  T3
//! ```
//!
//! x is promoted into y's slot, y is demoted one level. T1 (outer) moves
//! up, T2 (middle) crosses sides, T3 (far) moves down. Every node of the
//! three subtrees lands on a new slot, so the cost is O(subtree size).
//!
//! Order: snapshot -> grow -> clear -> place pivots -> replay -> heights.

use super::node::depth;
use super::path::Direction;
use super::{ImplicitAvl, TreeError};

fn step(direction: Direction, index: usize) -> Result<usize, TreeError> {
    direction
        .apply(index)
        .ok_or(TreeError::IndexOverflow { parent: index })
}

impl<K: Ord + Copy> ImplicitAvl<K> {
    /// Rotate right at `top`: its left child is promoted
    pub(crate) fn right_rotate(&mut self, top: usize) -> Result<(), TreeError> {
        self.rotate(top, Direction::Left)
    }

    /// Rotate left at `top`: its right child is promoted
    pub(crate) fn left_rotate(&mut self, top: usize) -> Result<(), TreeError> {
        self.rotate(top, Direction::Right)
    }

    /// Promote the child of `top` on `pivot_side`
    ///
    /// Either completes or leaves the store untouched: the highest target
    /// slot is computed and grown to before anything is cleared.
    fn rotate(&mut self, top: usize, pivot_side: Direction) -> Result<(), TreeError> {
        let away = pivot_side.opposite();
        let pivot = step(pivot_side, top)?;

        let (Some(top_key), Some(pivot_key)) = (self.key_at(top), self.key_at(pivot)) else {
            panic!("rotation at slot {top} requires an occupied pivot at slot {pivot}");
        };

        // Snapshot everything that moves before touching any slot
        let outer = self.extract_subtree(step(pivot_side, pivot)?);
        let middle = self.extract_subtree(step(away, pivot)?);
        let far = self.extract_subtree(step(away, top)?);

        let demoted = step(away, top)?;
        let placements = [
            (step(pivot_side, top)?, &outer),
            (step(pivot_side, demoted)?, &middle),
            (step(away, demoted)?, &far),
        ];

        let mut highest = demoted;
        for (root, records) in &placements {
            if let Some(bound) = Self::placement_bound(*root, records)? {
                highest = highest.max(bound);
            }
        }
        self.grow(highest)?;

        // Nothing below can fail for lack of space
        self.clear_subtree(top);

        self.slots[top] = Some(pivot_key);
        self.slots[demoted] = Some(top_key);

        for (root, records) in placements {
            self.write_subtree(root, records)?;
        }

        // Demoted node first: it is now a child of the promoted one
        self.update_height(demoted);
        self.update_height(top);

        let moved = 2 + outer.len() + middle.len() + far.len();
        self.space.record_rotation(moved);
        tracing::trace!(top, depth = depth(top), ?pivot_side, moved, "rotated subtree");

        Ok(())
    }
}
