//! Full-array invariant check

use super::node::{left_child, parent, right_child};
use super::{ImplicitAvl, TreeError, Violation};

impl<K: Ord + Copy> ImplicitAvl<K> {
    /// Scan every slot and check topology, height cache, balance and order
    ///
    /// Reports the first violation found, scanning slots in index order
    /// and then keys in in-order sequence.
    pub fn validate(&self) -> Result<(), TreeError> {
        let fail = |index, violation| Err(TreeError::InvariantViolation { index, violation });

        for index in 0..self.capacity() {
            if self.key_at(index).is_none() {
                let height = self.heights[index];
                if height != 0 {
                    return fail(index, Violation::StaleHeight { height });
                }
                continue;
            }

            if parent(index).is_some_and(|p| self.key_at(p).is_none()) {
                return fail(index, Violation::Orphan);
            }

            let left = left_child(index).map_or(0, |c| self.get_height(c));
            let right = right_child(index).map_or(0, |c| self.get_height(c));
            let expected = 1 + left.max(right);
            let actual = self.heights[index];
            if actual != expected {
                return fail(index, Violation::HeightMismatch { expected, actual });
            }

            let balance = i64::from(left) - i64::from(right);
            if balance.abs() > 1 {
                return fail(index, Violation::Unbalanced { balance });
            }
        }

        let order = self.in_order_indices();
        for pair in order.windows(2) {
            if self.slots[pair[0]] >= self.slots[pair[1]] {
                return fail(pair[1], Violation::OutOfOrder);
            }
        }

        if order.len() != self.len {
            tracing::warn!(reachable = order.len(), len = self.len, "length drifted");
        }

        Ok(())
    }
}
