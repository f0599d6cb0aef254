//! Subtree snapshots and placement
//!
//! A snapshot stores each node under its *relative* index, so the same
//! records can be written back under any root slot.

use super::node::{left_child, right_child};
use super::path::map_relative_to_absolute;
use super::{ImplicitAvl, TreeError};

/// One node of a subtree snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtreeRecord<K> {
    /// Position as if the subtree root were slot 0
    pub relative: usize,

    /// Stored key
    pub key: K,

    /// Cached height (subtree-local, so it survives relocation)
    pub height: u32,
}

impl<K: Ord + Copy> ImplicitAvl<K> {
    /// Pre-order snapshot of the subtree rooted at `root`
    ///
    /// Empty if `root` is empty or out of bounds.
    pub(crate) fn extract_subtree(&self, root: usize) -> Vec<SubtreeRecord<K>> {
        let mut records = Vec::new();
        let mut stack = vec![(root, 0usize)];

        while let Some((index, relative)) = stack.pop() {
            let Some(key) = self.key_at(index) else {
                continue;
            };
            records.push(SubtreeRecord {
                relative,
                key,
                height: self.heights[index],
            });

            // Right pushed first so the left side is emitted first
            if let (Some(abs), Some(rel)) = (right_child(index), right_child(relative)) {
                stack.push((abs, rel));
            }
            if let (Some(abs), Some(rel)) = (left_child(index), left_child(relative)) {
                stack.push((abs, rel));
            }
        }

        records
    }

    /// Empty every slot of the subtree rooted at `root`
    ///
    /// Returns the number of slots cleared.
    pub(crate) fn clear_subtree(&mut self, root: usize) -> usize {
        let mut cleared = 0;
        let mut stack = vec![root];

        while let Some(index) = stack.pop() {
            if self.key_at(index).is_none() {
                continue;
            }
            self.slots[index] = None;
            self.heights[index] = 0;
            cleared += 1;

            stack.extend(left_child(index));
            stack.extend(right_child(index));
        }

        cleared
    }

    /// Highest absolute slot `records` would occupy under `new_root`
    pub(crate) fn placement_bound(
        new_root: usize,
        records: &[SubtreeRecord<K>],
    ) -> Result<Option<usize>, TreeError> {
        records.iter().try_fold(None, |highest: Option<usize>, record| -> Result<_, TreeError> {
            let target = map_relative_to_absolute(new_root, record.relative)
                .ok_or(TreeError::IndexOverflow { parent: new_root })?;
            Ok(Some(highest.map_or(target, |h| h.max(target))))
        })
    }

    /// Write a snapshot back with its root at `new_root`
    pub(crate) fn write_subtree(
        &mut self,
        new_root: usize,
        records: &[SubtreeRecord<K>],
    ) -> Result<(), TreeError> {
        for record in records {
            let target = map_relative_to_absolute(new_root, record.relative)
                .ok_or(TreeError::IndexOverflow { parent: new_root })?;
            self.grow(target)?;

            debug_assert!(self.slots[target].is_none(), "slot {target} overwritten");
            self.slots[target] = Some(record.key);
            self.heights[target] = record.height;
        }
        Ok(())
    }
}
