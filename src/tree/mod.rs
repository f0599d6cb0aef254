//! Implicit-index AVL store
//!
//! Key idea: the slot a node lives in *is* its position in the tree.
//! Root at slot 0, children of slot i at 2i+1 and 2i+2.
//!
//! Consequence: a rotation cannot swap pointers. It snapshots the
//! subtrees that change position, clears the region and replays them
//! at their new slots (see [`path`] for the relocation arithmetic).

mod error;
mod node;
mod path;
mod rotation;
mod subtree;
mod validate;

pub use error::{TreeError, Violation};
pub use node::{depth, left_child, parent, right_child, SlotView};
pub use path::{map_relative_to_absolute, Direction, IndexPath};
pub use subtree::SubtreeRecord;

use std::cmp::Ordering;

use crate::space::{SpaceProfile, SpaceTracker};
use crate::StoreConfig;

/// AVL tree laid out over a flat, strictly growing slot array
///
/// `slots[i]` holds the key of the node at implicit position i
/// (`None` = empty); `heights[i]` caches its subtree height.
#[derive(Debug, Clone)]
pub struct ImplicitAvl<K> {
    /// Key slots
    slots: Vec<Option<K>>,

    /// Cached subtree heights, parallel to `slots`
    heights: Vec<u32>,

    /// Occupied slot count
    len: usize,

    /// Growth and movement accounting
    space: SpaceTracker,
}

impl<K: Ord + Copy> ImplicitAvl<K> {
    /// Empty store with the default initial capacity
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Empty store with `capacity` pre-allocated slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(&StoreConfig::with_capacity(capacity))
    }

    /// Empty store from a full configuration
    pub fn with_config(config: &StoreConfig) -> Self {
        let capacity = config.initial_capacity;
        Self {
            slots: vec![None; capacity],
            heights: vec![0; capacity],
            len: 0,
            space: SpaceTracker::new(capacity, Self::slot_bytes(), config.profile_space),
        }
    }

    /// Bytes one slot costs across both arrays
    pub fn slot_bytes() -> usize {
        std::mem::size_of::<Option<K>>() + std::mem::size_of::<u32>()
    }

    /// Allocated slot count
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of keys stored
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no key is stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Key slots, `None` marking empty ones
    pub fn keys(&self) -> &[Option<K>] {
        &self.slots
    }

    /// Cached heights, parallel to [`Self::keys`]
    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    /// Key at `index`, if in bounds and occupied
    #[inline]
    pub fn key_at(&self, index: usize) -> Option<K> {
        self.slots.get(index).copied().flatten()
    }

    #[inline]
    fn is_occupied(&self, index: Option<usize>) -> bool {
        index.is_some_and(|i| self.key_at(i).is_some())
    }

    /// Height of the subtree at `index` (0 if empty or out of bounds)
    #[inline]
    pub fn get_height(&self, index: usize) -> u32 {
        match self.key_at(index) {
            Some(_) => self.heights[index],
            None => 0,
        }
    }

    fn child_height(&self, child: Option<usize>) -> u32 {
        child.map_or(0, |c| self.get_height(c))
    }

    /// Height of the whole tree
    pub fn root_height(&self) -> u32 {
        self.get_height(0)
    }

    /// Recompute the cached height of `index` from its children
    pub(crate) fn update_height(&mut self, index: usize) {
        if self.key_at(index).is_some() {
            let left = self.child_height(left_child(index));
            let right = self.child_height(right_child(index));
            self.heights[index] = 1 + left.max(right);
        }
    }

    /// Left height minus right height (0 if empty or out of bounds)
    pub fn get_balance(&self, index: usize) -> i64 {
        if self.key_at(index).is_none() {
            return 0;
        }
        i64::from(self.child_height(left_child(index)))
            - i64::from(self.child_height(right_child(index)))
    }

    /// Make `required_index` addressable
    ///
    /// Strict policy: the new capacity is exactly `required_index + 1`.
    /// The new block is built completely before it replaces the old one,
    /// so a failed allocation leaves the store untouched.
    pub fn grow(&mut self, required_index: usize) -> Result<(), TreeError> {
        let old_capacity = self.capacity();
        if required_index < old_capacity {
            return Ok(());
        }

        let new_capacity = required_index
            .checked_add(1)
            .ok_or(TreeError::AllocationFailed {
                capacity: required_index,
            })?;
        let refused = |_| TreeError::AllocationFailed {
            capacity: new_capacity,
        };

        let mut slots = Vec::new();
        slots.try_reserve_exact(new_capacity).map_err(refused)?;
        let mut heights = Vec::new();
        heights.try_reserve_exact(new_capacity).map_err(refused)?;

        slots.extend_from_slice(&self.slots);
        slots.resize(new_capacity, None);
        heights.extend_from_slice(&self.heights);
        heights.resize(new_capacity, 0);

        self.slots = slots;
        self.heights = heights;
        self.space.record_growth(old_capacity, new_capacity);

        tracing::debug!(old_capacity, new_capacity, "grew slot arrays");
        Ok(())
    }

    /// Check whether `key` is stored
    pub fn search(&self, key: &K) -> bool {
        let mut index = 0;
        while let Some(current) = self.key_at(index) {
            let next = match key.cmp(&current) {
                Ordering::Equal => return true,
                Ordering::Less => left_child(index),
                Ordering::Greater => right_child(index),
            };
            match next {
                Some(next) => index = next,
                None => break,
            }
        }
        false
    }

    /// Insert `key`, rebalancing on the way back up
    ///
    /// Returns `false` (and leaves the store unchanged) if the key was
    /// already present.
    ///
    /// # Panics
    ///
    /// If the slot arrays cannot grow far enough, like `Vec` does on
    /// capacity overflow. Use [`Self::try_insert`] to handle that case.
    pub fn insert(&mut self, key: K) -> bool {
        match self.try_insert(key) {
            Ok(inserted) => inserted,
            Err(err) => panic!("implicit AVL insert failed: {err}"),
        }
    }

    /// Fallible [`Self::insert`]
    ///
    /// A failure during descent leaves the store unchanged. A failure
    /// while rebalancing leaves the key placed, every cached height
    /// correct and the BST ordering intact, but one ancestor may be
    /// left unbalanced.
    pub fn try_insert(&mut self, key: K) -> Result<bool, TreeError> {
        // Descent: remember every ancestor of the new leaf
        let mut ancestors = Vec::new();
        let mut index = 0;
        loop {
            self.grow(index)?;
            let Some(current) = self.slots[index] else {
                break;
            };
            let next = match key.cmp(&current) {
                Ordering::Equal => return Ok(false),
                Ordering::Less => left_child(index),
                Ordering::Greater => right_child(index),
            };
            ancestors.push(index);
            index = next.ok_or(TreeError::IndexOverflow { parent: index })?;
        }

        self.slots[index] = Some(key);
        self.heights[index] = 1;
        self.len += 1;
        self.space.record_insertion();

        // Unwind: heights always, rotations until one fails
        let mut outcome = Ok(());
        for &ancestor in ancestors.iter().rev() {
            self.update_height(ancestor);
            if outcome.is_ok() {
                outcome = self.rebalance(ancestor, key);
            }
        }
        outcome.map(|()| true)
    }

    /// Apply the LL / RR / LR / RL case at `index`, if any
    fn rebalance(&mut self, index: usize, key: K) -> Result<(), TreeError> {
        let balance = self.get_balance(index);

        if balance > 1 {
            let left = left_child(index).ok_or(TreeError::IndexOverflow { parent: index })?;
            let Some(left_key) = self.key_at(left) else {
                return Ok(());
            };
            match key.cmp(&left_key) {
                Ordering::Less => self.right_rotate(index)?,
                Ordering::Greater => {
                    self.left_rotate(left)?;
                    self.right_rotate(index)?;
                }
                Ordering::Equal => {}
            }
        } else if balance < -1 {
            let right = right_child(index).ok_or(TreeError::IndexOverflow { parent: index })?;
            let Some(right_key) = self.key_at(right) else {
                return Ok(());
            };
            match key.cmp(&right_key) {
                Ordering::Greater => self.left_rotate(index)?,
                Ordering::Less => {
                    self.right_rotate(right)?;
                    self.left_rotate(index)?;
                }
                Ordering::Equal => {}
            }
        }

        Ok(())
    }

    /// Read-only view of one slot (empty view if out of bounds)
    pub fn slot(&self, index: usize) -> SlotView<K> {
        SlotView {
            index,
            key: self.key_at(index),
            height: self.get_height(index),
            has_left: self.is_occupied(left_child(index)),
            has_right: self.is_occupied(right_child(index)),
        }
    }

    /// Every slot 0..capacity, occupied or not
    pub fn slots(&self) -> impl Iterator<Item = SlotView<K>> + '_ {
        (0..self.capacity()).map(move |index| self.slot(index))
    }

    /// Occupied slots only
    pub fn occupied(&self) -> impl Iterator<Item = SlotView<K>> + '_ {
        self.slots().filter(SlotView::is_occupied)
    }

    /// Slot indices in in-order (ascending key) sequence
    pub(crate) fn in_order_indices(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cursor = Some(0);

        loop {
            while let Some(index) = cursor.filter(|&i| self.key_at(i).is_some()) {
                stack.push(index);
                cursor = left_child(index);
            }
            let Some(index) = stack.pop() else {
                break;
            };
            order.push(index);
            cursor = right_child(index);
        }

        order
    }

    /// Keys in ascending order
    pub fn in_order(&self) -> Vec<K> {
        self.in_order_indices()
            .into_iter()
            .filter_map(|index| self.key_at(index))
            .collect()
    }

    /// Space accounting for this store
    pub fn space(&self) -> &SpaceTracker {
        &self.space
    }

    /// Take the space profile (if profiling was enabled)
    pub fn take_profile(&mut self) -> Option<SpaceProfile> {
        self.space.take_profile()
    }
}

impl<K: Ord + Copy> Default for ImplicitAvl<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> Extend<K> for ImplicitAvl<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord + Copy> FromIterator<K> for ImplicitAvl<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}
