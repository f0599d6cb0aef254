//! # Implicit-Array AVL Tree
//!
//! An AVL tree whose topology is encoded entirely by slot position in a
//! flat array, compared against a conventional pointer-based AVL.
//!
//! ## Core Algorithm
//!
//! 1. **Implicit topology**: root at slot 0, children of i at 2i+1 / 2i+2
//! 2. **Relative snapshots**: subtrees are captured position-independently
//! 3. **Path replay**: a relative index decodes to a Left/Right path that can
//!    be replayed under any new root
//! 4. **Rotation by relocation**: snapshot, clear, place pivots, replay
//! 5. **Strict growth**: capacity is always exactly `max index + 1`
//!
//! Result: rotations cost O(subtree size) instead of O(1), in exchange for
//! zero per-node link overhead.
//!
//! ## Usage Example
//!
//! ```
//! use implicit_avl::ImplicitAvl;
//!
//! let mut tree = ImplicitAvl::new();
//! for key in [10, 20, 30, 40, 50, 25] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.in_order(), vec![10, 20, 25, 30, 40, 50]);
//! assert_eq!(tree.root_height(), 3);
//! assert!(tree.search(&25));
//! assert!(!tree.search(&99));
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod tree;       // Implicit-index AVL store
pub mod space;      // Growth and movement accounting

// Collaborators built on the read-only surface
pub mod reference;  // Pointer-based AVL for comparison
pub mod export;     // Graphviz rendering
pub mod bench;      // Timing and memory comparison

// Re-exports for convenience
pub use tree::{ImplicitAvl, SlotView, TreeError};
pub use reference::ReferenceAvl;
pub use export::DotGraph;
pub use space::SpaceProfile;

/// Initial capacity used when none is given
pub const DEFAULT_CAPACITY: usize = 10;

/// Configuration parameters for an [`ImplicitAvl`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Slots allocated up front (may be 0)
    pub initial_capacity: usize,

    /// Record a detailed [`SpaceProfile`]
    pub profile_space: bool,
}

impl StoreConfig {
    /// Configuration with `initial_capacity` slots, profiling off
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..Self::default()
        }
    }

    /// Same configuration with profiling on
    pub fn profiled(self) -> Self {
        Self {
            profile_space: true,
            ..self
        }
    }

    /// Initial footprint in bytes for keys of type `K`
    pub fn initial_bytes<K: Ord + Copy>(&self) -> usize {
        self.initial_capacity * ImplicitAvl::<K>::slot_bytes()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            profile_space: false,
        }
    }
}
