use thiserror::Error;

/// Errors produced by the implicit store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A child slot index does not fit in `usize`
    #[error("child index of slot {parent} is not addressable")]
    IndexOverflow {
        /// Slot whose child was requested
        parent: usize,
    },

    /// The allocator refused the strict reallocation
    #[error("failed to allocate {capacity} slots")]
    AllocationFailed {
        /// Capacity that was requested
        capacity: usize,
    },

    /// A structural invariant does not hold
    #[error("invariant violated at slot {index}: {violation}")]
    InvariantViolation {
        /// Offending slot
        index: usize,
        /// What is wrong with it
        violation: Violation,
    },
}

/// Kind of broken invariant reported by [`super::ImplicitAvl::validate`]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Occupied slot whose parent slot is empty
    #[error("occupied slot has an empty parent")]
    Orphan,

    /// Empty slot still carrying a height
    #[error("empty slot carries height {height}")]
    StaleHeight {
        /// Height left behind
        height: u32,
    },

    /// Cached height disagrees with the children
    #[error("cached height {actual}, expected {expected}")]
    HeightMismatch {
        /// 1 + max(child heights)
        expected: u32,
        /// Stored value
        actual: u32,
    },

    /// Balance factor outside [-1, 1]
    #[error("balance factor {balance}")]
    Unbalanced {
        /// left height - right height
        balance: i64,
    },

    /// In-order walk is not strictly increasing here
    #[error("key out of order")]
    OutOfOrder,
}
