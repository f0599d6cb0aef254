//! Space accounting and profiling
//!
//! Tracks how much the strict growth policy allocates and how much data
//! rotations move, so the array store can be compared with a linked tree.

mod allocator;

pub use allocator::SpaceTracker;

/// One reallocation, as seen on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct GrowthEvent {
    /// Insertions completed before the growth
    pub insertions: usize,

    /// Capacity after the growth
    pub capacity: usize,
}

/// Detailed space profile (if enabled)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SpaceProfile {
    /// Maximum capacity reached (slots)
    pub peak_capacity: usize,

    /// Maximum footprint reached (bytes)
    pub peak_bytes: usize,

    /// Number of reallocations
    pub reallocations: usize,
    /// Slots copied across all reallocations
    pub slots_copied: usize,

    /// Number of rotations performed
    pub rotations: usize,
    /// Nodes rewritten by rotations
    pub nodes_relocated: usize,

    /// Capacity over time
    pub timeline: Vec<GrowthEvent>,
}

impl SpaceProfile {
    /// Verify peak footprint stays within `bound` bytes
    pub fn satisfies_bound(&self, bound: usize) -> bool {
        self.peak_bytes <= bound
    }

    /// Generate report
    pub fn report(&self) -> String {
        format!(
            "Peak capacity: {} slots ({} bytes)\nGrowth:\n  Reallocations: {}\n  Slots copied: {}\nRotations:\n  Count: {}\n  Nodes relocated: {}",
            self.peak_capacity,
            self.peak_bytes,
            self.reallocations,
            self.slots_copied,
            self.rotations,
            self.nodes_relocated
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_and_bound() {
        let profile = SpaceProfile {
            peak_capacity: 15,
            peak_bytes: 300,
            reallocations: 2,
            slots_copied: 17,
            rotations: 1,
            nodes_relocated: 4,
            timeline: Vec::new(),
        };
        assert!(profile.satisfies_bound(300));
        assert!(!profile.satisfies_bound(299));

        let report = profile.report();
        assert!(report.starts_with("Peak capacity: 15 slots (300 bytes)"));
        assert!(report.contains("Reallocations: 2"));
        assert!(report.contains("Nodes relocated: 4"));
    }
}
