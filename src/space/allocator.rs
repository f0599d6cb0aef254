//! Space tracking for the slot arrays

use super::{GrowthEvent, SpaceProfile};

/// Tracks capacity and data movement of one store
#[derive(Debug, Clone)]
pub struct SpaceTracker {
    /// Current capacity (slots)
    current: usize,

    /// Maximum capacity seen
    max: usize,

    /// Bytes per slot (key slot + height)
    slot_bytes: usize,

    /// Insertions performed so far (for the timeline)
    insertions: usize,

    /// Profile data (if enabled)
    profile: Option<SpaceProfile>,
}

impl SpaceTracker {
    /// Create new tracker for a store starting at `initial_capacity`
    pub fn new(initial_capacity: usize, slot_bytes: usize, profile_enabled: bool) -> Self {
        Self {
            current: initial_capacity,
            max: initial_capacity,
            slot_bytes,
            insertions: 0,
            profile: profile_enabled.then(|| SpaceProfile {
                peak_capacity: initial_capacity,
                peak_bytes: initial_capacity * slot_bytes,
                ..SpaceProfile::default()
            }),
        }
    }

    /// Record a strict reallocation from `old` to `new` slots
    pub fn record_growth(&mut self, old: usize, new: usize) {
        self.current = new;
        self.update_max();

        if let Some(ref mut p) = self.profile {
            p.reallocations += 1;
            p.slots_copied += old;
            p.timeline.push(GrowthEvent {
                insertions: self.insertions,
                capacity: new,
            });
        }
    }

    /// Record a rotation that relocated `moved` nodes
    pub fn record_rotation(&mut self, moved: usize) {
        if let Some(ref mut p) = self.profile {
            p.rotations += 1;
            p.nodes_relocated += moved;
        }
    }

    /// Record a completed insertion
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    fn update_max(&mut self) {
        self.max = self.max.max(self.current);

        if let Some(ref mut p) = self.profile {
            p.peak_capacity = self.max;
            p.peak_bytes = self.max * self.slot_bytes;
        }
    }

    /// Maximum capacity reached (slots)
    pub fn max_capacity(&self) -> usize {
        self.max
    }

    /// Maximum footprint reached (bytes)
    pub fn max_bytes(&self) -> usize {
        self.max * self.slot_bytes
    }

    /// Borrow the profile, if enabled
    pub fn profile(&self) -> Option<&SpaceProfile> {
        self.profile.as_ref()
    }

    /// Take profile (tracking continues without it)
    pub fn take_profile(&mut self) -> Option<SpaceProfile> {
        self.profile.take()
    }
}
