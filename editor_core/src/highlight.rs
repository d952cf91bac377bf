//! Tagged, edit-tracking ranges
//!
//! Ranges back the parameter highlights of a completion session. A range's
//! start is left-biased and its end right-biased, so text typed at either
//! edge of a range becomes part of it. This holds for a zero-length range
//! too, including one created at offset 0.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::anchor::Bias;

/// Visual/semantic tag of a tracked range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum RangeTag {
    /// An editable parameter
    Parameter,
    /// The terminal "cursor" parameter
    ParameterEnd,
    /// A copy of a parameter that mirrors its source
    ParameterCopy,
}

/// Handle to a range owned by a [`RangeTracker`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct RangeId(u64);

/// A range as currently tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct TrackedRange {
    pub start: usize,
    pub end: usize,
    pub tag: RangeTag,
}

impl TrackedRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True if `offset` lies within `[start, end]` (both edges inclusive)
    pub fn touches(&self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}

/// Arena of tagged ranges keyed by handle
#[derive(Debug, Clone, Default)]
pub struct RangeTracker {
    next_id: u64,
    ranges: BTreeMap<RangeId, TrackedRange>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a range. `start` and `end` are swapped if reversed.
    pub fn add_range(&mut self, start: usize, end: usize, tag: RangeTag) -> RangeId {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let id = RangeId(self.next_id);
        self.next_id += 1;
        self.ranges.insert(id, TrackedRange { start, end, tag });
        id
    }

    /// Removes a range. Returns false if it was already removed.
    pub fn remove_range(&mut self, id: RangeId) -> bool {
        self.ranges.remove(&id).is_some()
    }

    /// Moves a range to new bounds. Returns false if it was removed.
    pub fn set_bounds(&mut self, id: RangeId, start: usize, end: usize) -> bool {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        match self.ranges.get_mut(&id) {
            Some(range) => {
                range.start = start;
                range.end = end;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: RangeId) -> Option<TrackedRange> {
        self.ranges.get(&id).copied()
    }

    /// All ranges carrying `tag`, in creation order
    pub fn ranges_with_tag(&self, tag: RangeTag) -> Vec<(RangeId, TrackedRange)> {
        self.ranges
            .iter()
            .filter(|(_, r)| r.tag == tag)
            .map(|(id, r)| (*id, *r))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub(crate) fn adjust_for_insert(&mut self, at: usize, len: usize) {
        for range in self.ranges.values_mut() {
            range.start = Bias::Left.shift_for_insert(range.start, at, len);
            range.end = Bias::Right.shift_for_insert(range.end, at, len);
        }
    }

    pub(crate) fn adjust_for_remove(&mut self, at: usize, len: usize) {
        for range in self.ranges.values_mut() {
            range.start = Bias::shift_for_remove(range.start, at, len);
            range.end = Bias::shift_for_remove(range.end, at, len);
        }
    }
}
