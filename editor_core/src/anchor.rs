//! Tracked offsets
//!
//! An anchor is an offset "attached" to a point in the document. Inserts
//! strictly before it shift it forward; an insert exactly at it shifts it
//! only when it has [`Bias::Right`]. Removals that overlap it clamp it to
//! the start of the removed span.

use alloc::collections::BTreeMap;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Which side of an insert at the anchor's own offset the anchor sticks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Bias {
    /// Stays put when text is inserted exactly at the anchor
    Left,
    /// Moves past text inserted exactly at the anchor
    Right,
}

impl Bias {
    /// Offset after `len` characters were inserted at `at`
    pub fn shift_for_insert(self, offset: usize, at: usize, len: usize) -> usize {
        if at < offset || (at == offset && self == Bias::Right) {
            offset + len
        } else {
            offset
        }
    }

    /// Offset after `len` characters were removed starting at `at`
    pub fn shift_for_remove(offset: usize, at: usize, len: usize) -> usize {
        let end = at + len;
        if offset >= end {
            offset - len
        } else if offset > at {
            at
        } else {
            offset
        }
    }
}

/// Handle to an anchor owned by an [`AnchorArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct AnchorId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    offset: usize,
    bias: Bias,
}

/// Arena of anchors keyed by handle
#[derive(Debug, Clone, Default)]
pub struct AnchorArena {
    next_id: u64,
    anchors: BTreeMap<AnchorId, Anchor>,
}

impl AnchorArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an anchor at `offset`
    pub fn create(&mut self, offset: usize, bias: Bias) -> AnchorId {
        let id = AnchorId(self.next_id);
        self.next_id += 1;
        self.anchors.insert(id, Anchor { offset, bias });
        id
    }

    /// Current offset of an anchor, if it is still alive
    pub fn offset(&self, id: AnchorId) -> Option<usize> {
        self.anchors.get(&id).map(|a| a.offset)
    }

    /// Releases an anchor. Returns false if it was already released.
    pub fn release(&mut self, id: AnchorId) -> bool {
        self.anchors.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub(crate) fn adjust_for_insert(&mut self, at: usize, len: usize) {
        for anchor in self.anchors.values_mut() {
            anchor.offset = anchor.bias.shift_for_insert(anchor.offset, at, len);
        }
    }

    pub(crate) fn adjust_for_remove(&mut self, at: usize, len: usize) {
        for anchor in self.anchors.values_mut() {
            anchor.offset = Bias::shift_for_remove(anchor.offset, at, len);
        }
    }
}
