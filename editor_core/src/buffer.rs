//! Document storage, caret and edit events

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorArena, AnchorId, Bias};
use crate::highlight::RangeTracker;
use crate::view::TextView;

/// Caret plus the other end of the selection
///
/// `caret` is where typing happens; `mark` equals `caret` when nothing is
/// selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Selection {
    pub mark: usize,
    pub caret: usize,
}

impl Selection {
    pub const fn caret_at(offset: usize) -> Self {
        Self {
            mark: offset,
            caret: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.mark.min(self.caret)
    }

    pub fn end(&self) -> usize {
        self.mark.max(self.caret)
    }

    pub fn is_empty(&self) -> bool {
        self.mark == self.caret
    }
}

/// Change notification recorded by a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum DocumentEvent {
    /// `len` characters were inserted at `offset`
    Inserted { offset: usize, len: usize },
    /// `len` characters were removed starting at `offset`
    Removed { offset: usize, len: usize },
    /// The caret moved
    CaretMoved { from: usize, to: usize },
}

/// Text document with caret, tracked anchors and tracked ranges
///
/// Every mutation adjusts anchors and ranges and records a
/// [`DocumentEvent`]; the host drains them with [`Document::take_events`].
#[derive(Debug, Clone, Default)]
pub struct Document {
    text: Vec<char>,
    selection: Selection,
    anchors: AnchorArena,
    ranges: RangeTracker,
    events: Vec<DocumentEvent>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(content: &str) -> Self {
        Self {
            text: content.chars().collect(),
            ..Self::default()
        }
    }

    pub fn as_string(&self) -> String {
        self.text.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.iter().filter(|ch| **ch == '\n').count() + 1
    }

    /// Text of line `row` without its terminator
    pub fn line(&self, row: usize) -> Option<String> {
        self.as_string().split('\n').nth(row).map(String::from)
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn caret(&self) -> usize {
        self.selection.caret
    }

    /// Selected text, empty when nothing is selected
    pub fn selected_text(&self) -> String {
        self.slice(self.selection.start(), self.selection.end())
    }

    /// Moves the caret, collapsing the selection
    pub fn set_caret(&mut self, offset: usize) {
        let offset = offset.min(self.text.len());
        self.set_selection(Selection::caret_at(offset));
    }

    /// Selects `[start, end)` with the caret at `end`
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.text.len();
        self.set_selection(Selection {
            mark: start.min(len),
            caret: end.min(len),
        });
    }

    fn set_selection(&mut self, selection: Selection) {
        let from = self.selection.caret;
        self.selection = selection;
        if from != selection.caret {
            self.events.push(DocumentEvent::CaretMoved {
                from,
                to: selection.caret,
            });
        }
    }

    /// Types `text` at the caret, replacing the selection
    pub fn insert_at_caret(&mut self, text: &str) {
        let start = self.selection.start();
        let end = self.selection.end();
        self.replace_range(start, end, text);
        let inserted = text.chars().count();
        self.set_caret(start + inserted);
    }

    /// Deletes the selection, or the character before the caret (backspace)
    ///
    /// Returns false if there was nothing to delete.
    pub fn delete_backward(&mut self) -> bool {
        if !self.selection.is_empty() {
            let (start, end) = (self.selection.start(), self.selection.end());
            self.replace_range(start, end, "");
            self.set_caret(start);
            return true;
        }
        let caret = self.caret();
        if caret == 0 {
            return false;
        }
        self.replace_range(caret - 1, caret, "");
        self.set_caret(caret - 1);
        true
    }

    /// Deletes the selection, or the character at the caret
    pub fn delete_forward(&mut self) -> bool {
        if !self.selection.is_empty() {
            let (start, end) = (self.selection.start(), self.selection.end());
            self.replace_range(start, end, "");
            self.set_caret(start);
            return true;
        }
        let caret = self.caret();
        if caret >= self.text.len() {
            return false;
        }
        self.replace_range(caret, caret + 1, "");
        true
    }

    /// Replaces `[start, end)` with `text`
    ///
    /// The caret and selection follow the edit like left-biased anchors.
    pub fn replace_range(&mut self, start: usize, end: usize, text: &str) {
        let len = self.text.len();
        let start = start.min(len);
        let end = end.clamp(start, len);

        if end > start {
            self.text.drain(start..end);
            let removed = end - start;
            self.anchors.adjust_for_remove(start, removed);
            self.ranges.adjust_for_remove(start, removed);
            self.selection.mark = Bias::shift_for_remove(self.selection.mark, start, removed);
            self.selection.caret = Bias::shift_for_remove(self.selection.caret, start, removed);
            self.events.push(DocumentEvent::Removed {
                offset: start,
                len: removed,
            });
        }

        let inserted: Vec<char> = text.chars().collect();
        if !inserted.is_empty() {
            let count = inserted.len();
            self.text.splice(start..start, inserted);
            self.anchors.adjust_for_insert(start, count);
            self.ranges.adjust_for_insert(start, count);
            self.selection.mark = Bias::Left.shift_for_insert(self.selection.mark, start, count);
            self.selection.caret = Bias::Left.shift_for_insert(self.selection.caret, start, count);
            self.events.push(DocumentEvent::Inserted {
                offset: start,
                len: count,
            });
        }
    }

    // Caret movement

    pub fn move_left(&mut self) {
        let caret = self.caret();
        if caret > 0 {
            self.set_caret(caret - 1);
        }
    }

    pub fn move_right(&mut self) {
        let caret = self.caret();
        if caret < self.text.len() {
            self.set_caret(caret + 1);
        }
    }

    pub fn move_up(&mut self) {
        let caret = self.caret();
        let line_start = self.line_start(caret);
        if line_start == 0 {
            return;
        }
        let col = caret - line_start;
        let prev_start = self.line_start(line_start - 1);
        let prev_len = line_start - 1 - prev_start;
        self.set_caret(prev_start + col.min(prev_len));
    }

    pub fn move_down(&mut self) {
        let caret = self.caret();
        let line_end = self.line_end(caret);
        if line_end >= self.text.len() {
            return;
        }
        let col = caret - self.line_start(caret);
        let next_start = line_end + 1;
        let next_len = self.line_end(next_start) - next_start;
        self.set_caret(next_start + col.min(next_len));
    }

    pub fn move_home(&mut self) {
        let start = self.line_start(self.caret());
        self.set_caret(start);
    }

    pub fn move_end(&mut self) {
        let end = self.line_end(self.caret());
        self.set_caret(end);
    }

    // Tracking

    pub fn create_anchor(&mut self, offset: usize, bias: Bias) -> AnchorId {
        self.anchors.create(offset.min(self.text.len()), bias)
    }

    pub fn anchor_offset(&self, id: AnchorId) -> Option<usize> {
        self.anchors.offset(id)
    }

    pub fn release_anchor(&mut self, id: AnchorId) -> bool {
        self.anchors.release(id)
    }

    pub fn ranges(&self) -> &RangeTracker {
        &self.ranges
    }

    pub fn ranges_mut(&mut self) -> &mut RangeTracker {
        &mut self.ranges
    }

    /// Drains the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<DocumentEvent> {
        core::mem::take(&mut self.events)
    }
}

impl TextView for Document {
    fn len_chars(&self) -> usize {
        self.text.len()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(offset).copied()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let len = self.text.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        self.text[start..end].iter().collect()
    }

    fn caret_offset(&self) -> usize {
        self.selection.caret
    }

    fn line_of(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        self.text[..end].iter().filter(|ch| **ch == '\n').count()
    }
}
