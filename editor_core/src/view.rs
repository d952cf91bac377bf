//! Read-only text view consumed by completion providers

use alloc::string::String;
use alloc::vec::Vec;

/// Read-only access to a text buffer and its caret
///
/// Offsets are character offsets. Providers only ever read through this
/// trait; mutation goes through [`crate::Document`].
pub trait TextView {
    /// Number of characters in the buffer
    fn len_chars(&self) -> usize;

    /// Character at `offset`, if in bounds
    fn char_at(&self, offset: usize) -> Option<char>;

    /// Text in `[start, end)`, clamped to the buffer
    fn slice(&self, start: usize, end: usize) -> String;

    /// Current caret offset
    fn caret_offset(&self) -> usize;

    /// Zero-based line containing `offset`
    fn line_of(&self, offset: usize) -> usize;

    /// Offset of the first character of the line containing `offset`
    fn line_start(&self, offset: usize) -> usize {
        let mut pos = offset.min(self.len_chars());
        while pos > 0 {
            if self.char_at(pos - 1) == Some('\n') {
                break;
            }
            pos -= 1;
        }
        pos
    }

    /// Offset of the line terminator (or buffer end) of the line containing `offset`
    fn line_end(&self, offset: usize) -> usize {
        let len = self.len_chars();
        let mut pos = offset.min(len);
        while pos < len {
            if self.char_at(pos) == Some('\n') {
                break;
            }
            pos += 1;
        }
        pos
    }

    /// Walks backward from `offset`, within its line, while `accept` holds
    fn text_before(&self, offset: usize, accept: &dyn Fn(char) -> bool) -> String {
        let floor = self.line_start(offset);
        let mut start = offset.min(self.len_chars());
        while start > floor {
            match self.char_at(start - 1) {
                Some(ch) if accept(ch) => start -= 1,
                _ => break,
            }
        }
        self.slice(start, offset)
    }

    /// Leading spaces and tabs of the line containing `offset`
    fn leading_whitespace(&self, offset: usize) -> String {
        let start = self.line_start(offset);
        let end = self.line_end(offset);
        let mut ws = Vec::new();
        for pos in start..end {
            match self.char_at(pos) {
                Some(ch) if ch == ' ' || ch == '\t' => ws.push(ch),
                _ => break,
            }
        }
        ws.into_iter().collect()
    }
}
