//! Platform-independent key representation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Platform-independent key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Key {
    // Printable characters
    Char(char),
    Space,

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,

    // Special keys
    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,
    /// Shift+Tab
    BackTab,

    /// Ctrl+Space, the usual completion trigger
    CtrlSpace,
}

impl Key {
    /// Convert ASCII byte to Key (for terminal input translation)
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Key::CtrlSpace),
            0x1B => Some(Key::Escape),
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            b'\t' => Some(Key::Tab),
            b' ' => Some(Key::Space),
            ch if (0x21..0x7F).contains(&ch) => Some(Key::Char(ch as char)),
            _ => None,
        }
    }

    /// The character this key types, if any
    pub fn typed_char(&self) -> Option<char> {
        match self {
            Key::Char(ch) => Some(*ch),
            Key::Space => Some(' '),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii() {
        assert_eq!(Key::from_ascii(b'h'), Some(Key::Char('h')));
        assert_eq!(Key::from_ascii(b' '), Some(Key::Space));
        assert_eq!(Key::from_ascii(b'('), Some(Key::Char('(')));
        assert_eq!(Key::from_ascii(0x1B), Some(Key::Escape));
        assert_eq!(Key::from_ascii(0x00), Some(Key::CtrlSpace));
        assert_eq!(Key::from_ascii(b'\t'), Some(Key::Tab));
        assert_eq!(Key::from_ascii(0x01), None);
    }

    #[test]
    fn test_typed_char() {
        assert_eq!(Key::Char('x').typed_char(), Some('x'));
        assert_eq!(Key::Space.typed_char(), Some(' '));
        assert_eq!(Key::Tab.typed_char(), None);
    }
}
