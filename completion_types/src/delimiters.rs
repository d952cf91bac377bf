//! Parameter-list punctuation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid parameter-list delimiter configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelimiterError {
    #[error("List start character {0:?} is a control character")]
    ControlStart(char),

    #[error("List end character {0:?} is a control character")]
    ControlEnd(char),

    #[error("Parameter separator must not be empty")]
    EmptySeparator,

    #[error("Parameter separator {0:?} contains a control character")]
    ControlSeparator(String),
}

/// Opening character, separator and closing character of a parameter list
///
/// Only obtainable through [`ParamListDelimiters::new`] (or deserialization,
/// which runs the same checks), so every value in circulation is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDelimiters", into = "RawDelimiters")]
pub struct ParamListDelimiters {
    start: char,
    separator: String,
    end: char,
}

#[derive(Serialize, Deserialize)]
struct RawDelimiters {
    start: char,
    separator: String,
    end: char,
}

impl ParamListDelimiters {
    pub fn new(
        start: char,
        separator: impl Into<String>,
        end: char,
    ) -> Result<Self, DelimiterError> {
        let separator = separator.into();
        if start.is_control() {
            return Err(DelimiterError::ControlStart(start));
        }
        if end.is_control() {
            return Err(DelimiterError::ControlEnd(end));
        }
        if separator.is_empty() {
            return Err(DelimiterError::EmptySeparator);
        }
        if separator.chars().any(char::is_control) {
            return Err(DelimiterError::ControlSeparator(separator));
        }
        Ok(Self {
            start,
            separator,
            end,
        })
    }

    /// `(`, `", "`, `)`
    pub fn c_style() -> Self {
        Self {
            start: '(',
            separator: ", ".to_string(),
            end: ')',
        }
    }

    pub fn start(&self) -> char {
        self.start
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn end(&self) -> char {
        self.end
    }
}

impl Default for ParamListDelimiters {
    fn default() -> Self {
        Self::c_style()
    }
}

impl TryFrom<RawDelimiters> for ParamListDelimiters {
    type Error = DelimiterError;

    fn try_from(raw: RawDelimiters) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.separator, raw.end)
    }
}

impl From<ParamListDelimiters> for RawDelimiters {
    fn from(delims: ParamListDelimiters) -> Self {
        Self {
            start: delims.start,
            separator: delims.separator,
            end: delims.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_delimiters() {
        let delims = ParamListDelimiters::new('[', "; ", ']').unwrap();
        assert_eq!(delims.start(), '[');
        assert_eq!(delims.separator(), "; ");
        assert_eq!(delims.end(), ']');
    }

    #[test]
    fn test_control_start_rejected() {
        assert_eq!(
            ParamListDelimiters::new('\u{7}', ", ", ')'),
            Err(DelimiterError::ControlStart('\u{7}'))
        );
    }

    #[test]
    fn test_control_end_rejected() {
        assert_eq!(
            ParamListDelimiters::new('(', ", ", '\n'),
            Err(DelimiterError::ControlEnd('\n'))
        );
    }

    #[test]
    fn test_empty_separator_rejected() {
        assert_eq!(
            ParamListDelimiters::new('(', "", ')'),
            Err(DelimiterError::EmptySeparator)
        );
    }

    #[test]
    fn test_control_separator_rejected() {
        assert!(matches!(
            ParamListDelimiters::new('(', ",\t", ')'),
            Err(DelimiterError::ControlSeparator(_))
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ParamListDelimiters =
            serde_json::from_str(r#"{"start":"(","separator":", ","end":")"}"#).unwrap();
        assert_eq!(ok, ParamListDelimiters::c_style());

        let bad: Result<ParamListDelimiters, _> =
            serde_json::from_str(r#"{"start":"(","separator":"","end":")"}"#);
        assert!(bad.is_err());
    }
}
