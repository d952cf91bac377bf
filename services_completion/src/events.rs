//! Events emitted by the controller for the presentation layer

use completion_types::Completion;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one parameter-assistance session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionEvent {
    /// The popup was shown or its contents changed; an empty list is an
    /// intentional empty state
    PopupShown {
        choices: Vec<Completion>,
        selected: Option<usize>,
    },
    /// The popup selection moved
    SelectionChanged { index: usize },
    PopupHidden,
    /// A completion was inserted into the buffer
    CompletionInserted { input_text: String },
    /// The provider cycle moved to `index`
    ProviderCycled { index: usize, wrapped: bool },
    SessionStarted {
        id: SessionId,
        param_count: usize,
    },
    /// A different parameter range was selected
    ParameterChanged {
        id: SessionId,
        index: usize,
        name: Option<String>,
    },
    SessionEnded { id: SessionId },
}
