//! Completion snapshot for deterministic replay testing

use editor_core::{Document, RangeTag};
use serde::{Deserialize, Serialize};

use crate::controller::{CompletionController, ControllerState};

/// One parameter highlight as seen in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRange {
    pub start: usize,
    pub end: usize,
    pub terminal: bool,
}

/// Observable state of a document plus its completion controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSnapshot {
    pub text: String,
    pub caret: usize,
    pub selection_start: usize,
    pub state: ControllerState,
    pub popup_choices: Vec<String>,
    pub popup_selected: Option<usize>,
    pub session_ranges: Vec<SnapshotRange>,
    pub activation_pending: bool,
}

impl CompletionSnapshot {
    pub fn capture(doc: &Document, controller: &CompletionController) -> Self {
        let popup = controller.popup();
        let session_ranges = controller
            .session()
            .map(|session| {
                session
                    .ranges(doc)
                    .into_iter()
                    .map(|r| SnapshotRange {
                        start: r.start,
                        end: r.end,
                        terminal: r.tag == RangeTag::ParameterEnd,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            text: doc.as_string(),
            caret: doc.caret(),
            selection_start: doc.selection().start(),
            state: controller.state(),
            popup_choices: popup
                .map(|p| p.choices().iter().map(|c| c.input_text.clone()).collect())
                .unwrap_or_default(),
            popup_selected: popup.and_then(|p| p.selected()),
            session_ranges,
            activation_pending: controller.is_activation_pending(),
        }
    }

    /// Deterministic hash of the snapshot, for comparing replays
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(self.text.as_bytes());
        hasher.update(self.caret.to_le_bytes());
        hasher.update(self.selection_start.to_le_bytes());
        hasher.update([self.state as u8]);

        for choice in &self.popup_choices {
            hasher.update(choice.as_bytes());
            hasher.update(b"\n");
        }
        hasher.update(self.popup_selected.map_or(u64::MAX, |i| i as u64).to_le_bytes());

        for range in &self.session_ranges {
            hasher.update(range.start.to_le_bytes());
            hasher.update(range.end.to_le_bytes());
            hasher.update([range.terminal as u8]);
        }
        hasher.update([self.activation_pending as u8]);

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
