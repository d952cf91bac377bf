//! Minimal host: a document, a controller, and default key handling
//!
//! Drives the controller the way a real text component would. Every key is
//! offered to the controller first; unhandled keys get ordinary editing, and
//! the controller is told about the resulting change afterwards.

use std::rc::Rc;
use std::time::Duration;

use completion_provider::Provider;
use editor_core::{Document, Key};
use tracing::trace;

use crate::config::CompletionConfig;
use crate::controller::{CompletionController, ControllerResult, KeyOutcome};
use crate::events::CompletionEvent;
use crate::snapshot::CompletionSnapshot;

pub struct CompletionEditor {
    document: Document,
    controller: CompletionController,
}

impl CompletionEditor {
    pub fn new(provider: Rc<dyn Provider>, config: CompletionConfig) -> ControllerResult<Self> {
        Ok(Self {
            document: Document::new(),
            controller: CompletionController::new(provider, config)?,
        })
    }

    pub fn with_providers(
        providers: Vec<Rc<dyn Provider>>,
        config: CompletionConfig,
    ) -> ControllerResult<Self> {
        Ok(Self {
            document: Document::new(),
            controller: CompletionController::with_providers(providers, config)?,
        })
    }

    /// Replaces the document, leaving the caret at the end
    pub fn set_text(&mut self, text: &str) {
        self.controller.focus_lost(&mut self.document);
        self.document = Document::from_text(text);
        self.document.set_caret(text.chars().count());
        self.document.take_events();
    }

    pub fn text(&self) -> String {
        self.document.as_string()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn controller(&self) -> &CompletionController {
        &self.controller
    }

    /// Controller and document together, for direct controller calls
    pub fn parts_mut(&mut self) -> (&mut CompletionController, &mut Document) {
        (&mut self.controller, &mut self.document)
    }

    pub fn press(&mut self, key: Key) -> KeyOutcome {
        let outcome = self.controller.handle_key(&mut self.document, key);
        if outcome == KeyOutcome::Passthrough {
            trace!("Default edit for {:?}", key);
            apply_default_edit(&mut self.document, key);
        }
        self.controller.document_changed(&mut self.document);
        outcome
    }

    /// Types `text` one key at a time
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            let key = match ch {
                ' ' => Key::Space,
                '\n' => Key::Enter,
                '\t' => Key::Tab,
                other => Key::Char(other),
            };
            self.press(key);
        }
    }

    /// Replays raw terminal input; bytes with no key mapping are skipped
    pub fn press_bytes(&mut self, bytes: &[u8]) {
        for key in bytes.iter().filter_map(|&b| Key::from_ascii(b)) {
            self.press(key);
        }
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.controller.tick(&mut self.document, elapsed);
    }

    pub fn focus_lost(&mut self) {
        self.controller.focus_lost(&mut self.document);
    }

    pub fn take_events(&mut self) -> Vec<CompletionEvent> {
        self.controller.take_events()
    }

    pub fn snapshot(&self) -> CompletionSnapshot {
        CompletionSnapshot::capture(&self.document, &self.controller)
    }
}

fn apply_default_edit(doc: &mut Document, key: Key) {
    if let Some(ch) = key.typed_char() {
        doc.insert_at_caret(ch.encode_utf8(&mut [0; 4]));
        return;
    }
    match key {
        Key::Enter => doc.insert_at_caret("\n"),
        Key::Tab => doc.insert_at_caret("\t"),
        Key::Backspace => {
            doc.delete_backward();
        }
        Key::Delete => {
            doc.delete_forward();
        }
        Key::Left => doc.move_left(),
        Key::Right => doc.move_right(),
        Key::Up => doc.move_up(),
        Key::Down => doc.move_down(),
        Key::Home => doc.move_home(),
        Key::End => doc.move_end(),
        Key::Char(_) | Key::Space | Key::Escape | Key::BackTab | Key::CtrlSpace => {}
    }
}
