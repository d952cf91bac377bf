//! Completion controller
//!
//! ```text
//! Idle --trigger / timer--> Suggesting --accept--> Idle (+ ParameterAssist)
//!                               |
//!                               +--cancel / line change / focus loss--> Idle
//! ```
//!
//! Accepted and Cancelled are transient and settle back to Idle within the
//! call that caused them. Parameter assistance is orthogonal: it lives in
//! its own session until the caret leaves the inserted text.

use std::rc::Rc;
use std::time::Duration;

use completion_provider::Provider;
use completion_types::{Completion, CompletionKind};
use editor_core::{Document, DocumentEvent, Key, TextView};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{CompletionConfig, ConfigError};
use crate::cycle::ProviderCycle;
use crate::events::CompletionEvent;
use crate::insertion::{expand_template, plan_insertion};
use crate::param_context::{CloseAction, ParameterSession, SessionKind, SessionOutcome};

/// Controller error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("No completion providers")]
    NoProviders,

    #[error("No completion is selected")]
    NothingSelected,
}

/// Controller result
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Popup state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerState {
    Idle,
    Suggesting,
}

/// Whether the controller consumed a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The controller acted on the key; the host must not edit
    Handled,
    /// The host should apply its default editing for the key
    Passthrough,
}

/// Choices currently offered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    choices: Vec<Completion>,
    selected: Option<usize>,
    line: usize,
}

impl Popup {
    pub fn choices(&self) -> &[Completion] {
        &self.choices
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_completion(&self) -> Option<&Completion> {
        self.selected.and_then(|i| self.choices.get(i))
    }

    /// Line the popup was opened on
    pub fn line(&self) -> usize {
        self.line
    }
}

pub struct CompletionController {
    config: CompletionConfig,
    cycle: ProviderCycle,
    popup: Option<Popup>,
    session: Option<ParameterSession>,
    /// Time left before auto-activation fires
    activation_timer: Option<Duration>,
    now: Duration,
    events: Vec<CompletionEvent>,
}

impl CompletionController {
    pub fn new(provider: Rc<dyn Provider>, config: CompletionConfig) -> ControllerResult<Self> {
        Self::build(ProviderCycle::single(provider), config)
    }

    /// Controller that cycles through `providers` on repeated triggers
    pub fn with_providers(
        providers: Vec<Rc<dyn Provider>>,
        config: CompletionConfig,
    ) -> ControllerResult<Self> {
        let cycle = ProviderCycle::new(providers).ok_or(ControllerError::NoProviders)?;
        Self::build(cycle, config)
    }

    fn build(cycle: ProviderCycle, config: CompletionConfig) -> ControllerResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cycle,
            popup: None,
            session: None,
            activation_timer: None,
            now: Duration::ZERO,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    pub fn state(&self) -> ControllerState {
        if self.popup.is_some() {
            ControllerState::Suggesting
        } else {
            ControllerState::Idle
        }
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn is_popup_visible(&self) -> bool {
        self.popup.is_some()
    }

    pub fn session(&self) -> Option<&ParameterSession> {
        self.session.as_ref()
    }

    pub fn is_parameter_assist_active(&self) -> bool {
        self.session.is_some()
    }

    /// The provider chain answering queries (the current cycle entry)
    pub fn provider(&self) -> &dyn Provider {
        &self.cycle
    }

    pub fn provider_index(&self) -> usize {
        self.cycle.index()
    }

    pub fn is_activation_pending(&self) -> bool {
        self.activation_timer.is_some()
    }

    /// Logical time advanced by [`CompletionController::tick`]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Drains the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<CompletionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Completions for the word at `offset` (hover)
    pub fn completions_at(&self, doc: &Document, offset: usize) -> Vec<Completion> {
        self.cycle.completions_at(doc, offset)
    }

    // Keys

    /// Offers `key` to the controller before the host edits
    pub fn handle_key(&mut self, doc: &mut Document, key: Key) -> KeyOutcome {
        if self.popup.is_some() {
            match key {
                Key::Up => {
                    self.move_selection(false);
                    return KeyOutcome::Handled;
                }
                Key::Down => {
                    self.move_selection(true);
                    return KeyOutcome::Handled;
                }
                Key::Enter | Key::Tab => {
                    if self.accept(doc).is_ok() {
                        return KeyOutcome::Handled;
                    }
                    // Empty state: close it and treat the key normally
                    self.hide_popup();
                }
                Key::Escape => {
                    self.hide_popup();
                    return KeyOutcome::Handled;
                }
                Key::CtrlSpace => {
                    if self.cycle.len() > 1 {
                        self.cycle_provider(doc);
                    } else {
                        self.refresh(doc, false);
                    }
                    return KeyOutcome::Handled;
                }
                _ => {}
            }
        }

        if let Some(outcome) = self.handle_session_key(doc, key) {
            return outcome;
        }

        match key {
            Key::CtrlSpace => {
                self.trigger(doc);
                KeyOutcome::Handled
            }
            Key::Char(ch) if self.is_list_start(ch) => {
                self.list_start_typed(doc, ch);
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Passthrough,
        }
    }

    fn handle_session_key(&mut self, doc: &mut Document, key: Key) -> Option<KeyOutcome> {
        let session = self.session.as_mut()?;
        match key {
            Key::Tab | Key::BackTab => {
                let selected = if key == Key::Tab {
                    session.select_next(doc)
                } else {
                    session.select_previous(doc)
                };
                if let Some(index) = selected {
                    self.events.push(CompletionEvent::ParameterChanged {
                        id: session.id(),
                        index,
                        name: session.param_name(index).map(String::from),
                    });
                }
                self.absorb_own_edits(doc);
                Some(KeyOutcome::Handled)
            }
            Key::Enter => {
                session.finish_at_terminal(doc);
                self.end_session(doc);
                self.absorb_own_edits(doc);
                Some(KeyOutcome::Handled)
            }
            Key::Escape => {
                self.end_session(doc);
                Some(KeyOutcome::Handled)
            }
            Key::Char(ch) => match session.kind() {
                SessionKind::Function { list_end, .. } if ch == list_end => {
                    if session.close_char_typed(doc) == CloseAction::MovedPast {
                        self.end_session(doc);
                        self.absorb_own_edits(doc);
                        Some(KeyOutcome::Handled)
                    } else {
                        None
                    }
                }
                _ => None,
            },
            _ => None,
        }
    }

    fn is_list_start(&self, ch: char) -> bool {
        self.config.parameter_assistance
            && self.cycle.delimiters().is_some_and(|d| d.start() == ch)
    }

    /// Types the list start, then starts assistance for the function before it
    fn list_start_typed(&mut self, doc: &mut Document, ch: char) {
        self.hide_popup();
        self.activation_timer = None;
        doc.insert_at_caret(ch.encode_utf8(&mut [0; 4]));

        let found = self.cycle.parameterized_completions(doc);
        let Some(completion) = found.into_iter().next() else {
            // Nothing known: the host sees an ordinary edit
            return;
        };
        self.absorb_own_edits(doc);
        debug!("List start typed after '{}'", completion.input_text);
        let no_params = match &completion.kind {
            CompletionKind::Function { params, .. } => params.is_empty(),
            _ => false,
        };
        if no_params {
            self.insert_empty_list(doc, true);
        } else {
            self.activate_parameter_assist(doc, &completion, true);
        }
    }

    /// Closes a parameter list with nothing in it, caret after the end
    fn insert_empty_list(&self, doc: &mut Document, typed_list_start: bool) {
        let Some(delims) = self.cycle.delimiters() else {
            return;
        };
        let text = if typed_list_start {
            delims.end().to_string()
        } else {
            format!("{}{}", delims.start(), delims.end())
        };
        doc.insert_at_caret(&text);
    }

    // Popup

    /// Explicit trigger (Ctrl+Space with no popup)
    pub fn trigger(&mut self, doc: &mut Document) {
        self.activation_timer = None;
        self.refresh(doc, true);
    }

    /// Re-queries the provider and shows, hides or auto-inserts
    fn refresh(&mut self, doc: &mut Document, allow_auto_insert: bool) {
        let prefix = self.cycle.already_entered_text(doc);
        let mut choices = self.cycle.completions(doc);
        let empty_state = choices.iter().any(Completion::is_sentinel);
        choices.retain(|c| !c.is_sentinel());
        trace!("Prefix '{}' has {} choices", prefix, choices.len());

        if choices.is_empty() && !empty_state {
            self.hide_popup();
            return;
        }

        let single = choices.len() == 1 && !empty_state;
        if single
            && allow_auto_insert
            && self.config.auto_insert_single_choice
            && self.popup.is_none()
            && !prefix.is_empty()
        {
            let only = choices.remove(0);
            debug!("Auto-inserting sole choice '{}'", only.input_text);
            self.accept_completion(doc, &only);
            return;
        }

        self.show_popup(doc, choices);
    }

    fn show_popup(&mut self, doc: &Document, choices: Vec<Completion>) {
        if self.popup.is_none() {
            debug!("Showing popup with {} choices", choices.len());
        }
        let selected = if choices.is_empty() { None } else { Some(0) };
        self.events.push(CompletionEvent::PopupShown {
            choices: choices.clone(),
            selected,
        });
        self.popup = Some(Popup {
            choices,
            selected,
            line: doc.line_of(doc.caret()),
        });
    }

    /// Hides the popup (Cancelled settles to Idle)
    pub fn hide_popup(&mut self) {
        if self.popup.take().is_some() {
            debug!("Hiding popup");
            self.cycle.reset();
            self.events.push(CompletionEvent::PopupHidden);
        }
    }

    fn move_selection(&mut self, forward: bool) {
        let Some(popup) = self.popup.as_mut() else {
            return;
        };
        let count = popup.choices.len();
        if count == 0 {
            return;
        }
        let current = popup.selected.unwrap_or(0);
        let index = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        popup.selected = Some(index);
        self.events.push(CompletionEvent::SelectionChanged { index });
    }

    /// Moves to the next provider with results
    ///
    /// Returns true when the cycle wrapped to the first provider.
    pub fn cycle_provider(&mut self, doc: &mut Document) -> bool {
        let wrapped = self.cycle.advance(doc);
        let index = self.cycle.index();
        self.events.push(CompletionEvent::ProviderCycled { index, wrapped });
        if wrapped && self.config.hide_on_cycle_wrap {
            self.hide_popup();
        } else {
            self.refresh(doc, false);
        }
        wrapped
    }

    // Acceptance

    /// Accepts the selected popup choice
    pub fn accept(&mut self, doc: &mut Document) -> ControllerResult<()> {
        let completion = self
            .popup
            .as_ref()
            .and_then(Popup::selected_completion)
            .cloned()
            .ok_or(ControllerError::NothingSelected)?;
        self.accept_completion(doc, &completion);
        Ok(())
    }

    /// Replaces the already-entered text with `completion`
    pub fn accept_completion(&mut self, doc: &mut Document, completion: &Completion) {
        self.hide_popup();
        self.activation_timer = None;

        let entered = self.cycle.already_entered_text(doc).chars().count();
        let caret = doc.caret();
        let start = caret.saturating_sub(entered);
        let assist = self.config.parameter_assistance;

        match &completion.kind {
            CompletionKind::Template { template, .. } => {
                doc.replace_range(start, caret, "");
                doc.set_caret(start);
                if !assist {
                    let indent = doc.leading_whitespace(start);
                    let (text, cursor) = expand_template(template, &indent);
                    doc.replace_range(start, start, &text);
                    doc.set_caret(start + cursor);
                }
            }
            _ => {
                let replacement = completion
                    .replacement_text()
                    .unwrap_or(&completion.input_text);
                doc.replace_range(start, caret, replacement);
                doc.set_caret(start + replacement.chars().count());
            }
        }

        self.events.push(CompletionEvent::CompletionInserted {
            input_text: completion.input_text.clone(),
        });
        debug!("Inserted completion '{}'", completion.input_text);

        if assist {
            match &completion.kind {
                CompletionKind::Function { params, .. } if params.is_empty() => {
                    self.insert_empty_list(doc, false);
                }
                CompletionKind::Function { .. } | CompletionKind::Template { .. } => {
                    self.absorb_own_edits(doc);
                    self.activate_parameter_assist(doc, completion, false);
                }
                _ => {}
            }
        }
        self.absorb_own_edits(doc);
    }

    /// Inserts a parameterized completion's plan at the caret and starts a session
    ///
    /// Any running session ends first. Returns false when `completion` has
    /// no parameter list to insert.
    pub fn activate_parameter_assist(
        &mut self,
        doc: &mut Document,
        completion: &Completion,
        typed_list_start: bool,
    ) -> bool {
        let delimiters = self.cycle.delimiters().cloned();
        let indent = doc.leading_whitespace(doc.caret());
        let Some(plan) = plan_insertion(completion, delimiters.as_ref(), typed_list_start, &indent)
        else {
            return false;
        };

        self.end_session(doc);
        let kind = match (&completion.kind, &delimiters) {
            (CompletionKind::Function { .. }, Some(d)) => SessionKind::Function {
                list_start: d.start(),
                list_end: d.end(),
            },
            _ => SessionKind::Template,
        };
        let at = doc.caret();
        let session = ParameterSession::activate(doc, &plan, at, kind);
        // The session's own insertion is not a user edit
        doc.take_events();

        self.events.push(CompletionEvent::SessionStarted {
            id: session.id(),
            param_count: session.param_count(),
        });
        self.session = Some(session);
        true
    }

    /// Consumes events caused by the controller's own edits
    ///
    /// The session still sees them, so accepting inside a parameter
    /// propagates like typing would.
    fn absorb_own_edits(&mut self, doc: &mut Document) {
        let events = doc.take_events();
        if let Some(session) = self.session.as_mut() {
            session.observe(doc, &events);
        }
    }

    /// Ends the parameter session, keeping the text it inserted
    pub fn deactivate_parameter_assist(&mut self, doc: &mut Document) {
        self.end_session(doc);
    }

    fn end_session(&mut self, doc: &mut Document) {
        if let Some(mut session) = self.session.take() {
            session.deactivate(doc);
            self.events.push(CompletionEvent::SessionEnded { id: session.id() });
        }
    }

    // Host notifications

    /// Processes the host's edits and caret moves since the last call
    pub fn document_changed(&mut self, doc: &mut Document) {
        let events = doc.take_events();
        if events.is_empty() {
            return;
        }
        let inserted = events
            .iter()
            .any(|e| matches!(e, DocumentEvent::Inserted { .. }));
        let removed = events
            .iter()
            .any(|e| matches!(e, DocumentEvent::Removed { .. }));

        let left_session = match self.session.as_mut() {
            Some(session) if session.contains_caret(doc) => {
                session.observe(doc, &events);
                false
            }
            Some(_) => true,
            None => false,
        };
        if left_session {
            debug!("Caret left the parameter session");
            self.end_session(doc);
        }

        if let Some(line) = self.popup.as_ref().map(Popup::line) {
            self.activation_timer = None;
            if doc.line_of(doc.caret()) != line {
                self.hide_popup();
                return;
            }
            let prefix = self.cycle.already_entered_text(doc);
            let policy_applies = removed && !inserted;
            if prefix.is_empty() && (!policy_applies || self.config.hide_on_empty_prefix) {
                self.hide_popup();
            } else {
                self.refresh(doc, false);
            }
        } else if inserted
            && self.config.auto_activation_enabled
            && self.cycle.is_auto_activate_okay(doc)
        {
            trace!("Auto-activation timer restarted");
            self.activation_timer = Some(self.config.auto_activation_delay());
        } else {
            self.activation_timer = None;
        }
    }

    /// Advances logical time: runs deferred session work and the activation timer
    pub fn tick(&mut self, doc: &mut Document, elapsed: Duration) {
        self.now += elapsed;
        self.document_changed(doc);

        if let Some(session) = self.session.as_mut() {
            if session.run_tasks(doc) == SessionOutcome::Deactivated {
                let id = session.id();
                self.session = None;
                self.events.push(CompletionEvent::SessionEnded { id });
            }
        }

        if let Some(remaining) = self.activation_timer {
            if elapsed >= remaining {
                self.activation_timer = None;
                debug!("Auto-activation fired at {:?}", self.now);
                self.refresh(doc, false);
            } else {
                self.activation_timer = Some(remaining - elapsed);
            }
        }
    }

    /// Focus moved away from the text: everything closes
    pub fn focus_lost(&mut self, doc: &mut Document) {
        self.activation_timer = None;
        self.hide_popup();
        self.end_session(doc);
        self.absorb_own_edits(doc);
    }
}
