//! Parameter assistance session
//!
//! One session lives while the caret stays inside the text a parameterized
//! completion inserted. It owns the tracked parameter ranges, mirrors edits
//! of a parameter into its copies, and moves the selection between
//! parameters.
//!
//! ## Invariants
//!
//! - The terminal range is always the last parameter
//! - Edits made while propagating are never observed as user edits
//! - Session ranges never overlap: an edit belongs to one range only
//! - Pending propagation runs before deactivation
//! - Deactivation releases every range and anchor, and is idempotent

use editor_core::{
    AnchorId, Bias, Document, DocumentEvent, RangeId, RangeTag, TextView, TrackedRange,
};
use tracing::{debug, trace};

use crate::events::SessionId;
use crate::insertion::InsertionPlan;
use crate::task_queue::{SessionTask, TaskQueue};

/// What inserted the session's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKind {
    Function { list_start: char, list_end: char },
    Template,
}

/// Result of running deferred work or handling a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Continue,
    Deactivated,
}

/// What to do with a typed closing delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseAction {
    /// Let the character be typed normally
    InsertLiteral,
    /// The caret moved past the existing delimiter and the session ended
    MovedPast,
}

#[derive(Debug, Clone)]
struct SessionParam {
    range: RangeId,
    name: Option<String>,
}

#[derive(Debug, Clone)]
struct CopyBinding {
    source: String,
    range: RangeId,
}

pub struct ParameterSession {
    id: SessionId,
    kind: SessionKind,
    min_offset: usize,
    max_anchor: AnchorId,
    params: Vec<SessionParam>,
    copies: Vec<CopyBinding>,
    /// Every range of the session (copies included) in document order
    layout: Vec<RangeId>,
    last_selected: Option<usize>,
    propagating: bool,
    tasks: TaskQueue<SessionTask>,
    active: bool,
}

impl ParameterSession {
    /// Inserts `plan` at `at` and selects its first range
    pub fn activate(
        doc: &mut Document,
        plan: &InsertionPlan,
        at: usize,
        kind: SessionKind,
    ) -> Self {
        doc.replace_range(at, at, &plan.text);
        let max_anchor = doc.create_anchor(at + plan.len(), Bias::Right);

        let params: Vec<SessionParam> = plan
            .ranges
            .iter()
            .map(|r| SessionParam {
                range: doc.ranges_mut().add_range(at + r.start, at + r.end, r.tag),
                name: r.name.clone(),
            })
            .collect();
        let copies: Vec<CopyBinding> = plan
            .copies
            .iter()
            .map(|c| CopyBinding {
                source: c.source.clone(),
                range: doc
                    .ranges_mut()
                    .add_range(at + c.start, at + c.end, RangeTag::ParameterCopy),
            })
            .collect();

        let mut layout: Vec<(RangeId, TrackedRange)> = params
            .iter()
            .map(|p| p.range)
            .chain(copies.iter().map(|c| c.range))
            .filter_map(|id| doc.ranges().get(id).map(|r| (id, r)))
            .collect();
        layout.sort_by_key(|(_, r)| (r.start, r.end));

        let mut session = Self {
            id: SessionId::new(),
            kind,
            min_offset: at + plan.min_offset,
            max_anchor,
            params,
            copies,
            layout: layout.into_iter().map(|(id, _)| id).collect(),
            last_selected: None,
            propagating: false,
            tasks: TaskQueue::new(),
            active: true,
        };
        session.select(doc, 0);
        debug!(
            "Started {} with {} parameters at {}",
            session.id,
            session.param_count(),
            at
        );
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn min_offset(&self) -> usize {
        self.min_offset
    }

    pub fn max_offset(&self, doc: &Document) -> usize {
        doc.anchor_offset(self.max_anchor).unwrap_or(self.min_offset)
    }

    /// Number of parameters, not counting the terminal range
    pub fn param_count(&self) -> usize {
        self.params.len().saturating_sub(1)
    }

    pub fn param_name(&self, index: usize) -> Option<&str> {
        self.params.get(index).and_then(|p| p.name.as_deref())
    }

    /// Index of the most recently selected range
    pub fn selected_index(&self) -> Option<usize> {
        self.last_selected
    }

    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    fn terminal_index(&self) -> usize {
        self.params.len().saturating_sub(1)
    }

    fn range(&self, doc: &Document, index: usize) -> Option<TrackedRange> {
        self.params.get(index).and_then(|p| doc.ranges().get(p.range))
    }

    /// Parameter ranges in logical order, terminal last
    pub fn ranges(&self, doc: &Document) -> Vec<TrackedRange> {
        (0..self.params.len())
            .filter_map(|i| self.range(doc, i))
            .collect()
    }

    pub fn copy_ranges(&self, doc: &Document) -> Vec<TrackedRange> {
        self.copies
            .iter()
            .filter_map(|c| doc.ranges().get(c.range))
            .collect()
    }

    /// Current text of parameter `index`
    pub fn param_text(&self, doc: &Document, index: usize) -> Option<String> {
        self.range(doc, index).map(|r| doc.slice(r.start, r.end))
    }

    pub fn contains_caret(&self, doc: &Document) -> bool {
        let caret = doc.caret();
        caret >= self.min_offset && caret <= self.max_offset(doc)
    }

    /// Range the caret is in, preferring the last selected one
    pub fn current_index(&self, doc: &Document) -> Option<usize> {
        let caret = doc.caret();
        if let Some(last) = self.last_selected {
            if self.range(doc, last).is_some_and(|r| r.touches(caret)) {
                return Some(last);
            }
        }
        (0..self.params.len()).find(|&i| self.range(doc, i).is_some_and(|r| r.touches(caret)))
    }

    fn select(&mut self, doc: &mut Document, index: usize) -> Option<usize> {
        let range = self.range(doc, index)?;
        doc.select(range.start, range.end);
        self.last_selected = Some(index);
        trace!("{} selected parameter {}", self.id, index);
        Some(index)
    }

    /// Tab: moves to the next parameter
    pub fn select_next(&mut self, doc: &mut Document) -> Option<usize> {
        if !self.active {
            return None;
        }
        let terminal = self.terminal_index();
        let caret = doc.caret();

        let on_terminal = self.last_selected == Some(terminal)
            && self.range(doc, terminal).is_some_and(|r| r.touches(caret));
        if on_terminal {
            return self.select(doc, 0);
        }

        let next = (0..terminal)
            .filter_map(|i| self.range(doc, i).map(|r| (i, r.start)))
            .filter(|&(_, start)| start > caret)
            .min_by_key(|&(_, start)| start)
            .map(|(i, _)| i);

        match next {
            Some(index) => self.select(doc, index),
            None if self.last_selected != Some(terminal) => self.select(doc, terminal),
            None => self.select(doc, 0),
        }
    }

    /// Shift-tab: moves to the previous parameter
    pub fn select_previous(&mut self, doc: &mut Document) -> Option<usize> {
        if !self.active {
            return None;
        }
        let terminal = self.terminal_index();
        match self.current_index(doc) {
            Some(index) if index == terminal => {
                let last_param = terminal.checked_sub(1).unwrap_or(terminal);
                self.select(doc, last_param)
            }
            Some(0) => {
                if self.last_selected == Some(0) {
                    self.select(doc, terminal)
                } else {
                    self.select(doc, 0)
                }
            }
            Some(index) => self.select(doc, index - 1),
            None => {
                let caret = doc.caret();
                let before = (0..terminal)
                    .rev()
                    .find(|&i| self.range(doc, i).is_some_and(|r| r.start < caret));
                self.select(doc, before.unwrap_or(0))
            }
        }
    }

    /// Notes buffer edits; edits inside the window schedule propagation
    ///
    /// The edited parameter is recorded with the task, so moving to another
    /// parameter before the next tick still propagates the right one.
    pub fn observe(&mut self, doc: &mut Document, events: &[DocumentEvent]) {
        if !self.active || self.propagating {
            return;
        }
        let (min, max) = (self.min_offset, self.max_offset(doc));
        let inside = events.iter().any(|event| match event {
            DocumentEvent::Inserted { offset, .. } | DocumentEvent::Removed { offset, .. } => {
                *offset >= min && *offset <= max
            }
            DocumentEvent::CaretMoved { .. } => false,
        });
        if !inside {
            return;
        }
        let Some(param) = self.current_index(doc) else {
            return;
        };
        self.separate(doc, self.params[param].range);
        if self.tasks.post(SessionTask::Propagate { param }) {
            trace!("{} scheduled propagation of parameter {}", self.id, param);
        }
    }

    /// Pushes neighbouring ranges off `owner`
    ///
    /// A range's start is left-biased, so text typed at the end of one range
    /// also lands at the start of a range touching it. The owner keeps the
    /// text; later ranges start after it and earlier ones end before it.
    fn separate(&self, doc: &mut Document, owner: RangeId) {
        let Some(owner_range) = doc.ranges().get(owner) else {
            return;
        };
        let Some(position) = self.layout.iter().position(|id| *id == owner) else {
            return;
        };
        for (i, id) in self.layout.iter().enumerate() {
            let Some(range) = doc.ranges().get(*id) else {
                continue;
            };
            let (start, end) = match i.cmp(&position) {
                std::cmp::Ordering::Equal => continue,
                std::cmp::Ordering::Greater => {
                    let start = range.start.max(owner_range.end);
                    (start, range.end.max(start))
                }
                std::cmp::Ordering::Less => {
                    let end = range.end.min(owner_range.start);
                    (range.start.min(end), end)
                }
            };
            if (start, end) != (range.start, range.end) {
                doc.ranges_mut().set_bounds(*id, start, end);
            }
        }
    }

    /// Runs the work deferred since the last tick
    ///
    /// Expects the document's events to have been drained already; edits
    /// made here are consumed before returning.
    pub fn run_tasks(&mut self, doc: &mut Document) -> SessionOutcome {
        if !self.active {
            return SessionOutcome::Deactivated;
        }
        let outcome = self.drain_tasks(doc);
        if outcome == SessionOutcome::Deactivated {
            self.deactivate(doc);
        }
        outcome
    }

    /// Runs every pending task, even after one asks for deactivation
    fn drain_tasks(&mut self, doc: &mut Document) -> SessionOutcome {
        let Some(batch) = self.tasks.begin_batch() else {
            return SessionOutcome::Continue;
        };
        if !batch.is_empty() {
            trace!(
                "{} batch {} runs {} tasks",
                self.id,
                self.tasks.tick_count(),
                batch.len()
            );
        }

        let mut outcome = SessionOutcome::Continue;
        for task in batch {
            match task {
                SessionTask::Propagate { param } => {
                    if self.propagate(doc, param) == SessionOutcome::Deactivated {
                        outcome = SessionOutcome::Deactivated;
                    }
                }
            }
        }
        self.tasks.end_batch();
        outcome
    }

    fn propagate(&mut self, doc: &mut Document, index: usize) -> SessionOutcome {
        if index == self.terminal_index() {
            debug!("{} edited its terminal range", self.id);
            return SessionOutcome::Deactivated;
        }
        let (Some(name), Some(source)) = (self.params[index].name.clone(), self.range(doc, index))
        else {
            return SessionOutcome::Continue;
        };
        let text = doc.slice(source.start, source.end);
        let len = text.chars().count();

        self.propagating = true;
        let mut replaced = false;
        for copy in self.copies.iter().filter(|c| c.source == name) {
            let Some(range) = doc.ranges().get(copy.range) else {
                continue;
            };
            if doc.slice(range.start, range.end) == text {
                continue;
            }
            doc.replace_range(range.start, range.end, &text);
            doc.ranges_mut()
                .set_bounds(copy.range, range.start, range.start + len);
            self.separate(doc, copy.range);
            replaced = true;
        }
        if replaced {
            // Our own replacements are not user edits
            doc.take_events();
        }
        self.propagating = false;

        trace!("{} propagated '{}' = '{}'", self.id, name, text);
        SessionOutcome::Continue
    }

    /// Handles a typed closing delimiter (function sessions only)
    ///
    /// Counts list characters in the current parameter only; strings and
    /// comments inside it are not understood.
    pub fn close_char_typed(&mut self, doc: &mut Document) -> CloseAction {
        let SessionKind::Function {
            list_start,
            list_end,
        } = self.kind
        else {
            return CloseAction::InsertLiteral;
        };
        if !self.active {
            return CloseAction::InsertLiteral;
        }

        let text = self
            .current_index(doc)
            .and_then(|i| self.param_text(doc, i))
            .unwrap_or_default();
        let opens = text.chars().filter(|&c| c == list_start).count();
        let closes = text.chars().filter(|&c| c == list_end).count();
        if opens > closes {
            return CloseAction::InsertLiteral;
        }

        // Only a caret right before the delimiter can step over it
        let max = self.max_offset(doc);
        if doc.caret() + 1 == max {
            doc.set_caret(max);
            self.deactivate(doc);
            CloseAction::MovedPast
        } else {
            CloseAction::InsertLiteral
        }
    }

    /// Enter: jumps to the terminal offset and ends the session
    pub fn finish_at_terminal(&mut self, doc: &mut Document) {
        if let Some(range) = self.range(doc, self.terminal_index()) {
            doc.set_caret(range.start);
        }
        self.deactivate(doc);
    }

    /// Releases every tracked range and anchor
    pub fn deactivate(&mut self, doc: &mut Document) {
        if !self.active {
            return;
        }
        self.drain_tasks(doc);
        self.active = false;
        for param in &self.params {
            doc.ranges_mut().remove_range(param.range);
        }
        for copy in &self.copies {
            doc.ranges_mut().remove_range(copy.range);
        }
        doc.release_anchor(self.max_anchor);
        self.tasks.clear();
        debug!("Ended {}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insertion::{plan_function, plan_template, PlannedRange};
    use completion_types::{ParamListDelimiters, Parameter, Template};

    const FOR_LOOP: &str = "for (int ${i} = 0; ${i} < ${n}; ${i}++) { ${cursor} }";

    fn template_session(source: &str) -> (Document, ParameterSession) {
        let mut doc = Document::new();
        let plan = plan_template(&Template::parse(source), "");
        let session = ParameterSession::activate(&mut doc, &plan, 0, SessionKind::Template);
        doc.take_events();
        (doc, session)
    }

    fn function_session(prefix: &str, params: &[&str]) -> (Document, ParameterSession) {
        let mut doc = Document::from_text(prefix);
        let at = prefix.chars().count();
        doc.set_caret(at);
        let params: Vec<Parameter> = params.iter().map(|p| Parameter::named(*p)).collect();
        let plan = plan_function(&params, &ParamListDelimiters::c_style(), false);
        let session = ParameterSession::activate(
            &mut doc,
            &plan,
            at,
            SessionKind::Function {
                list_start: '(',
                list_end: ')',
            },
        );
        doc.take_events();
        (doc, session)
    }

    fn type_text(doc: &mut Document, session: &mut ParameterSession, text: &str) {
        doc.insert_at_caret(text);
        let events = doc.take_events();
        session.observe(doc, &events);
    }

    /// Plan with ranges [5,6) [12,13) and the terminal at [20,20)
    fn out_of_order_plan() -> InsertionPlan {
        let range = |start, end, tag| PlannedRange {
            start,
            end,
            name: Some(format!("p{}", start)),
            tag,
        };
        InsertionPlan {
            text: "a".repeat(24),
            min_offset: 0,
            ranges: vec![
                range(5, 6, RangeTag::Parameter),
                range(12, 13, RangeTag::Parameter),
                PlannedRange {
                    start: 20,
                    end: 20,
                    name: None,
                    tag: RangeTag::ParameterEnd,
                },
            ],
            copies: Vec::new(),
        }
    }

    #[test]
    fn test_activation_selects_first_param() {
        let (doc, session) = function_session("printf", &["format", "args"]);
        assert_eq!(doc.as_string(), "printf(format, args)");
        assert_eq!(doc.selected_text(), "format");
        assert_eq!(session.min_offset(), 7);
        assert_eq!(session.max_offset(&doc), 20);
        assert_eq!(session.param_count(), 2);
        assert_eq!(session.selected_index(), Some(0));
    }

    #[test]
    fn test_tab_order_with_terminal_last() {
        let mut doc = Document::new();
        let mut session =
            ParameterSession::activate(&mut doc, &out_of_order_plan(), 0, SessionKind::Template);
        assert_eq!(doc.selection().start(), 5);
        assert_eq!(doc.caret(), 6);

        assert_eq!(session.select_next(&mut doc), Some(1));
        assert_eq!((doc.selection().start(), doc.caret()), (12, 13));

        assert_eq!(session.select_next(&mut doc), Some(2));
        assert_eq!((doc.selection().start(), doc.caret()), (20, 20));

        assert_eq!(session.select_next(&mut doc), Some(0));
        assert_eq!((doc.selection().start(), doc.caret()), (5, 6));
    }

    #[test]
    fn test_shift_tab_order() {
        let mut doc = Document::new();
        let mut session =
            ParameterSession::activate(&mut doc, &out_of_order_plan(), 0, SessionKind::Template);

        // First was also the last selection: wrap to the true last range
        assert_eq!(session.select_previous(&mut doc), Some(2));
        assert_eq!(session.select_previous(&mut doc), Some(1));
        assert_eq!(session.select_previous(&mut doc), Some(0));
    }

    #[test]
    fn test_shift_tab_reselects_first_after_caret_move() {
        let mut doc = Document::new();
        let mut session =
            ParameterSession::activate(&mut doc, &out_of_order_plan(), 0, SessionKind::Template);
        session.select_next(&mut doc);
        doc.set_caret(5);
        assert_eq!(session.select_previous(&mut doc), Some(0));
        assert_eq!(doc.selection().start(), 5);
    }

    #[test]
    fn test_propagation_updates_copies() {
        let (mut doc, mut session) = template_session(FOR_LOOP);
        assert_eq!(doc.selected_text(), "i");

        type_text(&mut doc, &mut session, "j");
        assert!(session.has_pending_tasks());
        assert_eq!(session.run_tasks(&mut doc), SessionOutcome::Continue);

        assert_eq!(doc.as_string(), "for (int j = 0; j < n; j++) {  }");
        assert!(!session.has_pending_tasks());
        assert!(doc.take_events().is_empty());

        // Nothing left to do; a second tick changes nothing
        assert_eq!(session.run_tasks(&mut doc), SessionOutcome::Continue);
        assert_eq!(doc.as_string(), "for (int j = 0; j < n; j++) {  }");
    }

    #[test]
    fn test_propagation_handles_longer_text() {
        let (mut doc, mut session) = template_session(FOR_LOOP);
        type_text(&mut doc, &mut session, "idx");
        session.run_tasks(&mut doc);
        assert_eq!(doc.as_string(), "for (int idx = 0; idx < n; idx++) {  }");

        let copies = session.copy_ranges(&doc);
        assert!(copies.iter().all(|r| doc.slice(r.start, r.end) == "idx"));
    }

    #[test]
    fn test_adjacent_copy_keeps_typed_text() {
        let (mut doc, mut session) = template_session("${a}${a}");
        assert_eq!(doc.selected_text(), "a");

        type_text(&mut doc, &mut session, "x");
        assert_eq!(session.run_tasks(&mut doc), SessionOutcome::Continue);

        assert_eq!(doc.as_string(), "xx");
        assert_eq!(session.param_text(&doc, 0).as_deref(), Some("x"));
        let copy = session.copy_ranges(&doc)[0];
        assert_eq!((copy.start, copy.end), (1, 2));
    }

    #[test]
    fn test_adjacent_params_keep_their_text() {
        let (mut doc, mut session) = template_session("${a}${b}");
        type_text(&mut doc, &mut session, "x");
        assert_eq!(session.select_next(&mut doc), Some(1));
        assert_eq!(doc.selected_text(), "b");

        type_text(&mut doc, &mut session, "y");
        session.run_tasks(&mut doc);
        assert_eq!(doc.as_string(), "xy");
        assert_eq!(session.param_text(&doc, 0).as_deref(), Some("x"));
        assert_eq!(session.param_text(&doc, 1).as_deref(), Some("y"));

        // The terminal range stayed empty at the end
        assert_eq!(session.select_next(&mut doc), Some(2));
        assert_eq!(doc.caret(), 2);
    }

    #[test]
    fn test_tab_before_tick_propagates_edited_param() {
        let (mut doc, mut session) = template_session(FOR_LOOP);
        type_text(&mut doc, &mut session, "j");
        session.select_next(&mut doc);
        assert_eq!(doc.selected_text(), "n");

        assert_eq!(session.run_tasks(&mut doc), SessionOutcome::Continue);
        assert_eq!(doc.as_string(), "for (int j = 0; j < n; j++) {  }");
    }

    #[test]
    fn test_edits_in_two_params_before_tick() {
        let (mut doc, mut session) = template_session("${a}+${b}=${a}${b}");
        type_text(&mut doc, &mut session, "x");
        session.select_next(&mut doc);
        type_text(&mut doc, &mut session, "y");

        session.run_tasks(&mut doc);
        assert_eq!(doc.as_string(), "x+y=xy");
    }

    #[test]
    fn test_deactivate_runs_pending_propagation() {
        let (mut doc, mut session) = template_session(FOR_LOOP);
        type_text(&mut doc, &mut session, "j");
        session.deactivate(&mut doc);

        assert_eq!(doc.as_string(), "for (int j = 0; j < n; j++) {  }");
        assert!(doc.ranges().is_empty());
        assert!(doc.take_events().is_empty());
    }

    #[test]
    fn test_finish_at_terminal_runs_pending_propagation() {
        let (mut doc, mut session) = template_session(FOR_LOOP);
        type_text(&mut doc, &mut session, "j");
        session.finish_at_terminal(&mut doc);

        assert_eq!(doc.as_string(), "for (int j = 0; j < n; j++) {  }");
        assert_eq!(doc.caret(), 30);
        assert!(!session.is_active());
    }

    #[test]
    fn test_typing_in_terminal_deactivates() {
        let (mut doc, mut session) = template_session(FOR_LOOP);
        session.select_next(&mut doc);
        session.select_next(&mut doc);
        assert_eq!(session.selected_index(), Some(2));

        type_text(&mut doc, &mut session, "x");
        assert_eq!(session.run_tasks(&mut doc), SessionOutcome::Deactivated);
        assert!(!session.is_active());
        assert!(doc.ranges().is_empty());
    }

    #[test]
    fn test_edits_outside_window_ignored() {
        let (mut doc, mut session) = function_session("f", &["a"]);
        doc.replace_range(0, 0, "  ");
        let events = doc.take_events();
        session.observe(&mut doc, &events);
        assert!(!session.has_pending_tasks());
    }

    #[test]
    fn test_close_char_moves_past_delimiter() {
        let (mut doc, mut session) = function_session("f", &["a"]);
        assert_eq!(doc.caret(), 3);
        assert_eq!(session.close_char_typed(&mut doc), CloseAction::MovedPast);
        assert_eq!(doc.caret(), 4);
        assert!(!session.is_active());
    }

    #[test]
    fn test_close_char_on_terminal_is_literal() {
        let (mut doc, mut session) = function_session("f", &["a"]);
        session.select_next(&mut doc);
        assert_eq!(doc.caret(), 4);

        assert_eq!(session.close_char_typed(&mut doc), CloseAction::InsertLiteral);
        assert!(session.is_active());

        // Typed into the terminal range, which ends the session
        type_text(&mut doc, &mut session, ")");
        assert_eq!(doc.as_string(), "f(a))");
        assert_eq!(session.run_tasks(&mut doc), SessionOutcome::Deactivated);
    }

    #[test]
    fn test_close_char_literal_when_unbalanced() {
        let (mut doc, mut session) = function_session("f", &["a", "b"]);
        type_text(&mut doc, &mut session, "g(");
        assert_eq!(session.close_char_typed(&mut doc), CloseAction::InsertLiteral);
        assert!(session.is_active());
    }

    #[test]
    fn test_close_char_literal_before_last_param() {
        let (mut doc, mut session) = function_session("f", &["a", "b"]);
        assert_eq!(session.close_char_typed(&mut doc), CloseAction::InsertLiteral);
        assert!(session.is_active());
    }

    #[test]
    fn test_close_char_in_template_is_literal() {
        let (mut doc, mut session) = template_session("(${x})");
        assert_eq!(session.close_char_typed(&mut doc), CloseAction::InsertLiteral);
    }

    #[test]
    fn test_finish_at_terminal() {
        let (mut doc, mut session) = template_session("if (${c}) {${cursor}}");
        session.finish_at_terminal(&mut doc);
        assert_eq!(doc.caret(), 8);
        assert!(!session.is_active());
    }

    #[test]
    fn test_contains_caret() {
        let (mut doc, session) = function_session("f", &["a"]);
        assert!(session.contains_caret(&doc));
        doc.set_caret(0);
        assert!(!session.contains_caret(&doc));
    }

    #[test]
    fn test_deactivate_idempotent() {
        let (mut doc, mut session) = function_session("f", &["a"]);
        session.deactivate(&mut doc);
        session.deactivate(&mut doc);
        assert!(doc.ranges().is_empty());
        assert_eq!(session.run_tasks(&mut doc), SessionOutcome::Deactivated);
        assert_eq!(session.select_next(&mut doc), None);
    }
}
