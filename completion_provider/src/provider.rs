//! Provider interface

use std::rc::Rc;

use completion_types::{Completion, ParamListDelimiters, ProviderId};
use editor_core::TextView;

/// Default word-character predicate: letter, digit or `_`
pub fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A source of completions
///
/// Providers are shared as `Rc<dyn Provider>` and only read the buffer.
pub trait Provider {
    fn id(&self) -> ProviderId;

    /// Text before the caret the user has typed towards a completion
    fn already_entered_text(&self, view: &dyn TextView) -> String;

    /// Ranked completions matching the already-entered text
    fn completions(&self, view: &dyn TextView) -> Vec<Completion>;

    /// Completions for the word surrounding `offset` (hover lookup)
    fn completions_at(&self, view: &dyn TextView, offset: usize) -> Vec<Completion>;

    /// Every completion whose input text equals `text`, ignoring case
    fn completions_by_input_text(&self, text: &str) -> Vec<Completion>;

    /// Parameterized completions for the name before a just-typed list start
    fn parameterized_completions(&self, view: &dyn TextView) -> Vec<Completion>;

    /// Parameter-list punctuation, `None` if lists are unsupported
    fn delimiters(&self) -> Option<&ParamListDelimiters>;

    /// Whether the character just typed should start the activation timer
    fn is_auto_activate_okay(&self, view: &dyn TextView) -> bool;

    fn parent(&self) -> Option<Rc<dyn Provider>> {
        None
    }
}
