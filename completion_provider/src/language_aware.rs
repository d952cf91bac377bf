//! Delegation by lexical context
//!
//! The token group at the caret picks one of up to four children. Line and
//! block comments share the comment child. A group with no child (or no
//! group at all) yields nothing.

use std::rc::Rc;

use completion_types::{Completion, ParamListDelimiters, ProviderId};
use editor_core::{LexicalClassifier, TextView, TokenGroup};
use tracing::trace;

use crate::provider::Provider;

pub struct LanguageAwareProvider {
    id: ProviderId,
    classifier: Rc<dyn LexicalClassifier>,
    default: Rc<dyn Provider>,
    string: Option<Rc<dyn Provider>>,
    comment: Option<Rc<dyn Provider>>,
    doc_comment: Option<Rc<dyn Provider>>,
}

impl LanguageAwareProvider {
    pub fn new(classifier: Rc<dyn LexicalClassifier>, default: Rc<dyn Provider>) -> Self {
        Self {
            id: ProviderId::new(),
            classifier,
            default,
            string: None,
            comment: None,
            doc_comment: None,
        }
    }

    pub fn with_string_provider(mut self, provider: Rc<dyn Provider>) -> Self {
        self.string = Some(provider);
        self
    }

    pub fn with_comment_provider(mut self, provider: Rc<dyn Provider>) -> Self {
        self.comment = Some(provider);
        self
    }

    pub fn with_doc_comment_provider(mut self, provider: Rc<dyn Provider>) -> Self {
        self.doc_comment = Some(provider);
        self
    }

    pub fn default_provider(&self) -> &Rc<dyn Provider> {
        &self.default
    }

    /// Child responsible for the caret position
    fn provider_for(&self, view: &dyn TextView) -> Option<&Rc<dyn Provider>> {
        let group = self.classifier.token_group_at(view, view.caret_offset());
        trace!("Token group at caret: {:?}", group);
        match group? {
            TokenGroup::Code => Some(&self.default),
            TokenGroup::String => self.string.as_ref(),
            TokenGroup::LineComment | TokenGroup::BlockComment => self.comment.as_ref(),
            TokenGroup::DocComment => self.doc_comment.as_ref(),
        }
    }

    fn is_default(&self, provider: &Rc<dyn Provider>) -> bool {
        provider.id() == self.default.id()
    }
}

impl Provider for LanguageAwareProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn already_entered_text(&self, view: &dyn TextView) -> String {
        self.provider_for(view)
            .map(|p| p.already_entered_text(view))
            .unwrap_or_default()
    }

    fn completions(&self, view: &dyn TextView) -> Vec<Completion> {
        self.provider_for(view)
            .map(|p| p.completions(view))
            .unwrap_or_default()
    }

    fn completions_at(&self, view: &dyn TextView, offset: usize) -> Vec<Completion> {
        self.default.completions_at(view, offset)
    }

    fn completions_by_input_text(&self, text: &str) -> Vec<Completion> {
        self.default.completions_by_input_text(text)
    }

    fn parameterized_completions(&self, view: &dyn TextView) -> Vec<Completion> {
        match self.provider_for(view) {
            Some(p) if self.is_default(p) => p.parameterized_completions(view),
            _ => Vec::new(),
        }
    }

    fn delimiters(&self) -> Option<&ParamListDelimiters> {
        self.default.delimiters()
    }

    fn is_auto_activate_okay(&self, view: &dyn TextView) -> bool {
        self.provider_for(view)
            .is_some_and(|p| p.is_auto_activate_okay(view))
    }
}
