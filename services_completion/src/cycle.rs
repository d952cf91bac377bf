//! Round-robin over several providers
//!
//! Each trigger press while the popup is open moves to the next provider.
//! Providers with nothing to offer are skipped, unless they return the
//! sentinel completion to show their empty state on purpose. Arriving back
//! at the first provider stops the skipping and is reported as a wrap.

use std::rc::Rc;

use completion_provider::Provider;
use completion_types::{Completion, ParamListDelimiters, ProviderId};
use editor_core::TextView;
use tracing::debug;

pub struct ProviderCycle {
    id: ProviderId,
    providers: Vec<Rc<dyn Provider>>,
    index: usize,
}

impl ProviderCycle {
    /// Returns `None` for an empty provider list
    pub fn new(providers: Vec<Rc<dyn Provider>>) -> Option<Self> {
        if providers.is_empty() {
            return None;
        }
        Some(Self {
            id: ProviderId::new(),
            providers,
            index: 0,
        })
    }

    pub fn single(provider: Rc<dyn Provider>) -> Self {
        Self {
            id: ProviderId::new(),
            providers: vec![provider],
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &Rc<dyn Provider> {
        &self.providers[self.index]
    }

    /// Goes back to the first provider
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Moves to the next provider with something to show
    ///
    /// Returns true when the cycle wrapped to the first provider.
    pub fn advance(&mut self, view: &dyn TextView) -> bool {
        loop {
            self.index = (self.index + 1) % self.providers.len();
            if self.index == 0 {
                debug!("Provider cycle wrapped");
                return true;
            }
            if !self.providers[self.index].completions(view).is_empty() {
                debug!("Provider cycle moved to {}", self.index);
                return false;
            }
        }
    }
}

impl Provider for ProviderCycle {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn already_entered_text(&self, view: &dyn TextView) -> String {
        self.current().already_entered_text(view)
    }

    fn completions(&self, view: &dyn TextView) -> Vec<Completion> {
        self.current().completions(view)
    }

    fn completions_at(&self, view: &dyn TextView, offset: usize) -> Vec<Completion> {
        self.current().completions_at(view, offset)
    }

    fn completions_by_input_text(&self, text: &str) -> Vec<Completion> {
        self.current().completions_by_input_text(text)
    }

    fn parameterized_completions(&self, view: &dyn TextView) -> Vec<Completion> {
        self.current().parameterized_completions(view)
    }

    fn delimiters(&self) -> Option<&ParamListDelimiters> {
        self.providers[self.index].delimiters()
    }

    fn is_auto_activate_okay(&self, view: &dyn TextView) -> bool {
        self.current().is_auto_activate_okay(view)
    }
}
