//! Sorted completion catalog

use std::cmp::Ordering;
use std::path::Path;
use std::rc::Rc;

use completion_types::{
    compare_input_text, sort_by_input_text, sort_by_relevance, starts_with_ignore_case,
    Completion, ParamListDelimiters, ProviderId,
};
use editor_core::TextView;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::definitions::DefinitionFile;
use crate::error::{DefinitionError, DefinitionResult};
use crate::provider::{is_identifier_char, Provider};
use crate::registry::VariantRegistry;

/// Which characters typed before the caret may start auto-activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoActivation {
    pub after_letters: bool,
    /// Extra trigger characters, e.g. `.`
    pub chars: Vec<char>,
}

impl Default for AutoActivation {
    fn default() -> Self {
        Self {
            after_letters: true,
            chars: Vec::new(),
        }
    }
}

/// Provider backed by a catalog sorted by input text
///
/// The catalog stays sorted (case-insensitive, stable for duplicates) after
/// every insertion. Duplicates are allowed and sit next to each other.
pub struct CompletionProvider {
    id: ProviderId,
    completions: Vec<Completion>,
    parent: Option<Rc<dyn Provider>>,
    delimiters: Option<ParamListDelimiters>,
    match_on_empty_prefix: bool,
    activation: AutoActivation,
    extra_word_chars: Vec<char>,
}

impl CompletionProvider {
    pub fn new() -> Self {
        Self {
            id: ProviderId::new(),
            completions: Vec::new(),
            parent: None,
            delimiters: None,
            match_on_empty_prefix: true,
            activation: AutoActivation::default(),
            extra_word_chars: Vec::new(),
        }
    }

    pub fn with_delimiters(mut self, delimiters: ParamListDelimiters) -> Self {
        self.delimiters = Some(delimiters);
        self
    }

    pub fn with_parent(mut self, parent: Rc<dyn Provider>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_match_on_empty_prefix(mut self, enabled: bool) -> Self {
        self.match_on_empty_prefix = enabled;
        self
    }

    pub fn with_auto_activation(mut self, activation: AutoActivation) -> Self {
        self.activation = activation;
        self
    }

    /// Characters besides letters, digits and `_` that form words
    pub fn with_word_chars(mut self, chars: &[char]) -> Self {
        self.extra_word_chars = chars.to_vec();
        self
    }

    pub fn set_delimiters(&mut self, delimiters: Option<ParamListDelimiters>) {
        self.delimiters = delimiters;
    }

    pub fn set_parent(&mut self, parent: Option<Rc<dyn Provider>>) {
        self.parent = parent;
    }

    pub fn len(&self) -> usize {
        self.completions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completions.is_empty()
    }

    /// The catalog in sorted order
    pub fn catalog(&self) -> &[Completion] {
        &self.completions
    }

    // Catalog editing

    /// Inserts one completion after any entries with equal input text
    pub fn add_completion(&mut self, mut completion: Completion) {
        completion.provider = self.id;
        let index = self.completions.partition_point(|c| {
            compare_input_text(&c.input_text, &completion.input_text) != Ordering::Greater
        });
        self.completions.insert(index, completion);
    }

    pub fn add_completions(&mut self, completions: impl IntoIterator<Item = Completion>) {
        let id = self.id;
        self.completions.extend(completions.into_iter().map(|mut c| {
            c.provider = id;
            c
        }));
        sort_by_input_text(&mut self.completions);
    }

    /// Removes the first entry equal to `completion`
    pub fn remove_completion(&mut self, completion: &Completion) -> bool {
        match self.completions.iter().position(|c| c == completion) {
            Some(index) => {
                self.completions.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.completions.clear();
    }

    // Definitions

    /// Installs completions from a JSON definition document
    ///
    /// Either every keyword is added or nothing is. The environment, when
    /// it names list delimiters, replaces this provider's delimiters.
    pub fn load_definitions(
        &mut self,
        json: &str,
        registry: &VariantRegistry,
    ) -> DefinitionResult<usize> {
        let file = DefinitionFile::from_json(json)?;
        let delimiters = file.delimiters()?;
        let completions = file.build(self.id, registry)?;
        let count = completions.len();

        if let Some(delimiters) = delimiters {
            self.delimiters = Some(delimiters);
        }
        self.add_completions(completions);
        debug!("Loaded {} completion definitions", count);
        Ok(count)
    }

    /// Reads a JSON definition file and installs it
    pub fn load_definitions_from_path(
        &mut self,
        path: &Path,
        registry: &VariantRegistry,
    ) -> DefinitionResult<usize> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| DefinitionError::Io(format!("{}: {}", path.display(), e)))?;
        self.load_definitions(&json, registry)
    }

    // Matching

    fn is_word_char(&self, ch: char) -> bool {
        is_identifier_char(ch) || self.extra_word_chars.contains(&ch)
    }

    /// Index of the first entry not less than `text`
    fn lower_bound(&self, text: &str) -> usize {
        self.completions
            .partition_point(|c| compare_input_text(&c.input_text, text) == Ordering::Less)
    }

    /// Local entries starting with `prefix`, in catalog order
    pub fn matches(&self, prefix: &str) -> Vec<Completion> {
        if prefix.is_empty() {
            return if self.match_on_empty_prefix {
                self.completions.clone()
            } else {
                Vec::new()
            };
        }
        let start = self.lower_bound(prefix);
        let found: Vec<Completion> = self.completions[start..]
            .iter()
            .take_while(|c| starts_with_ignore_case(&c.input_text, prefix))
            .cloned()
            .collect();
        trace!("Prefix '{}' matched {} local completions", prefix, found.len());
        found
    }

    fn word_around(&self, view: &dyn TextView, offset: usize) -> String {
        let before = view.text_before(offset, &|ch| self.is_word_char(ch));
        let line_end = view.line_end(offset);
        let mut end = offset;
        while end < line_end {
            match view.char_at(end) {
                Some(ch) if self.is_word_char(ch) => end += 1,
                _ => break,
            }
        }
        before + &view.slice(offset, end)
    }
}

impl Default for CompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for CompletionProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn already_entered_text(&self, view: &dyn TextView) -> String {
        view.text_before(view.caret_offset(), &|ch| self.is_word_char(ch))
    }

    fn completions(&self, view: &dyn TextView) -> Vec<Completion> {
        let prefix = self.already_entered_text(view);
        let mut result = self.matches(&prefix);
        if let Some(parent) = &self.parent {
            result.extend(parent.completions(view));
            sort_by_input_text(&mut result);
        }
        sort_by_relevance(&mut result);
        result
    }

    fn completions_at(&self, view: &dyn TextView, offset: usize) -> Vec<Completion> {
        if offset > view.len_chars() {
            return Vec::new();
        }
        let word = self.word_around(view, offset);
        if word.is_empty() {
            return Vec::new();
        }
        self.completions_by_input_text(&word)
    }

    fn completions_by_input_text(&self, text: &str) -> Vec<Completion> {
        let start = self.lower_bound(text);
        let mut result: Vec<Completion> = self.completions[start..]
            .iter()
            .take_while(|c| compare_input_text(&c.input_text, text) == Ordering::Equal)
            .cloned()
            .collect();
        if let Some(parent) = &self.parent {
            result.extend(parent.completions_by_input_text(text));
        }
        result
    }

    fn parameterized_completions(&self, view: &dyn TextView) -> Vec<Completion> {
        let Some(delimiters) = &self.delimiters else {
            return Vec::new();
        };
        let caret = view.caret_offset();
        if caret == 0 || view.char_at(caret - 1) != Some(delimiters.start()) {
            return Vec::new();
        }

        let line_start = view.line_start(caret);
        let mut end = caret - 1;
        while end > line_start && view.char_at(end - 1).is_some_and(char::is_whitespace) {
            end -= 1;
        }
        let name = view.text_before(end, &|ch| self.is_word_char(ch));
        if name.is_empty() {
            return Vec::new();
        }

        self.completions_by_input_text(&name)
            .into_iter()
            .filter(Completion::is_parameterized)
            .collect()
    }

    fn delimiters(&self) -> Option<&ParamListDelimiters> {
        self.delimiters.as_ref()
    }

    fn is_auto_activate_okay(&self, view: &dyn TextView) -> bool {
        let caret = view.caret_offset();
        if caret == 0 {
            return false;
        }
        match view.char_at(caret - 1) {
            Some(ch) => {
                (self.activation.after_letters && ch.is_alphabetic())
                    || self.activation.chars.contains(&ch)
            }
            None => false,
        }
    }

    fn parent(&self) -> Option<Rc<dyn Provider>> {
        self.parent.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use completion_types::Parameter;
    use editor_core::Document;

    fn doc_with_caret_at_end(text: &str) -> Document {
        let mut doc = Document::from_text(text);
        doc.set_caret(text.chars().count());
        doc
    }

    fn names(list: &[Completion]) -> Vec<&str> {
        list.iter().map(|c| c.input_text.as_str()).collect()
    }

    fn c_provider() -> CompletionProvider {
        let mut provider =
            CompletionProvider::new().with_delimiters(ParamListDelimiters::c_style());
        let id = provider.id();
        provider.add_completions(vec![
            Completion::basic(id, "while"),
            Completion::basic(id, "print"),
            Completion::function(
                id,
                "printf",
                Some("int"),
                vec![Parameter::new(Some("const char *"), Some("format"))],
            ),
            Completion::basic(id, "Private"),
            Completion::basic(id, "sprintf"),
            Completion::basic(id, "pr"),
        ]);
        provider
    }

    #[test]
    fn test_catalog_stays_sorted() {
        let mut provider = c_provider();
        provider.add_completion(Completion::basic(ProviderId::new(), "Alpha"));
        let catalog = provider.catalog();
        for pair in catalog.windows(2) {
            assert_ne!(pair[0].cmp_input_text(&pair[1]), Ordering::Greater);
        }
        assert_eq!(catalog[0].input_text, "Alpha");
    }

    #[test]
    fn test_added_completions_take_provider_id() {
        let provider = c_provider();
        assert!(provider.catalog().iter().all(|c| c.provider == provider.id()));
    }

    #[test]
    fn test_prefix_match_is_exact_subset() {
        let provider = c_provider();
        for prefix in ["p", "PR", "pri", "prin", "x", "s", "w"] {
            let found = provider.matches(prefix);
            let expected: Vec<&Completion> = provider
                .catalog()
                .iter()
                .filter(|c| starts_with_ignore_case(&c.input_text, prefix))
                .collect();
            assert_eq!(found.iter().collect::<Vec<_>>(), expected, "prefix {}", prefix);
        }
    }

    #[test]
    fn test_prefix_match_contiguous() {
        let provider = c_provider();
        let found = provider.matches("pri");
        let start = provider
            .catalog()
            .iter()
            .position(|c| c == &found[0])
            .unwrap();
        assert_eq!(&provider.catalog()[start..start + found.len()], &found[..]);
    }

    #[test]
    fn test_completions_use_text_before_caret() {
        let provider = c_provider();
        let doc = doc_with_caret_at_end("x = pri");
        let found = provider.completions(&doc);
        assert_eq!(names(&found), vec!["print", "printf", "Private"]);
    }

    #[test]
    fn test_relevance_orders_results() {
        let mut provider = c_provider();
        provider.add_completion(Completion::basic(ProviderId::new(), "primary").with_relevance(10));
        let doc = doc_with_caret_at_end("pri");
        let found = provider.completions(&doc);
        assert_eq!(names(&found), vec!["primary", "print", "printf", "Private"]);
    }

    #[test]
    fn test_empty_prefix_flag() {
        let provider = c_provider();
        let doc = doc_with_caret_at_end("x = ");
        assert_eq!(provider.completions(&doc).len(), provider.len());

        let strict = c_provider().with_match_on_empty_prefix(false);
        assert!(strict.completions(&doc).is_empty());
    }

    #[test]
    fn test_parent_merge_keeps_duplicates() {
        let mut parent = CompletionProvider::new();
        parent.add_completions(vec![
            Completion::basic(ProviderId::new(), "print"),
            Completion::basic(ProviderId::new(), "puts"),
        ]);
        let parent: Rc<dyn Provider> = Rc::new(parent);

        let mut child = CompletionProvider::new().with_parent(parent.clone());
        child.add_completion(Completion::basic(ProviderId::new(), "print"));
        child.add_completion(Completion::basic(ProviderId::new(), "pow"));

        let doc = doc_with_caret_at_end("p");
        let found = child.completions(&doc);
        assert_eq!(names(&found), vec!["pow", "print", "print", "puts"]);
        assert_eq!(found.iter().filter(|c| c.provider == parent.id()).count(), 2);
    }

    #[test]
    fn test_lookup_by_input_text_returns_all_duplicates() {
        let mut provider = c_provider();
        provider.add_completion(Completion::basic(ProviderId::new(), "PRINT").with_summary("dup"));
        let found = provider.completions_by_input_text("print");
        assert_eq!(found.len(), 2);
        assert!(provider.completions_by_input_text("prin").is_empty());
    }

    #[test]
    fn test_hover_lookup() {
        let provider = c_provider();
        let doc = Document::from_text("call printf(x);");
        let found = provider.completions_at(&doc, 7);
        assert_eq!(names(&found), vec!["printf"]);
        assert!(provider.completions_at(&doc, 4).is_empty());
        assert!(provider.completions_at(&doc, 99).is_empty());
    }

    #[test]
    fn test_parameterized_lookup_skips_whitespace() {
        let provider = c_provider();
        let doc = doc_with_caret_at_end("  printf (");
        let found = provider.parameterized_completions(&doc);
        assert_eq!(names(&found), vec!["printf"]);
    }

    #[test]
    fn test_parameterized_lookup_ignores_basic() {
        let provider = c_provider();
        let doc = doc_with_caret_at_end("while(");
        assert!(provider.parameterized_completions(&doc).is_empty());
    }

    #[test]
    fn test_parameterized_lookup_without_delimiters() {
        let mut provider = c_provider();
        provider.set_delimiters(None);
        let doc = doc_with_caret_at_end("printf(");
        assert!(provider.parameterized_completions(&doc).is_empty());
    }

    #[test]
    fn test_auto_activate_rules() {
        let provider = c_provider().with_auto_activation(AutoActivation {
            after_letters: true,
            chars: vec!['.'],
        });
        assert!(provider.is_auto_activate_okay(&doc_with_caret_at_end("ab")));
        assert!(provider.is_auto_activate_okay(&doc_with_caret_at_end("obj.")));
        assert!(!provider.is_auto_activate_okay(&doc_with_caret_at_end("x1")));
        assert!(!provider.is_auto_activate_okay(&doc_with_caret_at_end("")));
    }

    #[test]
    fn test_word_chars_extend_prefix() {
        let mut provider = CompletionProvider::new().with_word_chars(&['-']);
        provider.add_completion(Completion::basic(ProviderId::new(), "font-size"));
        let doc = doc_with_caret_at_end("font-s");
        assert_eq!(provider.already_entered_text(&doc), "font-s");
        assert_eq!(provider.completions(&doc).len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut provider = c_provider();
        let target = provider.completions_by_input_text("while").remove(0);
        assert!(provider.remove_completion(&target));
        assert!(!provider.remove_completion(&target));
        provider.clear();
        assert!(provider.is_empty());
    }
}
