//! Completion model

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::delimiters::ParamListDelimiters;
use crate::ids::ProviderId;
use crate::ordering::compare_input_text;
use crate::parameter::Parameter;
use crate::template::Template;

/// Variant-specific payload of a completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum CompletionKind {
    /// Plain word
    Basic,
    /// Variable or constant
    Variable { type_name: Option<String> },
    /// Function with a parameter list
    Function {
        return_type: Option<String>,
        params: Vec<Parameter>,
        return_value_description: Option<String>,
    },
    /// Markup tag; attributes are listed but never inserted
    MarkupTag { attributes: Vec<Parameter> },
    /// Template with parameters and copies
    Template {
        template: Template,
        definition: String,
    },
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Prefix the user types to match this entry
    pub input_text: String,
    /// Text substituted on acceptance; `None` for templates
    pub replacement_text: Option<String>,
    /// Higher sorts first
    pub relevance: i32,
    /// Provider that produced this entry
    pub provider: ProviderId,
    pub icon: Option<String>,
    pub short_description: Option<String>,
    pub defined_in: Option<String>,
    pub summary: Option<String>,
    pub tooltip: Option<String>,
    pub kind: CompletionKind,
}

impl Completion {
    fn with_kind(
        provider: ProviderId,
        input_text: impl Into<String>,
        replacement_text: Option<String>,
        kind: CompletionKind,
    ) -> Self {
        Self {
            input_text: input_text.into(),
            replacement_text,
            relevance: 0,
            provider,
            icon: None,
            short_description: None,
            defined_in: None,
            summary: None,
            tooltip: None,
            kind,
        }
    }

    /// Basic completion that replaces with its own input text
    pub fn basic(provider: ProviderId, input_text: impl Into<String>) -> Self {
        let input_text = input_text.into();
        let replacement = Some(input_text.clone());
        Self::with_kind(provider, input_text, replacement, CompletionKind::Basic)
    }

    /// Basic completion with distinct replacement text
    pub fn basic_with_replacement(
        provider: ProviderId,
        input_text: impl Into<String>,
        replacement_text: impl Into<String>,
    ) -> Self {
        Self::with_kind(
            provider,
            input_text,
            Some(replacement_text.into()),
            CompletionKind::Basic,
        )
    }

    /// The empty completion a provider returns to show its empty state
    pub fn sentinel(provider: ProviderId) -> Self {
        Self::with_kind(provider, "", Some(String::new()), CompletionKind::Basic)
    }

    pub fn variable(
        provider: ProviderId,
        name: impl Into<String>,
        type_name: Option<&str>,
    ) -> Self {
        let name = name.into();
        let replacement = Some(name.clone());
        Self::with_kind(
            provider,
            name,
            replacement,
            CompletionKind::Variable {
                type_name: type_name.map(String::from),
            },
        )
    }

    pub fn function(
        provider: ProviderId,
        name: impl Into<String>,
        return_type: Option<&str>,
        params: Vec<Parameter>,
    ) -> Self {
        let name = name.into();
        let replacement = Some(name.clone());
        Self::with_kind(
            provider,
            name,
            replacement,
            CompletionKind::Function {
                return_type: return_type.map(String::from),
                params,
                return_value_description: None,
            },
        )
    }

    pub fn markup_tag(
        provider: ProviderId,
        name: impl Into<String>,
        attributes: Vec<Parameter>,
    ) -> Self {
        let name = name.into();
        let replacement = Some(name.clone());
        Self::with_kind(provider, name, replacement, CompletionKind::MarkupTag { attributes })
    }

    /// Template completion; `definition` is the label shown in lists
    pub fn template(
        provider: ProviderId,
        input_text: impl Into<String>,
        definition: impl Into<String>,
        template: Template,
    ) -> Self {
        Self::with_kind(
            provider,
            input_text,
            None,
            CompletionKind::Template {
                template,
                definition: definition.into(),
            },
        )
    }

    // Builders

    pub fn with_relevance(mut self, relevance: i32) -> Self {
        self.relevance = relevance;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_short_description(mut self, desc: impl Into<String>) -> Self {
        self.short_description = Some(desc.into());
        self
    }

    pub fn with_defined_in(mut self, defined_in: impl Into<String>) -> Self {
        self.defined_in = Some(defined_in.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Sets the return value description of a function; no-op for other kinds
    pub fn with_return_value_description(mut self, desc: impl Into<String>) -> Self {
        if let CompletionKind::Function {
            return_value_description,
            ..
        } = &mut self.kind
        {
            *return_value_description = Some(desc.into());
        }
        self
    }

    // Queries

    pub fn replacement_text(&self) -> Option<&str> {
        self.replacement_text.as_deref()
    }

    /// Functions and templates are parameterized
    pub fn is_parameterized(&self) -> bool {
        matches!(
            self.kind,
            CompletionKind::Function { .. } | CompletionKind::Template { .. }
        )
    }

    /// True for the empty Basic completion providers use to show their empty state
    pub fn is_sentinel(&self) -> bool {
        matches!(self.kind, CompletionKind::Basic) && self.input_text.is_empty()
    }

    /// Parameters (function params, template params, or tag attributes)
    pub fn params(&self) -> Vec<Parameter> {
        match &self.kind {
            CompletionKind::Function { params, .. } => params.clone(),
            CompletionKind::MarkupTag { attributes } => attributes.clone(),
            CompletionKind::Template { template, .. } => template
                .param_names()
                .into_iter()
                .map(Parameter::named)
                .collect(),
            CompletionKind::Basic | CompletionKind::Variable { .. } => Vec::new(),
        }
    }

    pub fn param_count(&self) -> usize {
        match &self.kind {
            CompletionKind::Function { params, .. } => params.len(),
            CompletionKind::MarkupTag { attributes } => attributes.len(),
            CompletionKind::Template { template, .. } => template.param_count(),
            CompletionKind::Basic | CompletionKind::Variable { .. } => 0,
        }
    }

    /// Tooltip text: explicit tooltip, else summary
    pub fn tooltip_text(&self) -> Option<&str> {
        self.tooltip.as_deref().or(self.summary.as_deref())
    }

    /// Human-readable signature
    ///
    /// Functions render as `"<return_type> <name>(<type> <name>, ...)"` with
    /// the given delimiters (C style when `None`).
    pub fn definition_string(&self, delims: Option<&ParamListDelimiters>) -> String {
        match &self.kind {
            CompletionKind::Function {
                return_type,
                params,
                ..
            } => {
                let fallback = ParamListDelimiters::c_style();
                let delims = delims.unwrap_or(&fallback);
                let mut out = String::new();
                if let Some(ret) = return_type {
                    out.push_str(ret);
                    out.push(' ');
                }
                out.push_str(&self.input_text);
                out.push(delims.start());
                let sigs: Vec<String> = params.iter().map(Parameter::signature).collect();
                out.push_str(&sigs.join(delims.separator()));
                out.push(delims.end());
                out
            }
            CompletionKind::Variable {
                type_name: Some(type_name),
            } => format!("{} {}", type_name, self.input_text),
            CompletionKind::Template { definition, .. } => definition.clone(),
            _ => self.input_text.clone(),
        }
    }

    /// Catalog order (case-insensitive input text)
    pub fn cmp_input_text(&self, other: &Self) -> Ordering {
        compare_input_text(&self.input_text, &other.input_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printf(provider: ProviderId) -> Completion {
        Completion::function(
            provider,
            "printf",
            Some("int"),
            vec![
                Parameter::new(Some("const char *"), Some("format")),
                Parameter::new(None, Some("...")),
            ],
        )
    }

    #[test]
    fn test_basic_replacement_defaults_to_input() {
        let c = Completion::basic(ProviderId::new(), "while");
        assert_eq!(c.replacement_text(), Some("while"));
        assert_eq!(c.relevance, 0);
        assert!(!c.is_parameterized());
    }

    #[test]
    fn test_template_has_no_replacement() {
        let c = Completion::template(
            ProviderId::new(),
            "fori",
            "for loop",
            Template::parse("for (${i}) {${cursor}}"),
        );
        assert_eq!(c.replacement_text(), None);
        assert!(c.is_parameterized());
        assert_eq!(c.params(), vec![Parameter::named("i")]);
    }

    #[test]
    fn test_function_is_parameterized() {
        let c = printf(ProviderId::new());
        assert!(c.is_parameterized());
        assert_eq!(c.param_count(), 2);
    }

    #[test]
    fn test_markup_tag_not_parameterized() {
        let c = Completion::markup_tag(ProviderId::new(), "a", vec![Parameter::named("href")]);
        assert!(!c.is_parameterized());
        assert_eq!(c.param_count(), 1);
    }

    #[test]
    fn test_sentinel() {
        let c = Completion::sentinel(ProviderId::new());
        assert!(c.is_sentinel());
        assert!(!Completion::basic(ProviderId::new(), "x").is_sentinel());
    }

    #[test]
    fn test_function_definition_string() {
        let c = printf(ProviderId::new());
        assert_eq!(
            c.definition_string(None),
            "int printf(const char * format, ...)"
        );
        let delims = ParamListDelimiters::new('[', "; ", ']').unwrap();
        assert_eq!(
            c.definition_string(Some(&delims)),
            "int printf[const char * format; ...]"
        );
    }

    #[test]
    fn test_variable_definition_string() {
        let c = Completion::variable(ProviderId::new(), "errno", Some("int"));
        assert_eq!(c.definition_string(None), "int errno");
    }

    #[test]
    fn test_return_value_description_only_for_functions() {
        let f = printf(ProviderId::new()).with_return_value_description("chars written");
        assert!(matches!(
            f.kind,
            CompletionKind::Function {
                return_value_description: Some(ref d),
                ..
            } if d == "chars written"
        ));
        let b = Completion::basic(ProviderId::new(), "x").with_return_value_description("ignored");
        assert_eq!(b.kind, CompletionKind::Basic);
    }

    #[test]
    fn test_tooltip_falls_back_to_summary() {
        let c = Completion::basic(ProviderId::new(), "x").with_summary("sum");
        assert_eq!(c.tooltip_text(), Some("sum"));
        let c = c.with_tooltip("tip");
        assert_eq!(c.tooltip_text(), Some("tip"));
    }

    #[test]
    fn test_serde_round_trip_keeps_kind() {
        let c = printf(ProviderId::new()).with_relevance(3);
        let json = serde_json::to_string(&c).unwrap();
        let back: Completion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
