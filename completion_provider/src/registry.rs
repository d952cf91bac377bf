//! Variant registry
//!
//! Definition files name a completion type by string. The registry maps
//! those names to constructors; a name it does not know fails the load.

use std::collections::BTreeMap;

use completion_types::{Completion, ProviderId, Template};

use crate::definitions::KeywordDefinition;
use crate::error::{DefinitionError, DefinitionResult};

/// Builds the variant-specific part of a completion from a keyword
pub type VariantConstructor = fn(ProviderId, &KeywordDefinition) -> DefinitionResult<Completion>;

pub struct VariantRegistry {
    constructors: BTreeMap<String, VariantConstructor>,
}

impl VariantRegistry {
    /// Registry with no variants
    pub fn empty() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Registers (or replaces) the constructor for `type_name`
    pub fn register(&mut self, type_name: impl Into<String>, constructor: VariantConstructor) {
        self.constructors.insert(type_name.into(), constructor);
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Builds a completion for `keyword`, including its shared attributes
    pub fn construct(
        &self,
        provider: ProviderId,
        keyword: &KeywordDefinition,
    ) -> DefinitionResult<Completion> {
        let type_name = keyword.type_name()?;
        let constructor =
            self.constructors
                .get(type_name)
                .ok_or_else(|| DefinitionError::UnknownType {
                    keyword: keyword.name.clone().unwrap_or_default(),
                    type_name: type_name.to_string(),
                })?;
        let completion = constructor(provider, keyword)?;
        Ok(keyword.apply_common(completion))
    }
}

impl Default for VariantRegistry {
    /// `function`, `constant`, `variable`, `tag`, `template` and `other`
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("function", build_function);
        registry.register("constant", build_variable);
        registry.register("variable", build_variable);
        registry.register("tag", build_tag);
        registry.register("template", build_template);
        registry.register("other", build_basic);
        registry
    }
}

fn build_function(
    provider: ProviderId,
    keyword: &KeywordDefinition,
) -> DefinitionResult<Completion> {
    let completion = Completion::function(
        provider,
        keyword.name()?,
        keyword.return_type.as_deref(),
        keyword.parameters(),
    );
    Ok(match &keyword.return_value_desc {
        Some(desc) => completion.with_return_value_description(desc.as_str()),
        None => completion,
    })
}

fn build_variable(
    provider: ProviderId,
    keyword: &KeywordDefinition,
) -> DefinitionResult<Completion> {
    Ok(Completion::variable(
        provider,
        keyword.name()?,
        keyword.return_type.as_deref(),
    ))
}

fn build_tag(provider: ProviderId, keyword: &KeywordDefinition) -> DefinitionResult<Completion> {
    Ok(Completion::markup_tag(
        provider,
        keyword.name()?,
        keyword.parameters(),
    ))
}

fn build_template(
    provider: ProviderId,
    keyword: &KeywordDefinition,
) -> DefinitionResult<Completion> {
    let name = keyword.name()?;
    let source = keyword
        .template
        .as_deref()
        .ok_or_else(|| DefinitionError::MissingAttribute {
            keyword: name.to_string(),
            attribute: "template",
        })?;
    let template = Template::parse(source);
    if template.end_marker_count() > 1 {
        return Err(DefinitionError::DuplicateEndMarker {
            keyword: name.to_string(),
        });
    }
    Ok(Completion::template(provider, name, source, template))
}

fn build_basic(provider: ProviderId, keyword: &KeywordDefinition) -> DefinitionResult<Completion> {
    Ok(Completion::basic(provider, keyword.name()?))
}
