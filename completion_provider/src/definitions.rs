//! JSON completion definitions
//!
//! ```json
//! {
//!   "environment": { "paramStartChar": "(", "paramEndChar": ")", "paramSeparator": ", " },
//!   "keywords": [
//!     { "name": "printf", "type": "function", "returnType": "int", "definedIn": "stdio.h",
//!       "params": [{ "name": "format", "type": "const char *", "desc": "Format string" }],
//!       "desc": "Prints formatted output" }
//!   ]
//! }
//! ```

use completion_types::{Completion, ParamListDelimiters, Parameter, ProviderId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{DefinitionError, DefinitionResult};
use crate::registry::VariantRegistry;

/// Separator used when the environment names only the list characters
pub const DEFAULT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentDefinition>,
    #[serde(default)]
    pub keywords: Vec<KeywordDefinition>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentDefinition {
    #[serde(default)]
    pub param_start_char: Option<char>,
    #[serde(default)]
    pub param_end_char: Option<char>,
    #[serde(default)]
    pub param_separator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub defined_in: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamDefinition>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub return_value_desc: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub relevance: Option<i32>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamDefinition {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
}

impl ParamDefinition {
    pub fn to_parameter(&self) -> Parameter {
        Parameter {
            type_name: self.type_name.clone(),
            name: self.name.clone(),
            description: self.desc.clone(),
            is_end_param: false,
        }
    }
}

impl KeywordDefinition {
    /// Keyword name; empty or absent names are rejected
    pub fn name(&self) -> DefinitionResult<&str> {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(DefinitionError::MissingAttribute {
                keyword: String::from("<unnamed>"),
                attribute: "name",
            }),
        }
    }

    pub fn type_name(&self) -> DefinitionResult<&str> {
        let name = self.name()?;
        self.type_name
            .as_deref()
            .ok_or_else(|| DefinitionError::MissingAttribute {
                keyword: name.to_string(),
                attribute: "type",
            })
    }

    pub fn parameters(&self) -> Vec<Parameter> {
        self.params.iter().map(ParamDefinition::to_parameter).collect()
    }

    /// Copies the attributes every variant shares onto `completion`
    pub fn apply_common(&self, mut completion: Completion) -> Completion {
        completion.defined_in = self.defined_in.clone();
        completion.summary = self.desc.clone();
        completion.icon = self.icon.clone();
        if let Some(relevance) = self.relevance {
            completion.relevance = relevance;
        }
        completion
    }
}

impl DefinitionFile {
    pub fn from_json(json: &str) -> DefinitionResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            warn!("Rejected completion definitions: {}", e);
            DefinitionError::Malformed(e.to_string())
        })
    }

    /// Delimiters named by the environment, if it names any
    pub fn delimiters(&self) -> DefinitionResult<Option<ParamListDelimiters>> {
        let Some(env) = &self.environment else {
            return Ok(None);
        };
        match (env.param_start_char, env.param_end_char) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => {
                let separator = env.param_separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
                Ok(Some(ParamListDelimiters::new(start, separator, end)?))
            }
            (Some(_), None) => Err(DefinitionError::MissingAttribute {
                keyword: String::from("environment"),
                attribute: "paramEndChar",
            }),
            (None, Some(_)) => Err(DefinitionError::MissingAttribute {
                keyword: String::from("environment"),
                attribute: "paramStartChar",
            }),
        }
    }

    /// Builds every keyword, stopping at the first failure
    pub fn build(
        &self,
        provider: ProviderId,
        registry: &VariantRegistry,
    ) -> DefinitionResult<Vec<Completion>> {
        self.keywords
            .iter()
            .map(|keyword| {
                registry.construct(provider, keyword).inspect_err(|e| {
                    warn!("Rejected completion definition: {}", e);
                })
            })
            .collect()
    }
}
