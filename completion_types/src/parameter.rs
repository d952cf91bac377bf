//! Parameters of functions, templates and markup tags

use serde::{Deserialize, Serialize};

/// Placeholder used when a parameter has neither name nor type
pub const GENERIC_PARAM_LABEL: &str = "arg";

/// A parameter of a parameterized completion or an attribute of a tag
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marks the synthetic terminal "cursor" parameter
    #[serde(default)]
    pub is_end_param: bool,
}

impl Parameter {
    pub fn new(type_name: Option<&str>, name: Option<&str>) -> Self {
        Self {
            type_name: type_name.map(String::from),
            name: name.map(String::from),
            description: None,
            is_end_param: false,
        }
    }

    /// A parameter known only by name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The synthetic terminal parameter
    pub fn end_param() -> Self {
        Self {
            is_end_param: true,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Text inserted for this parameter: name, else type, else a generic label
    pub fn placeholder_text(&self) -> &str {
        self.name
            .as_deref()
            .or(self.type_name.as_deref())
            .unwrap_or(GENERIC_PARAM_LABEL)
    }

    /// `"<type> <name>"`, or whichever of the two is present
    pub fn signature(&self) -> String {
        match (&self.type_name, &self.name) {
            (Some(t), Some(n)) => format!("{} {}", t, n),
            (Some(t), None) => t.clone(),
            (None, Some(n)) => n.clone(),
            (None, None) => GENERIC_PARAM_LABEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_prefers_name() {
        let param = Parameter::new(Some("int"), Some("count"));
        assert_eq!(param.placeholder_text(), "count");
    }

    #[test]
    fn test_placeholder_falls_back_to_type() {
        let param = Parameter::new(Some("int"), None);
        assert_eq!(param.placeholder_text(), "int");
    }

    #[test]
    fn test_placeholder_generic_label() {
        let param = Parameter::new(None, None);
        assert_eq!(param.placeholder_text(), "arg");
    }

    #[test]
    fn test_signature() {
        assert_eq!(Parameter::new(Some("char *"), Some("s")).signature(), "char * s");
        assert_eq!(Parameter::named("x").signature(), "x");
    }

    #[test]
    fn test_end_param() {
        let param = Parameter::end_param();
        assert!(param.is_end_param);
        assert!(param.name.is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let param: Parameter = serde_json::from_str(r#"{"name":"fmt"}"#).unwrap();
        assert_eq!(param.name.as_deref(), Some("fmt"));
        assert!(!param.is_end_param);
        assert!(param.description.is_none());
    }
}
