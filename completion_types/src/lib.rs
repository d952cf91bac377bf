//! # Completion Types
//!
//! This crate defines the completion model shared by providers, the
//! controller and presentation layers.
//!
//! ## Philosophy
//!
//! - **Closed set of variants**: Basic, Variable, Function, MarkupTag, Template
//! - **Pure data**: No buffer access, no provider references beyond an id
//! - **Parse once**: Templates are parsed when the completion is defined
//!
//! ## Key Types
//!
//! - [`Completion`]: A single entry in a provider catalog
//! - [`Parameter`]: A function/template/tag parameter
//! - [`Template`]: A parsed template with parameters and copies
//! - [`ParamListDelimiters`]: Validated parameter-list punctuation
//! - [`ProviderId`]: Non-owning back-reference to the producing provider

pub mod completion;
pub mod delimiters;
pub mod ids;
pub mod ordering;
pub mod parameter;
pub mod template;

pub use completion::{Completion, CompletionKind};
pub use delimiters::{DelimiterError, ParamListDelimiters};
pub use ids::ProviderId;
pub use ordering::{
    compare_input_text, sort_by_input_text, sort_by_relevance, starts_with_ignore_case,
};
pub use parameter::Parameter;
pub use template::{Template, TemplatePiece, END_MARKER};
