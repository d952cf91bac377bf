//! # Completion Provider
//!
//! Catalogs of completions and the chain that decides which catalog answers.
//!
//! ## Philosophy
//!
//! - **Sorted catalog**: Prefix search is a binary search plus a forward scan
//! - **Composition over inheritance**: Parents and lexical children are shared `Rc`s
//! - **Read-only matching**: Queries never mutate a catalog
//! - **Fail fast on load**: A bad definition file installs nothing
//!
//! ## Key Types
//!
//! - [`Provider`]: The interface every provider implements
//! - [`CompletionProvider`]: Sorted catalog with optional parent
//! - [`LanguageAwareProvider`]: Delegates by the token group at the caret
//! - [`VariantRegistry`]: Maps definition type names to completion variants

pub mod catalog;
pub mod definitions;
pub mod error;
pub mod language_aware;
pub mod provider;
pub mod registry;

pub use catalog::{AutoActivation, CompletionProvider};
pub use definitions::{DefinitionFile, EnvironmentDefinition, KeywordDefinition, ParamDefinition};
pub use error::{DefinitionError, DefinitionResult};
pub use language_aware::LanguageAwareProvider;
pub use provider::{is_identifier_char, Provider};
pub use registry::{VariantConstructor, VariantRegistry};
