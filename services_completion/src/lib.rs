//! # Completion Service
//!
//! Drives code completion inside a text buffer: the suggestion popup, the
//! auto-activation timer, provider cycling and parameter assistance.
//!
//! ## Philosophy
//!
//! - **Explicit time**: Auto-activation and deferred work advance only on `tick`
//! - **Host owns the buffer**: The controller edits a `Document` it is lent per call
//! - **Events out**: Popup and session changes are recorded, not called back
//! - **Config is a value**: Passed in and validated, never global
//!
//! ## Key Types
//!
//! - [`CompletionController`]: The popup/session state machine
//! - [`ParameterSession`]: Tab-navigable parameter highlights after an insertion
//! - [`ProviderCycle`]: Round-robin over several providers
//! - [`CompletionEditor`]: A document plus controller with default key editing

pub mod config;
pub mod controller;
pub mod cycle;
pub mod editor;
pub mod events;
pub mod insertion;
pub mod param_context;
pub mod snapshot;
pub mod task_queue;

pub use config::{CompletionConfig, ConfigError, ConfigResult};
pub use controller::{
    CompletionController, ControllerError, ControllerResult, ControllerState, KeyOutcome, Popup,
};
pub use cycle::ProviderCycle;
pub use editor::CompletionEditor;
pub use events::{CompletionEvent, SessionId};
pub use insertion::{expand_template, plan_insertion, InsertionPlan};
pub use param_context::{CloseAction, ParameterSession, SessionKind, SessionOutcome};
pub use snapshot::{CompletionSnapshot, SnapshotRange};
pub use task_queue::{SessionTask, TaskQueue};
