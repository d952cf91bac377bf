#![no_std]

//! # Editor Core
//!
//! Shared text-buffer primitives for the completion engine and its hosts.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same edit trace => same document, anchors and ranges
//! - **Offsets, not lines**: Everything is addressed by character offset
//! - **Explicit tracking**: Anchors and ranges carry a documented bias rule
//! - **Events, not callbacks**: Edits are recorded and drained by the host
//!
//! ## Design
//!
//! The core provides:
//! - Document: Text storage, caret/selection and edit events
//! - AnchorArena: Offsets that follow edits made before them
//! - RangeTracker: Tagged ranges (highlights) that follow edits
//! - TextView: Read-only view consumed by completion providers
//! - LexicalClassifier: Seam for external tokenizers

extern crate alloc;

pub mod anchor;
pub mod buffer;
pub mod highlight;
pub mod key;
pub mod lexer;
pub mod view;

pub use anchor::{AnchorArena, AnchorId, Bias};
pub use buffer::{Document, DocumentEvent, Selection};
pub use highlight::{RangeId, RangeTag, RangeTracker, TrackedRange};
pub use key::Key;
pub use lexer::{LexicalClassifier, SpanClassifier, TokenGroup};
pub use view::TextView;
