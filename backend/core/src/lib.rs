//! `notin-core` — shared types for the Notin content engine.
//!
//! Holds the closed set of content identifiers, the content record and
//! read-option types shared by the I/O and session layers, and the
//! runtime-wide error type.

pub mod error;
pub mod types;

pub use error::NotinError;
pub use types::{ContentId, ContentRecord, ReadOptions, DEFAULT_FALLBACK_TEXT};
