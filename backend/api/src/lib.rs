//! `notin-api` — typed client for the remote Notin HTTP API.
//!
//! The API itself (authentication, note generation, note storage) is an
//! external collaborator; this crate only speaks its wire contract. Every
//! non-success response surfaces as a single human-readable
//! `RemoteRequestFailed` message built from the server's `detail` field
//! when present. No automatic retries.

pub mod client;
pub mod token;
pub mod types;

pub use client::{ACCESS_TOKEN_COOKIE, ApiClient};
pub use token::TokenStore;
pub use types::{LoginRequest, Note, NoteSource, RegisterRequest, User};
