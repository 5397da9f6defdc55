//! `notin-logging` — structured logging for the Notin content engine.
//!
//! Wraps `tracing` with a console layer plus a daily-rolling NDJSON file
//! layer, and provides token redaction for anything that might carry an
//! access token into the logs.

pub mod logger;
pub mod redact;

pub use logger::init_logging;
pub use redact::{redact_token, scrub};
