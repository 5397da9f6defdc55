//! `notin-content` — storage access for Notin's markdown documents.
//!
//! Three cooperating pieces:
//! - [`PathResolver`]: identifier → on-disk location (total, infallible)
//! - [`ContentCache`]: TTL-bounded in-memory cache with lazy expiry
//! - [`ContentReader`]: resolver + cache + filesystem read with a
//!   fallback-on-error policy
//!
//! There is deliberately no process-wide default reader; callers construct
//! and pass their own instances.

pub mod cache;
pub mod paths;
pub mod reader;

pub use cache::{CacheEntryStats, CacheStats, ContentCache};
pub use paths::PathResolver;
pub use reader::ContentReader;
