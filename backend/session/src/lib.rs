//! `notin-session` — per-view content state and navigation.
//!
//! A [`ContentManager`] holds the current and all loaded document texts for
//! one session; a [`ContentNavigator`] wraps a manager to sequence through
//! the fixed document set, notifying subscribed observers on change.
//! Neither performs I/O: documents are read by `notin-content` and handed
//! in via `load`/`load_all`.

pub mod manager;
pub mod navigator;

pub use manager::ContentManager;
pub use navigator::{ContentNavigator, NavigationInfo, ObserverId};
