//! `notin-markdown` — markdown → HTML rendering for Notin documents.
//!
//! A [`RendererConfig`] declares which parsing extensions are active (GFM,
//! math) and how each markdown element kind is presented; a
//! [`RendererEngine`] built from it turns raw markdown text into HTML.
//! Engine construction is a pure function of the config.

pub mod config;
pub mod element;
pub mod engine;
pub mod highlight;

pub use config::{ConfigOptions, InputExtension, OutputExtension, RendererConfig};
pub use element::{ElementKind, RenderRule};
pub use engine::RendererEngine;
