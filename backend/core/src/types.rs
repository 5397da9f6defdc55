use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for one of the fixed set of markdown documents.
///
/// The set is closed at build time: every identifier maps to exactly one
/// file name, display name, and description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentId {
    Demo,
    ShortDemo,
    MathTest,
}

impl ContentId {
    /// All identifiers, in canonical navigation order.
    pub const ALL: [ContentId; 3] = [ContentId::Demo, ContentId::ShortDemo, ContentId::MathTest];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentId::Demo => "demo",
            ContentId::ShortDemo => "short-demo",
            ContentId::MathTest => "math-test",
        }
    }

    /// File name backing this identifier, relative to the content directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            ContentId::Demo => "demo.md",
            ContentId::ShortDemo => "short-demo.md",
            ContentId::MathTest => "math-test.md",
        }
    }

    /// Human-readable name for navigation UIs and diagnostics.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentId::Demo => "Full Demo",
            ContentId::ShortDemo => "Quick Demo",
            ContentId::MathTest => "Math Examples",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContentId::Demo => "Comprehensive markdown demonstration with all features",
            ContentId::ShortDemo => "Quick overview of basic markdown formatting",
            ContentId::MathTest => "Mathematical expressions and LaTeX examples",
        }
    }

    /// Position of this identifier within [`ContentId::ALL`].
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|id| id == self).unwrap_or(0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentId {
    type Err = crate::NotinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(ContentId::Demo),
            "short-demo" => Ok(ContentId::ShortDemo),
            "math-test" => Ok(ContentId::MathTest),
            other => Err(crate::NotinError::Config(format!(
                "unknown content identifier: {other}"
            ))),
        }
    }
}

/// A loaded piece of content plus best-effort file metadata.
///
/// Immutable once produced; a fresh read replaces the record rather than
/// mutating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub text: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub size_bytes: Option<u64>,
}

/// Placeholder markdown substituted when a content file cannot be loaded
/// and strict mode is off.
pub const DEFAULT_FALLBACK_TEXT: &str = "\
# Content Not Available

Sorry, the requested content could not be loaded at this time.

## What you can do:
- Try refreshing the page
- Check your internet connection
- Contact support if the problem persists

> This is a fallback message displayed when content files are unavailable.";

/// Options controlling a single content read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Consult and populate the cache around the storage read.
    pub enable_caching: bool,
    /// Text substituted when the source is missing and strict mode is off.
    pub fallback_text: String,
    /// Surface missing/unreadable sources as errors instead of falling back.
    pub throw_on_missing: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            enable_caching: true,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            throw_on_missing: false,
        }
    }
}

impl ReadOptions {
    /// Strict variant: missing content is an error, never a fallback.
    pub fn strict() -> Self {
        Self {
            throw_on_missing: true,
            ..Self::default()
        }
    }

    /// Variant that bypasses the cache entirely.
    pub fn uncached() -> Self {
        Self {
            enable_caching: false,
            ..Self::default()
        }
    }
}
