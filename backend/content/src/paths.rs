use std::path::{Path, PathBuf};

use notin_core::ContentId;

/// Maps content identifiers to concrete file locations.
///
/// Resolution is deterministic and total over the fixed identifier set:
/// `<base>/content/markdown/<file>`.
#[derive(Debug, Clone)]
pub struct PathResolver {
    base_dir: PathBuf,
}

impl PathResolver {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolver rooted at the current working directory.
    pub fn from_cwd() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Absolute path for the file backing `id`.
    pub fn resolve(&self, id: ContentId) -> PathBuf {
        self.base_dir
            .join("content")
            .join("markdown")
            .join(id.file_name())
    }

    /// File name for display and diagnostics.
    pub fn file_name(&self, id: ContentId) -> &'static str {
        id.file_name()
    }

    /// All identifier/path pairs in canonical order.
    pub fn all_paths(&self) -> Vec<(ContentId, PathBuf)> {
        ContentId::ALL
            .iter()
            .map(|&id| (id, self.resolve(id)))
            .collect()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::from_cwd()
    }
}
