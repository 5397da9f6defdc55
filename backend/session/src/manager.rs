use std::collections::HashMap;

use notin_core::{ContentId, ContentRecord, NotinError};

/// Holds the current and all loaded document texts for one session.
///
/// The manager never reads storage itself; callers load server-resident
/// content through `notin-content` first and hand the text in. The current
/// text always tracks whatever was last accepted by
/// [`set_current`](Self::set_current)/[`load`](Self::load), even when that
/// value is absent from the loaded map.
#[derive(Debug)]
pub struct ContentManager {
    current_text: String,
    current_id: ContentId,
    loaded: HashMap<ContentId, String>,
}

impl ContentManager {
    pub fn new() -> Self {
        Self {
            current_text: String::new(),
            current_id: ContentId::Demo,
            loaded: HashMap::new(),
        }
    }

    /// Set the current text directly; when an identifier is given, the
    /// loaded map is seeded with it too.
    pub fn set_current(&mut self, text: impl Into<String>, id: Option<ContentId>) {
        let text = text.into();
        if let Some(id) = id {
            self.current_id = id;
            self.loaded.insert(id, text.clone());
        }
        self.current_text = text;
    }

    /// Adopt `id` as current.
    ///
    /// With `text` supplied the value is stored and adopted; without it the
    /// previously loaded value is adopted, or `ContentNotLoaded` surfaces —
    /// asking for never-loaded content is a programming error, not an
    /// environmental one.
    pub fn load(&mut self, id: ContentId, text: Option<String>) -> Result<String, NotinError> {
        if let Some(text) = text {
            self.loaded.insert(id, text.clone());
            self.current_text = text.clone();
            self.current_id = id;
            return Ok(text);
        }

        match self.loaded.get(&id) {
            Some(cached) => {
                self.current_text = cached.clone();
                self.current_id = id;
                Ok(self.current_text.clone())
            }
            None => Err(NotinError::ContentNotLoaded(id)),
        }
    }

    /// Merge identifier→text pairs into the loaded store.
    pub fn load_all(
        &mut self,
        all: HashMap<ContentId, String>,
    ) -> HashMap<ContentId, String> {
        for (id, text) in &all {
            self.loaded.insert(*id, text.clone());
        }
        all
    }

    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    pub fn current_id(&self) -> ContentId {
        self.current_id
    }

    /// The fixed identifier set, in navigation order.
    pub fn available(&self) -> &'static [ContentId] {
        &ContentId::ALL
    }

    pub fn count(&self) -> usize {
        ContentId::ALL.len()
    }

    /// Position of the current identifier within the available list.
    pub fn current_index(&self) -> Option<usize> {
        ContentId::ALL.iter().position(|id| *id == self.current_id)
    }

    /// Loaded text plus metadata placeholders for `id`.
    pub fn record(&self, id: ContentId) -> Result<ContentRecord, NotinError> {
        let text = self
            .loaded
            .get(&id)
            .ok_or(NotinError::ContentNotLoaded(id))?;
        Ok(ContentRecord {
            id,
            text: text.clone(),
            last_modified: None,
            size_bytes: None,
        })
    }

    pub fn display_name(&self, id: ContentId) -> &'static str {
        id.display_name()
    }

    pub fn description(&self, id: ContentId) -> &'static str {
        id.description()
    }

    pub fn is_cached(&self, id: ContentId) -> bool {
        self.loaded.contains_key(&id)
    }

    pub fn cached_text(&self, id: ContentId) -> Option<&str> {
        self.loaded.get(&id).map(String::as_str)
    }

    pub fn clear_cache(&mut self) {
        self.loaded.clear();
    }
}

impl Default for ContentManager {
    fn default() -> Self {
        Self::new()
    }
}
