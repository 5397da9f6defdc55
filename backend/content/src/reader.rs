use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};
use notin_core::{ContentId, ContentRecord, NotinError, ReadOptions};
use tokio::fs;
use tracing::{debug, warn};

use crate::cache::{CacheStats, ContentCache};
use crate::paths::PathResolver;

/// Orchestrates resolver, cache, and filesystem reads.
///
/// Missing or unreadable sources degrade to the configured fallback text
/// unless the caller opted into strict mode via
/// [`ReadOptions::throw_on_missing`]. Fallback text never populates the
/// cache.
#[derive(Debug)]
pub struct ContentReader {
    cache: ContentCache,
    resolver: PathResolver,
}

impl ContentReader {
    pub fn new(cache: ContentCache, resolver: PathResolver) -> Self {
        Self { cache, resolver }
    }

    /// Reader rooted at `base_dir` with the given cache TTL.
    pub fn with_base(base_dir: impl Into<std::path::PathBuf>, ttl: Duration) -> Self {
        Self::new(ContentCache::new(ttl), PathResolver::new(base_dir))
    }

    /// Read the raw markdown text for `id`.
    pub async fn read(&self, id: ContentId, opts: &ReadOptions) -> Result<String, NotinError> {
        if opts.enable_caching {
            if let Some(text) = self.cache.get(id) {
                debug!(id = %id, "content served from cache");
                return Ok(text);
            }
        }

        let path = self.resolver.resolve(id);
        match self.read_file(&path).await {
            Ok((text, last_modified)) => {
                if opts.enable_caching {
                    self.cache.set(id, text.clone(), last_modified);
                }
                Ok(text)
            }
            Err(err) => {
                if opts.throw_on_missing {
                    return Err(NotinError::ContentUnavailable { id, source: err });
                }
                warn!(id = %id, file = self.resolver.file_name(id), error = %err,
                    "content read failed, using fallback text");
                Ok(opts.fallback_text.clone())
            }
        }
    }

    async fn read_file(&self, path: &Path) -> anyhow::Result<(String, Option<DateTime<Utc>>)> {
        // Metadata probe doubles as the existence check and captures mtime
        // for the cache entry.
        let meta = fs::metadata(path)
            .await
            .with_context(|| format!("markdown file not found: {}", path.display()))?;
        let last_modified = meta.modified().ok().map(DateTime::<Utc>::from);
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read markdown file: {}", path.display()))?;
        Ok((text, last_modified))
    }

    /// Read every identifier concurrently.
    ///
    /// A failing identifier degrades to the fallback text in the result map
    /// rather than aborting the batch; the batch itself never fails.
    pub async fn read_all(&self, opts: &ReadOptions) -> HashMap<ContentId, String> {
        let reads = ContentId::ALL.iter().map(|&id| {
            let relaxed = ReadOptions {
                throw_on_missing: false,
                ..opts.clone()
            };
            async move {
                let text = self
                    .read(id, &relaxed)
                    .await
                    .unwrap_or_else(|_| relaxed.fallback_text.clone());
                (id, text)
            }
        });
        futures::future::join_all(reads).await.into_iter().collect()
    }

    /// Same as [`read`](Self::read) plus best-effort file metadata.
    ///
    /// A failing metadata probe leaves `last_modified`/`size_bytes` unset
    /// without affecting the text result.
    pub async fn read_with_metadata(
        &self,
        id: ContentId,
        opts: &ReadOptions,
    ) -> Result<ContentRecord, NotinError> {
        let text = self.read(id, opts).await?;
        let (last_modified, size_bytes) = match self.metadata(id).await {
            Some(meta) => (
                meta.modified().ok().map(DateTime::<Utc>::from),
                Some(meta.len()),
            ),
            None => (self.cache.last_modified(id), None),
        };
        Ok(ContentRecord {
            id,
            text,
            last_modified,
            size_bytes,
        })
    }

    pub async fn file_exists(&self, id: ContentId) -> bool {
        fs::metadata(self.resolver.resolve(id)).await.is_ok()
    }

    /// Raw filesystem metadata for the backing file, if it exists.
    pub async fn metadata(&self, id: ContentId) -> Option<std::fs::Metadata> {
        fs::metadata(self.resolver.resolve(id)).await.ok()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};

    static DIR_SEQ: AtomicU32 = AtomicU32::new(0);

    /// Fresh content tree under the system temp dir, seeded with all three
    /// documents.
    fn scratch_content_dir() -> PathBuf {
        let base = std::env::temp_dir().join(format!(
            "notin-reader-test-{}-{}",
            std::process::id(),
            DIR_SEQ.fetch_add(1, Ordering::SeqCst)
        ));
        let dir = base.join("content").join("markdown");
        std::fs::create_dir_all(&dir).unwrap();
        for id in ContentId::ALL {
            std::fs::write(dir.join(id.file_name()), format!("# {}\n\nbody\n", id)).unwrap();
        }
        base
    }

    #[tokio::test]
    async fn reads_file_contents() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        let text = reader.read(ContentId::Demo, &ReadOptions::default()).await.unwrap();
        assert_eq!(text, "# demo\n\nbody\n");
    }

    #[tokio::test]
    async fn missing_file_falls_back_without_caching() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        std::fs::remove_file(reader.resolver().resolve(ContentId::Demo)).unwrap();

        let text = reader.read(ContentId::Demo, &ReadOptions::default()).await.unwrap();
        assert_eq!(text, notin_core::DEFAULT_FALLBACK_TEXT);
        assert!(!reader.cache().has(ContentId::Demo));
    }

    #[tokio::test]
    async fn missing_file_errors_in_strict_mode() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        std::fs::remove_file(reader.resolver().resolve(ContentId::Demo)).unwrap();

        let err = reader
            .read(ContentId::Demo, &ReadOptions::strict())
            .await
            .unwrap_err();
        match err {
            NotinError::ContentUnavailable { id, .. } => assert_eq!(id, ContentId::Demo),
            other => panic!("expected ContentUnavailable, got {other}"),
        }
    }

    #[tokio::test]
    async fn second_read_is_served_from_cache() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        let opts = ReadOptions::default();

        let first = reader.read(ContentId::ShortDemo, &opts).await.unwrap();
        // Remove the backing file: only the cache can satisfy the re-read.
        std::fs::remove_file(reader.resolver().resolve(ContentId::ShortDemo)).unwrap();
        let second = reader.read(ContentId::ShortDemo, &opts).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn disabled_caching_hits_storage_every_time() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        let opts = ReadOptions::uncached();

        reader.read(ContentId::Demo, &opts).await.unwrap();
        assert!(!reader.cache().has(ContentId::Demo));

        let path = reader.resolver().resolve(ContentId::Demo);
        std::fs::write(&path, "# edited\n").unwrap();
        let text = reader.read(ContentId::Demo, &opts).await.unwrap();
        assert_eq!(text, "# edited\n");
    }

    #[tokio::test]
    async fn read_all_degrades_single_failures() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        std::fs::remove_file(reader.resolver().resolve(ContentId::ShortDemo)).unwrap();

        let all = reader.read_all(&ReadOptions::default()).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[&ContentId::Demo], "# demo\n\nbody\n");
        assert_eq!(all[&ContentId::ShortDemo], notin_core::DEFAULT_FALLBACK_TEXT);
        assert_eq!(all[&ContentId::MathTest], "# math-test\n\nbody\n");
    }

    #[tokio::test]
    async fn read_all_never_fails_even_in_strict_mode() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        std::fs::remove_file(reader.resolver().resolve(ContentId::Demo)).unwrap();

        let all = reader.read_all(&ReadOptions::strict()).await;
        assert_eq!(all.len(), 3);
        assert_eq!(all[&ContentId::Demo], notin_core::DEFAULT_FALLBACK_TEXT);
    }

    #[tokio::test]
    async fn metadata_is_best_effort() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));

        let record = reader
            .read_with_metadata(ContentId::Demo, &ReadOptions::default())
            .await
            .unwrap();
        assert_eq!(record.id, ContentId::Demo);
        assert!(record.size_bytes.is_some());
        assert!(record.last_modified.is_some());

        // Deleting the file degrades metadata, not the (cached) text.
        std::fs::remove_file(reader.resolver().resolve(ContentId::Demo)).unwrap();
        let record = reader
            .read_with_metadata(ContentId::Demo, &ReadOptions::default())
            .await
            .unwrap();
        assert_eq!(record.text, "# demo\n\nbody\n");
        assert_eq!(record.size_bytes, None);
    }

    #[tokio::test]
    async fn file_exists_reflects_storage() {
        let base = scratch_content_dir();
        let reader = ContentReader::with_base(&base, Duration::from_secs(60));
        assert!(reader.file_exists(ContentId::Demo).await);
        std::fs::remove_file(reader.resolver().resolve(ContentId::Demo)).unwrap();
        assert!(!reader.file_exists(ContentId::Demo).await);
    }
}
