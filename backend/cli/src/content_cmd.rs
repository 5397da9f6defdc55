//! Local content commands: list, render one document, build the whole set.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use notin_content::ContentReader;
use notin_core::{ContentId, ReadOptions};
use notin_markdown::RendererEngine;
use notin_session::{ContentManager, ContentNavigator, NavigationInfo};

use crate::config::Config;

fn reader_for(config: &Config) -> ContentReader {
    ContentReader::with_base(&config.content_dir, config.cache_ttl())
}

/// Print the available documents with their backing files and status.
pub async fn list(config: &Config) -> anyhow::Result<()> {
    let reader = reader_for(config);
    for id in ContentId::ALL {
        let status = match reader.metadata(id).await {
            Some(meta) => format!("{} B", meta.len()),
            None => "missing".to_string(),
        };
        println!(
            "{:<12} {:<14} {:<10} {}",
            id,
            id.file_name(),
            status,
            id.description()
        );
    }
    Ok(())
}

/// Render one document to HTML, to stdout or a file.
pub async fn render(
    config: &Config,
    id: ContentId,
    out: Option<&Path>,
    strict: bool,
) -> anyhow::Result<()> {
    let reader = reader_for(config);
    let opts = if strict {
        ReadOptions::strict()
    } else {
        ReadOptions::default()
    };
    let text = reader.read(id, &opts).await?;

    let engine = RendererEngine::with_defaults();
    let html = engine.render(&text, id.as_str());

    match out {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(id = %id, out = %path.display(), "document rendered");
        }
        None => print!("{html}"),
    }
    Ok(())
}

/// Render every document into `out` as a linked set of HTML pages.
///
/// All sources are read up front (missing ones degrade to the fallback
/// text), then a navigator walks the set so each page carries its position
/// and prev/next links.
pub async fn build(config: &Config, out: &Path) -> anyhow::Result<()> {
    let reader = reader_for(config);
    let all = reader.read_all(&ReadOptions::default()).await;

    let mut navigator = ContentNavigator::new(ContentManager::new());
    navigator.preload_all(all);

    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create {}", out.display()))?;

    let engine = RendererEngine::with_defaults();
    for index in 0..navigator.total() {
        navigator.go_to_index(index)?;
        let id = navigator.current_id();
        let info = navigator.navigation_info();
        let body = engine.render(navigator.manager().current_text(), id.as_str());
        let page = page_html(id, &info, &body);

        let path = out.join(format!("{id}.html"));
        std::fs::write(&path, page)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(id = %id, page = %path.display(), "page built");
    }

    println!("built {} pages into {}", navigator.total(), out.display());
    Ok(())
}

/// Wrap rendered markdown in a minimal page with navigation links.
fn page_html(id: ContentId, info: &NavigationInfo, body: &str) -> String {
    let previous = info
        .can_go_previous
        .then(|| ContentId::ALL[info.current_index - 1])
        .map(|prev| format!("<a href=\"{prev}.html\">&larr; {}</a>", prev.display_name()))
        .unwrap_or_default();
    let next = info
        .can_go_next
        .then(|| ContentId::ALL[info.current_index + 1])
        .map(|next| format!("<a href=\"{next}.html\">{} &rarr;</a>", next.display_name()))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <nav class=\"page-nav\">{previous}<span class=\"progress\">{progress}</span>{next}</nav>\n\
         {body}\
         </body>\n</html>\n",
        title = id.display_name(),
        progress = info.progress,
    )
}
