//! Note commands against the remote Notin API.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Subcommand;

use notin_api::{NoteSource, TokenStore};

use crate::auth_cmd::authenticated_client;
use crate::config::Config;

#[derive(Subcommand)]
pub enum NotesCommand {
    /// List your generated notes.
    List,
    /// Generate a note from a PDF, DOCX, or YouTube source.
    Generate {
        /// Path to a PDF document.
        #[arg(long, conflicts_with_all = ["docx", "youtube"])]
        pdf: Option<PathBuf>,
        /// Path to a DOCX document.
        #[arg(long, conflicts_with = "youtube")]
        docx: Option<PathBuf>,
        /// YouTube video URL.
        #[arg(long)]
        youtube: Option<String>,
    },
}

pub async fn run(config: &Config, command: NotesCommand) -> anyhow::Result<()> {
    let store = TokenStore::default_location();
    let client = authenticated_client(config, &store);
    if client.token().is_none() {
        bail!("not logged in; run `notin auth login` first");
    }

    match command {
        NotesCommand::List => {
            let notes = client.collect_notes().await?;
            if notes.is_empty() {
                println!("no notes yet");
                return Ok(());
            }
            for note in notes {
                println!(
                    "#{:<5} {:<40} {}",
                    note.id,
                    note.title,
                    note.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        NotesCommand::Generate { pdf, docx, youtube } => {
            let source = match (pdf, docx, youtube) {
                (Some(path), None, None) => NoteSource::Pdf {
                    file_name: file_name_of(&path)?,
                    bytes: read_source(&path)?,
                },
                (None, Some(path), None) => NoteSource::Docx {
                    file_name: file_name_of(&path)?,
                    bytes: read_source(&path)?,
                },
                (None, None, Some(url)) => NoteSource::Youtube { url },
                _ => bail!("pass exactly one of --pdf, --docx, or --youtube"),
            };
            let note = client.generate_note(source).await?;
            println!("generated note #{}: {}", note.id, note.title);
        }
    }
    Ok(())
}

fn file_name_of(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("no file name in {}", path.display()))
}

fn read_source(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
