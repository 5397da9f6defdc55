//! `notin` — command-line entry point for the Notin content engine.
//!
//! Local commands (`list`, `render`, `build`) exercise the content pipeline
//! end to end: resolve → read (with cache and fallback) → render to HTML.
//! Remote commands (`auth`, `notes`) speak to the Notin API.

mod auth_cmd;
mod config;
mod content_cmd;
mod notes_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use notin_core::{ContentId, NotinError};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "notin", version, about = "Notin markdown content engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available documents.
    List,
    /// Render one document to HTML.
    Render {
        /// Document identifier (demo, short-demo, math-test).
        #[arg(value_parser = parse_content_id)]
        id: ContentId,
        /// Write the HTML here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Fail on a missing source instead of using the fallback text.
        #[arg(long)]
        strict: bool,
    },
    /// Render every document into a static site directory.
    Build {
        /// Output directory.
        #[arg(long, default_value = "dist")]
        out: PathBuf,
    },
    /// Account management against the remote API.
    Auth {
        #[command(subcommand)]
        command: auth_cmd::AuthCommand,
    },
    /// Note generation and retrieval against the remote API.
    Notes {
        #[command(subcommand)]
        command: notes_cmd::NotesCommand,
    },
}

fn parse_content_id(raw: &str) -> Result<ContentId, String> {
    raw.parse().map_err(|e: NotinError| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    notin_logging::init_logging(&config.log_dir, &config.log_level);

    let cli = Cli::parse();
    match cli.command {
        Commands::List => content_cmd::list(&config).await?,
        Commands::Render { id, out, strict } => {
            content_cmd::render(&config, id, out.as_deref(), strict).await?
        }
        Commands::Build { out } => content_cmd::build(&config, &out).await?,
        Commands::Auth { command } => auth_cmd::run(&config, command).await?,
        Commands::Notes { command } => notes_cmd::run(&config, command).await?,
    }
    Ok(())
}
