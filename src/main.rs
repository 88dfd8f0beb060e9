mod commands;
mod services;
mod store;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use canvas::consts::PREVIEW_WIDTH;
use canvas::doc::{ContentError, ElementKind};
use canvas::geometry::Size;
use canvas::pages::{AlbumRecord, find_format, standard_formats};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::services::persistence::{SaveDispatcher, drain};
use crate::store::{AlbumStore, FileAlbumStore, StoreError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("invalid page content: {0}")]
    Content(#[from] ContentError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("page index {index} out of range; album has {count} pages")]
    PageIndex { index: usize, count: usize },
    #[error("unknown format `{0}`; run `photobook formats` for the list")]
    UnknownFormat(String),
}

#[derive(Parser, Debug)]
#[command(name = "photobook", about = "Inspect, preview and maintain photobook albums")]
struct Cli {
    /// Album JSON file.
    #[arg(long, env = "PHOTOBOOK_ALBUM", default_value = "album.json")]
    album: PathBuf,

    /// How long to wait for in-flight saves before exiting.
    #[arg(long, env = "PHOTOBOOK_DRAIN_TIMEOUT_MS", default_value_t = 5000)]
    drain_timeout_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the print format catalog.
    Formats,
    /// Create a new album with front and back covers.
    New {
        #[arg(long)]
        title: String,
        /// Format slug, e.g. `a4-landscape`.
        #[arg(long, env = "PHOTOBOOK_FORMAT", default_value = "square-20")]
        format: String,
    },
    /// Page overview with element counts.
    Pages {
        #[arg(long, default_value_t = 0)]
        active: usize,
    },
    /// Layer panel rows for one page.
    Layers {
        #[arg(long)]
        page: usize,
    },
    /// Projected preview of one page as JSON.
    Preview {
        #[arg(long)]
        page: usize,
        #[arg(long, env = "PHOTOBOOK_PREVIEW_WIDTH", default_value_t = PREVIEW_WIDTH)]
        width: f64,
    },
    /// Fit-to-screen zoom for a container size.
    Fit {
        #[arg(long)]
        container_width: f64,
        #[arg(long)]
        container_height: f64,
    },
    /// Report pages whose content does not parse.
    Check,
    /// Re-save every page so defaults are written back.
    Migrate,
    /// Insert a blank page before the back cover.
    AddPage,
    /// Remove an inner page.
    RemovePage { page_id: String },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let drain_timeout = Duration::from_millis(cli.drain_timeout_ms);

    match cli.command {
        Command::Formats => print_json(&standard_formats()),
        Command::New { title, format } => {
            let format = find_format(&format).ok_or(CliError::UnknownFormat(format))?;
            let album = AlbumRecord::new(title, format.format());
            FileAlbumStore::create(&cli.album, &album).await?;
            print_json(&album)
        }
        Command::Pages { active } => {
            let album = load(&cli.album).await?;
            for page in commands::page_summaries(&album, active) {
                let marker = if page.active { '*' } else { ' ' };
                let elements = page.elements.map_or_else(|| "unreadable".to_owned(), |n| format!("{n} elements"));
                println!("{marker} {:>3}  {:<12} {:<38} {elements}", page.index, page.label, page.page_id);
            }
            Ok(())
        }
        Command::Layers { page } => {
            let album = load(&cli.album).await?;
            for entry in commands::layers_for(&album, page)? {
                let kind = match entry.kind {
                    ElementKind::Photo => "photo",
                    ElementKind::Text => "text",
                };
                println!("{:<9} {kind:<6} {}", entry.layer_caption(), entry.label);
            }
            Ok(())
        }
        Command::Preview { page, width } => {
            let album = load(&cli.album).await?;
            print_json(&commands::preview_for(&album, page, width)?)
        }
        Command::Fit { container_width, container_height } => {
            let album = load(&cli.album).await?;
            print_json(&commands::fit_for(&album, Size::new(container_width, container_height)))
        }
        Command::Check => {
            let album = load(&cli.album).await?;
            let problems = commands::check_album(&album);
            if problems.is_empty() {
                println!("all {} pages readable", album.pages.len());
                return Ok(());
            }
            print_json(&problems)
        }
        Command::Migrate => {
            let store: Arc<FileAlbumStore> = Arc::new(FileAlbumStore::open(&cli.album));
            let album = store.read().await?;
            let path = store.path().display().to_string();
            let dispatcher = SaveDispatcher::new(store);
            let handles = commands::migrate_album(&album, &dispatcher)?;
            let dispatched = handles.len();
            let finished = drain(handles, drain_timeout).await;
            info!(%path, dispatched, finished, "migration complete");
            Ok(())
        }
        Command::AddPage => {
            let store = FileAlbumStore::open(&cli.album);
            print_json(&store.add_page().await?)
        }
        Command::RemovePage { page_id } => {
            let store = FileAlbumStore::open(&cli.album);
            print_json(&store.remove_page(&page_id).await?)
        }
    }
}

async fn load(path: &Path) -> Result<AlbumRecord, CliError> {
    Ok(FileAlbumStore::open(path).read().await?)
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
