//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed arguments
//! and returns an `anyhow::Result<()>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::config::{self, Config};
use crate::enrichment::SongInfoClient;
use crate::library::{SongService, SqliteSongStore};
use crate::model::{NewSong, Pagination, SongFilter};
use crate::{api, db};

/// Song Library CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a config file (defaults to the OS config directory)
    #[arg(long, global = true, env = "SONG_LIBRARY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "SONG_LIBRARY_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP service (default)
    Serve {
        /// Address to listen on
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// SQLite database file
        #[arg(long)]
        db: Option<PathBuf>,
        /// Base URL of the song-info service
        #[arg(long)]
        enrichment_url: Option<String>,
    },
    /// List songs in the database
    List {
        /// Only songs by this group
        #[arg(long)]
        group: Option<String>,
        /// Only songs with this title
        #[arg(long)]
        title: Option<String>,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Songs per page
        #[arg(long, default_value_t = crate::model::DEFAULT_PAGE_SIZE)]
        size: u32,
    },
    /// Look up a song and store it
    Add {
        /// Performing group
        #[arg(long)]
        group: String,
        /// Song title
        #[arg(long)]
        title: String,
    },
    /// Print a page of a song's verses
    Text {
        /// Song ID
        id: i64,
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Verses per page
        #[arg(long, default_value_t = crate::model::DEFAULT_PAGE_SIZE)]
        size: u32,
    },
}

/// Run the parsed command. No subcommand means `serve` with no overrides.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    let rt = Runtime::new()?;

    match &cli.command {
        None => cmd_serve(&rt, config),
        Some(Commands::Serve {
            host,
            port,
            db,
            enrichment_url,
        }) => {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(path) = db {
                config.database.url = db::db_url(Some(path));
            }
            if let Some(url) = enrichment_url {
                config.enrichment.base_url = url.trim_end_matches('/').to_string();
            }
            cmd_serve(&rt, config)
        }
        Some(Commands::List {
            group,
            title,
            page,
            size,
        }) => cmd_list(&rt, &config, group.clone(), title.clone(), *page, *size),
        Some(Commands::Add { group, title }) => cmd_add(&rt, &config, group, title),
        Some(Commands::Text { id, page, size }) => cmd_text(&rt, &config, *id, *page, *size),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => config::load(),
    };
    debug!(?config, "Loaded config");
    Ok(config)
}

/// Wire the store and the song-info client into a service.
async fn build_service(config: &Config) -> anyhow::Result<SongService> {
    config.validate().context("Invalid configuration")?;

    let pool = db::init_pool(&config.database)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    let client = SongInfoClient::new(&config.enrichment).context("Failed to build HTTP client")?;

    Ok(SongService::new(
        Arc::new(client),
        Arc::new(SqliteSongStore::new(pool)),
    ))
}

// ============================================================================
// Individual command implementations
// ============================================================================

fn cmd_serve(rt: &Runtime, config: Config) -> anyhow::Result<()> {
    rt.block_on(async {
        let service = build_service(&config).await?;
        let addr = config.server.bind_addr();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!(
            database = %config.database.url,
            enrichment = %config.enrichment.base_url,
            "Starting song library"
        );
        api::serve(listener, service).await?;
        Ok(())
    })
}

fn cmd_list(
    rt: &Runtime,
    config: &Config,
    group: Option<String>,
    title: Option<String>,
    page: u32,
    size: u32,
) -> anyhow::Result<()> {
    rt.block_on(async {
        let service = build_service(config).await?;
        let filter = SongFilter::from_optional(group, title);
        let songs = service
            .list_songs(&filter, Pagination::new(page, size)?)
            .await?;

        if songs.is_empty() {
            println!("No songs found.");
            return Ok(());
        }
        for song in songs {
            println!(
                "{:>5}  {} - {} ({})",
                song.id, song.group, song.title, song.release_date
            );
        }
        Ok(())
    })
}

fn cmd_add(rt: &Runtime, config: &Config, group: &str, title: &str) -> anyhow::Result<()> {
    rt.block_on(async {
        let service = build_service(config).await?;
        let song = service.create_song(NewSong::new(group, title)).await?;

        println!("Added song {}", song.id);
        println!("  Group:    {}", song.group);
        println!("  Title:    {}", song.title);
        println!("  Released: {}", song.release_date);
        println!("  Link:     {}", song.link);
        Ok(())
    })
}

fn cmd_text(rt: &Runtime, config: &Config, id: i64, page: u32, size: u32) -> anyhow::Result<()> {
    rt.block_on(async {
        let service = build_service(config).await?;
        let verses = service
            .song_verses(id, Pagination::new(page, size)?)
            .await?;

        if verses.is_empty() {
            println!("No verses on page {}.", page);
        }
        for (i, verse) in verses.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", verse);
        }
        Ok(())
    })
}
