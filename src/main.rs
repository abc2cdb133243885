//! Song Library - a web service for a catalogue of songs.
//!
//! New songs are enriched from an external song-info service before they
//! are stored; lyrics can be read back one page of verses at a time. With
//! no subcommand the HTTP service starts; see [`cli`] for the rest.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod library;
pub mod lyrics;
pub mod model;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // RUST_LOG wins; otherwise song_library=<level>
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("song_library={}", args.log_level)))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();

    cli::run_command(&args)
}
