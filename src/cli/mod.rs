//! Command-line interface for song-library.
//!
//! `serve` runs the HTTP service; the other commands work on the same
//! database and song-info service from the terminal.

mod commands;

pub use commands::{Cli, Commands, run_command};
