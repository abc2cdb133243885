//! The song library: storage seam plus the operations built on it.
//!
//! - [`store`] - [`SongStore`] trait and its SQLite implementation
//! - [`service`] - [`SongService`], used by both the HTTP API and the CLI

pub mod service;
pub mod store;

pub use service::SongService;
pub use store::{SongStore, SqliteSongStore};
