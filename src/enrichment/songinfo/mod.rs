//! Song-info API integration
//!
//! Looks up release date, lyrics, and link for a (group, title) pair.
//! Endpoint: `GET {base_url}/info?group={group}&song={title}`

pub mod dto;
mod adapter;
mod client;

pub use client::SongInfoClient;
