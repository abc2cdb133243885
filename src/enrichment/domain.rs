//! Internal domain models for song enrichment.
//!
//! These types are OUR types - they don't change when the external API changes.
//! All external API responses get converted into these types via adapters.

use chrono::NaiveDate;

/// Authoritative song details fetched at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongDetails {
    /// Release date
    pub release_date: NaiveDate,
    /// Full lyrics, verses separated by a blank line
    pub text: String,
    /// External reference (e.g. video URL)
    pub link: String,
}

/// Errors that can occur during enrichment
#[derive(Debug, Clone, thiserror::Error)]
pub enum EnrichmentError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Song not known to the info service")]
    NoMatches,

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid release date {0:?}, expected DD.MM.YYYY")]
    InvalidDate(String),
}
