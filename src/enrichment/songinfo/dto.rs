//! Song-info API Data Transfer Objects
//!
//! These types match EXACTLY what the song-info API returns.
//! DO NOT use these types outside the songinfo module - convert to domain types.
//!
//! Example response:
//! ```json
//! {
//!   "releaseDate": "16.07.2006",
//!   "text": "Ooh baby, don't you know I suffer?\n\nOoh baby, can you hear me moan?",
//!   "link": "https://www.youtube.com/watch?v=Xsp3_a-PMTw"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Response of `GET /info`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfoResponse {
    /// Release date as DD.MM.YYYY
    pub release_date: String,
    /// Lyrics
    pub text: String,
    /// External link
    pub link: String,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the API returns.
// ============================================================================
