//! Adapter layer: Convert song-info DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.

use chrono::NaiveDate;

use super::dto;
use crate::enrichment::domain::{EnrichmentError, SongDetails};

/// Convert an info response into song details.
pub fn to_details(response: dto::SongInfoResponse) -> Result<SongDetails, EnrichmentError> {
    Ok(SongDetails {
        release_date: parse_release_date(&response.release_date)?,
        text: response.text,
        link: response.link,
    })
}

/// Parse a `DD.MM.YYYY` date. Day and month must carry leading zeros.
pub fn parse_release_date(raw: &str) -> Result<NaiveDate, EnrichmentError> {
    let invalid = || EnrichmentError::InvalidDate(raw.to_string());

    // chrono accepts single-digit fields, so check the shape first
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[2] == b'.'
        && bytes[5] == b'.'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, "%d.%m.%Y").map_err(|_| invalid())
}
