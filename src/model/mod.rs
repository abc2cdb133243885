//! Core data models for the song library.
//!
//! Defines the [`Song`] entity plus the request shapes that create,
//! update, filter, and page through songs.
//!
//! # Database Schema
//!
//! [`Song`] maps to the `songs` table. The `group` field is stored in the
//! `group_name` column since `GROUP` is an SQL keyword.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::{Error, Result};

/// Default page size for song listings and verse pages.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A song in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Song {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Performing artist or band
    #[sqlx(rename = "group_name")]
    pub group: String,
    /// Song title
    pub title: String,
    /// Release date, from the enrichment lookup
    pub release_date: NaiveDate,
    /// Full lyrics; verses are separated by a blank line
    pub text: String,
    /// External reference (e.g. a video URL)
    pub link: String,
}

/// Caller-supplied identity of a song to create.
///
/// Only `group` and `title` come from the caller. Release date, lyrics, and
/// link are always taken from the enrichment lookup, so any such fields in
/// a request body are ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSong {
    pub group: String,
    pub title: String,
}

impl NewSong {
    pub fn new(group: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            title: title.into(),
        }
    }

    /// Check that both identity fields are present.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("group", &self.group)?;
        require_non_empty("title", &self.title)
    }
}

/// Full replacement of a song's mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongUpdate {
    pub group: String,
    pub title: String,
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl SongUpdate {
    /// Check the identity fields, as for [`NewSong`].
    ///
    /// `text` and `link` must be present in the payload but may be empty:
    /// enrichment can legitimately return empty lyrics, and an update must
    /// be able to store anything a creation can.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("group", &self.group)?;
        require_non_empty("title", &self.title)
    }
}

/// Exact-match filter for song listings.
///
/// Fields that are `None` are not filtered on; the rest are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub group: Option<String>,
    pub title: Option<String>,
}

impl SongFilter {
    /// Build a filter from optional query values. Empty strings mean "no filter".
    pub fn from_optional(group: Option<String>, title: Option<String>) -> Self {
        Self {
            group: group.filter(|g| !g.is_empty()),
            title: title.filter(|t| !t.is_empty()),
        }
    }

    /// Filter on group only.
    #[cfg(test)]
    pub fn by_group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            title: None,
        }
    }

    /// Whether a song satisfies every set field.
    #[cfg(test)]
    pub fn matches(&self, song: &Song) -> bool {
        self.group.as_ref().is_none_or(|g| *g == song.group)
            && self.title.as_ref().is_none_or(|t| *t == song.title)
    }
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    size: u32,
}

impl Pagination {
    /// Validate a page request. Both values must be at least 1.
    pub fn new(page: u32, size: u32) -> Result<Self> {
        if page == 0 {
            return Err(Error::validation("page must be at least 1"));
        }
        if size == 0 {
            return Err(Error::validation("size must be at least 1"));
        }
        Ok(Self { page, size })
    }

    /// Validate optional query values, falling back to page 1 and
    /// [`DEFAULT_PAGE_SIZE`].
    pub fn from_query(page: Option<u32>, size: Option<u32>) -> Result<Self> {
        Self::new(page.unwrap_or(1), size.unwrap_or(DEFAULT_PAGE_SIZE))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(())
}
