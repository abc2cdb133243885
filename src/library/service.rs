//! Song service - orchestrates enrichment, persistence, and verse paging
//!
//! Creating a song:
//! 1. Look up release date, lyrics, and link from the song-info service
//! 2. Store caller identity + looked-up details as one row
//!
//! Either step failing fails the whole creation; nothing is retried.
//! Every other operation delegates to the store.

use std::sync::Arc;

use crate::enrichment::SongInfoApi;
use crate::error::{Error, Result};
use crate::lyrics;
use crate::model::{NewSong, Pagination, Song, SongFilter, SongUpdate};

use super::store::SongStore;

/// Song operations shared by the HTTP surface and the CLI
#[derive(Clone)]
pub struct SongService {
    info: Arc<dyn SongInfoApi>,
    store: Arc<dyn SongStore>,
}

impl SongService {
    pub fn new(info: Arc<dyn SongInfoApi>, store: Arc<dyn SongStore>) -> Self {
        Self { info, store }
    }

    /// Enrich and store a new song
    ///
    /// Exactly one lookup and one write. If the lookup fails nothing is
    /// written; if the write fails the lookup result is dropped.
    pub async fn create_song(&self, song: NewSong) -> Result<Song> {
        song.validate()?;

        let details = match self.info.song_details(&song.group, &song.title).await {
            Ok(details) => details,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    group = %song.group,
                    title = %song.title,
                    "Failed to get song info"
                );
                return Err(e.into());
            }
        };

        let created = self.store.create(&song, &details).await.inspect_err(|e| {
            tracing::error!(
                error = %e,
                group = %song.group,
                title = %song.title,
                "Failed to create song"
            );
        })?;

        tracing::info!(
            id = created.id,
            group = %created.group,
            title = %created.title,
            "Song created"
        );
        Ok(created)
    }

    /// One page of songs matching the filter
    pub async fn list_songs(&self, filter: &SongFilter, page: Pagination) -> Result<Vec<Song>> {
        let songs = self
            .store
            .list_paginated(filter, page)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    ?filter,
                    page = page.page(),
                    size = page.size(),
                    "Failed to list songs"
                );
            })?;

        tracing::info!(count = songs.len(), page = page.page(), size = page.size(), "Songs listed");
        Ok(songs)
    }

    /// Fetch one song by ID
    pub async fn get_song(&self, id: i64) -> Result<Song> {
        self.store
            .get_by_id(id)
            .await
            .inspect_err(|e| log_failure(e, id, "Failed to get song"))
    }

    /// One page of a song's verses
    pub async fn song_verses(&self, id: i64, page: Pagination) -> Result<Vec<String>> {
        let song = self
            .store
            .get_by_id(id)
            .await
            .inspect_err(|e| log_failure(e, id, "Failed to get song for verses"))?;

        let verses: Vec<String> =
            lyrics::verses(&song.text, page.page() as usize, page.size() as usize)
                .into_iter()
                .map(str::to_string)
                .collect();

        tracing::info!(
            id,
            page = page.page(),
            size = page.size(),
            verses = verses.len(),
            total = lyrics::verse_count(&song.text),
            "Song verses retrieved"
        );
        Ok(verses)
    }

    /// Replace all mutable fields of a song. Does not re-run enrichment.
    pub async fn update_song(&self, id: i64, update: SongUpdate) -> Result<Song> {
        update.validate()?;

        let updated = self
            .store
            .update(id, &update)
            .await
            .inspect_err(|e| log_failure(e, id, "Failed to update song"))?;

        tracing::info!(id, "Song updated");
        Ok(updated)
    }

    /// Delete a song by ID
    pub async fn delete_song(&self, id: i64) -> Result<()> {
        self.store
            .delete(id)
            .await
            .inspect_err(|e| log_failure(e, id, "Failed to delete song"))?;

        tracing::info!(id, "Song deleted");
        Ok(())
    }
}

/// Missing songs are the caller's problem, so they only warrant a warning.
fn log_failure(err: &Error, id: i64, message: &str) {
    if err.is_not_found() {
        tracing::warn!(id, "{}: not found", message);
    } else {
        tracing::error!(error = %err, id, "{}", message);
    }
}
