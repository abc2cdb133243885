//! Song store abstraction.
//!
//! [`SongStore`] is the seam between song operations and persistence.
//! [`SqliteSongStore`] forwards to the query functions in [`crate::db`] and
//! turns "no such row" into [`Error::NotFound`]; tests can substitute the
//! in-memory store from [`mocks`].

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::db;
use crate::enrichment::SongDetails;
use crate::error::{Error, Result, ResultExt};
use crate::model::{NewSong, Pagination, Song, SongFilter, SongUpdate};

/// Persistence for songs.
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Store a new song and return it with its assigned ID.
    async fn create(&self, song: &NewSong, details: &SongDetails) -> Result<Song>;

    /// Fetch one song. Unknown IDs are [`Error::NotFound`].
    async fn get_by_id(&self, id: i64) -> Result<Song>;

    /// One page of songs matching the filter, ordered by ID.
    async fn list_paginated(&self, filter: &SongFilter, page: Pagination) -> Result<Vec<Song>>;

    /// Replace all mutable fields. Unknown IDs are [`Error::NotFound`].
    async fn update(&self, id: i64, update: &SongUpdate) -> Result<Song>;

    /// Remove a song. Unknown IDs are [`Error::NotFound`].
    async fn delete(&self, id: i64) -> Result<()>;
}

/// SQLite-backed song store.
#[derive(Debug, Clone)]
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn create(&self, song: &NewSong, details: &SongDetails) -> Result<Song> {
        db::insert_song(&self.pool, song, details)
            .await
            .with_context(format!("storing {} - {}", song.group, song.title))
    }

    async fn get_by_id(&self, id: i64) -> Result<Song> {
        db::get_song_by_id(&self.pool, id)
            .await?
            .ok_or(Error::NotFound(id))
    }

    async fn list_paginated(&self, filter: &SongFilter, page: Pagination) -> Result<Vec<Song>> {
        db::list_songs(&self.pool, filter, page)
            .await
            .with_context("listing songs")
    }

    async fn update(&self, id: i64, update: &SongUpdate) -> Result<Song> {
        db::update_song(&self.pool, id, update)
            .await?
            .ok_or(Error::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        if db::delete_song(&self.pool, id).await? {
            Ok(())
        } else {
            Err(Error::NotFound(id))
        }
    }
}

/// In-memory store for testing.
#[cfg(test)]
pub mod mocks {
    use std::sync::Mutex;

    use super::*;

    /// Vec-backed store. With `fail_writes` set, create/update/delete
    /// return a database error without touching the contents.
    #[derive(Default)]
    pub struct MemoryStore {
        pub songs: Mutex<Vec<Song>>,
        pub fail_writes: bool,
    }

    impl MemoryStore {
        pub fn failing_writes() -> Self {
            Self {
                fail_writes: true,
                ..Default::default()
            }
        }

        pub fn song_count(&self) -> usize {
            self.songs.lock().unwrap().len()
        }

        fn check_writable(&self) -> Result<()> {
            if self.fail_writes {
                return Err(Error::Database(sqlx::Error::PoolClosed));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SongStore for MemoryStore {
        async fn create(&self, song: &NewSong, details: &SongDetails) -> Result<Song> {
            self.check_writable()?;
            let mut songs = self.songs.lock().unwrap();
            let id = songs.iter().map(|s| s.id).max().unwrap_or(0) + 1;
            let stored = Song {
                id,
                group: song.group.clone(),
                title: song.title.clone(),
                release_date: details.release_date,
                text: details.text.clone(),
                link: details.link.clone(),
            };
            songs.push(stored.clone());
            Ok(stored)
        }

        async fn get_by_id(&self, id: i64) -> Result<Song> {
            self.songs
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned()
                .ok_or(Error::NotFound(id))
        }

        async fn list_paginated(
            &self,
            filter: &SongFilter,
            page: Pagination,
        ) -> Result<Vec<Song>> {
            let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            Ok(self
                .songs
                .lock()
                .unwrap()
                .iter()
                .filter(|s| filter.matches(s))
                .skip(offset)
                .take(page.size() as usize)
                .cloned()
                .collect())
        }

        async fn update(&self, id: i64, update: &SongUpdate) -> Result<Song> {
            self.check_writable()?;
            let mut songs = self.songs.lock().unwrap();
            let song = songs
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(Error::NotFound(id))?;
            song.group = update.group.clone();
            song.title = update.title.clone();
            song.release_date = update.release_date;
            song.text = update.text.clone();
            song.link = update.link.clone();
            Ok(song.clone())
        }

        async fn delete(&self, id: i64) -> Result<()> {
            self.check_writable()?;
            let mut songs = self.songs.lock().unwrap();
            let before = songs.len();
            songs.retain(|s| s.id != id);
            if songs.len() == before {
                return Err(Error::NotFound(id));
            }
            Ok(())
        }
    }
}
