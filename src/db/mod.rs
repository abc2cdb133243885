//! Database module for song persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - Song CRUD operations
//! - Filtered, paginated listing
//!
//! # Example
//!
//! ```ignore
//! use song_library::db::{init_pool, list_songs};
//!
//! let pool = init_pool(&config.database).await?;
//! let songs = list_songs(&pool, &SongFilter::default(), Pagination::default()).await?;
//! ```

use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::enrichment::SongDetails;
use crate::model::{NewSong, Pagination, Song, SongFilter, SongUpdate};
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{Sqlite, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "song_library.db";

/// Columns selected for a [`Song`], in `FromRow` order.
const SONG_COLUMNS: &str = "id, group_name, title, release_date, text, link";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize a database with default pool settings and run migrations.
#[cfg(test)]
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    init_pool(&DatabaseConfig {
        url: db_url.to_string(),
        ..Default::default()
    })
    .await
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool sized by `config.max_connections`, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    if !Sqlite::database_exists(&config.url).await.unwrap_or(false) {
        tracing::info!(url = %config.url, "Creating database");
        Sqlite::create_database(&config.url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Insert a new song built from caller identity and enrichment details.
///
/// A single `INSERT ... RETURNING`, so the row is either fully written or
/// not at all.
///
/// # Returns
///
/// The stored song with its assigned ID.
pub async fn insert_song(
    pool: &SqlitePool,
    song: &NewSong,
    details: &SongDetails,
) -> sqlx::Result<Song> {
    let sql = format!(
        r#"
        INSERT INTO songs (group_name, title, release_date, text, link)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {SONG_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Song>(&sql)
        .bind(&song.group)
        .bind(&song.title)
        .bind(details.release_date)
        .bind(&details.text)
        .bind(&details.link)
        .fetch_one(pool)
        .await
}

/// Get a song by its database ID.
///
/// # Returns
///
/// The song if found, or None.
pub async fn get_song_by_id(pool: &SqlitePool, song_id: i64) -> sqlx::Result<Option<Song>> {
    let sql = format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?");
    sqlx::query_as::<_, Song>(&sql)
        .bind(song_id)
        .fetch_optional(pool)
        .await
}

/// List songs matching a filter, one page at a time.
///
/// Filter fields are exact matches joined with AND. Results are ordered by
/// ID so pages are stable.
pub async fn list_songs(
    pool: &SqlitePool,
    filter: &SongFilter,
    page: Pagination,
) -> sqlx::Result<Vec<Song>> {
    let mut query = QueryBuilder::<Sqlite>::new(format!("SELECT {SONG_COLUMNS} FROM songs"));

    let mut separator = " WHERE ";
    if let Some(group) = &filter.group {
        query.push(separator).push("group_name = ").push_bind(group.clone());
        separator = " AND ";
    }
    if let Some(title) = &filter.title {
        query.push(separator).push("title = ").push_bind(title.clone());
    }

    query
        .push(" ORDER BY id ASC LIMIT ")
        .push_bind(i64::from(page.size()))
        .push(" OFFSET ")
        .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));

    query.build_query_as::<Song>().fetch_all(pool).await
}

/// Replace all mutable fields of a song.
///
/// # Returns
///
/// The updated song, or None if no song has this ID.
pub async fn update_song(
    pool: &SqlitePool,
    song_id: i64,
    update: &SongUpdate,
) -> sqlx::Result<Option<Song>> {
    let sql = format!(
        r#"
        UPDATE songs
        SET group_name = ?, title = ?, release_date = ?, text = ?, link = ?
        WHERE id = ?
        RETURNING {SONG_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Song>(&sql)
        .bind(&update.group)
        .bind(&update.title)
        .bind(update.release_date)
        .bind(&update.text)
        .bind(&update.link)
        .bind(song_id)
        .fetch_optional(pool)
        .await
}

/// Delete a song.
///
/// # Returns
///
/// Whether a row was removed.
pub async fn delete_song(pool: &SqlitePool, song_id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(song_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Count every stored song.
#[cfg(test)]
pub async fn count_songs(pool: &SqlitePool) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;
    Ok(row.0)
}
