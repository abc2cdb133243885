//! Test utilities and fixtures for song-library tests.
//!
//! This module provides common test helpers, fixtures, and a throwaway
//! HTTP stub for the song-info service.
//!
//! # Example
//!
//! ```ignore
//! use song_library::test_utils::{temp_db, mock_details};
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let (pool, _dir) = temp_db().await;
//!     let details = mock_details();
//!     // ... test logic
//! }
//! ```

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::get;
use chrono::NaiveDate;
use sqlx::sqlite::SqlitePool;
use tempfile::TempDir;

use crate::enrichment::SongDetails;
use crate::model::SongUpdate;

/// Creates a temporary database for testing.
///
/// The database is created in a temporary directory that is automatically
/// cleaned up when the returned `TempDir` is dropped. Migrations are run
/// automatically.
///
/// # Returns
///
/// A tuple of (connection pool, temp directory handle).
/// Keep the TempDir alive for the duration of your test.
pub async fn temp_db() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    let pool = crate::db::init_db(&db_url)
        .await
        .expect("Failed to initialize test database");

    (pool, dir)
}

/// Enrichment details matching the canonical stub response.
pub fn mock_details() -> SongDetails {
    SongDetails {
        release_date: NaiveDate::from_ymd_opt(2006, 7, 16).unwrap(),
        text: "a\n\nb".to_string(),
        link: "http://x".to_string(),
    }
}

/// A full replacement payload with sensible defaults.
///
/// Customize with struct update syntax:
///
/// ```ignore
/// let update = SongUpdate { text: "v1\n\nv2".to_string(), ..mock_update() };
/// ```
pub fn mock_update() -> SongUpdate {
    SongUpdate {
        group: "Updated Group".to_string(),
        title: "Updated Title".to_string(),
        release_date: NaiveDate::from_ymd_opt(2010, 3, 4).unwrap(),
        text: "new verse\n\nnew chorus".to_string(),
        link: "http://updated".to_string(),
    }
}

/// Serve a router on an ephemeral localhost port.
///
/// Returns the base URL (`http://127.0.0.1:<port>`). The server task
/// lives until the test runtime shuts down.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// Serve a song-info stub whose `/info` always answers with `status` and `body`.
pub async fn spawn_song_info_stub(status: StatusCode, body: &'static str) -> String {
    let router = Router::new().route(
        "/info",
        get(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    );
    spawn_stub(router).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_temp_db_creates_working_database() {
        let (pool, _dir) = temp_db().await;
        assert_eq!(crate::db::count_songs(&pool).await.unwrap(), 0);
    }

    #[test]
    fn test_mock_update_is_valid() {
        assert!(mock_update().validate().is_ok());
    }

    #[tokio::test]
    async fn test_song_info_stub_answers() {
        let base = spawn_song_info_stub(StatusCode::IM_A_TEAPOT, "{}").await;
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        let response = client.get(format!("{base}/info")).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 418);
    }
}
