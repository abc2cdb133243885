//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`SongInfoClient`], while tests can substitute
//! mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use song_library::enrichment::traits::SongInfoApi;
//!
//! async fn release_year(api: &dyn SongInfoApi) -> Result<i32, EnrichmentError> {
//!     let details = api.song_details("Muse", "Uprising").await?;
//!     Ok(details.release_date.year())
//! }
//! ```
//!
//! [`SongInfoClient`]: super::songinfo::SongInfoClient

use async_trait::async_trait;

use super::domain::{EnrichmentError, SongDetails};

/// Trait for song-info lookups.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait SongInfoApi: Send + Sync {
    /// Fetch release date, lyrics, and link for a song.
    async fn song_details(&self, group: &str, title: &str)
    -> Result<SongDetails, EnrichmentError>;
}

#[async_trait]
impl SongInfoApi for super::songinfo::SongInfoClient {
    async fn song_details(
        &self,
        group: &str,
        title: &str,
    ) -> Result<SongDetails, EnrichmentError> {
        self.lookup(group, title).await
    }
}

/// Mock song-info client for testing.
///
/// Returns configurable responses for testing different scenarios.
#[cfg(test)]
pub mod mocks {
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;

    /// Mock song-info client that returns predefined results.
    pub struct MockSongInfo {
        /// Details to return from lookup
        pub details: Option<SongDetails>,
        /// Error to return (takes precedence over details)
        pub error: Option<EnrichmentError>,
        /// Every (group, title) the mock was asked for
        pub calls: Mutex<Vec<(String, String)>>,
    }

    impl MockSongInfo {
        /// Create a mock that returns the given details.
        pub fn with_details(details: SongDetails) -> Self {
            Self {
                details: Some(details),
                error: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Create a mock that returns fixed details dated 16.07.2006.
        pub fn fixed() -> Self {
            Self::with_details(SongDetails {
                release_date: NaiveDate::from_ymd_opt(2006, 7, 16).unwrap(),
                text: "a\n\nb".to_string(),
                link: "http://x".to_string(),
            })
        }

        /// Create a mock that returns an error.
        pub fn with_error(error: EnrichmentError) -> Self {
            Self {
                details: None,
                error: Some(error),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SongInfoApi for MockSongInfo {
        async fn song_details(
            &self,
            group: &str,
            title: &str,
        ) -> Result<SongDetails, EnrichmentError> {
            self.calls
                .lock()
                .unwrap()
                .push((group.to_string(), title.to_string()));
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            self.details.clone().ok_or(EnrichmentError::NoMatches)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_returns_details() {
            let mock = MockSongInfo::fixed();
            let details = mock.song_details("X", "Y").await.unwrap();
            assert_eq!(details.link, "http://x");
            assert_eq!(mock.call_count(), 1);
            assert_eq!(
                mock.calls.lock().unwrap()[0],
                ("X".to_string(), "Y".to_string())
            );
        }

        #[tokio::test]
        async fn test_mock_error() {
            let mock = MockSongInfo::with_error(EnrichmentError::Network("timeout".to_string()));
            let result = mock.song_details("X", "Y").await;
            assert!(matches!(result, Err(EnrichmentError::Network(_))));
        }
    }
}
