//! Song enrichment - fetches authoritative song details from an external service.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`songinfo/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models (including date parsing)
//! - **Clients** - HTTP clients for external APIs
//! - **Traits** - Seams for substituting mock clients in tests
//!
//! # Usage
//!
//! ```ignore
//! use song_library::enrichment::{SongInfoClient, SongInfoApi};
//!
//! let client = SongInfoClient::new(&config.enrichment)?;
//! let details = client.song_details("Muse", "Supermassive Black Hole").await?;
//! println!("Released {}", details.release_date);
//! ```

pub mod domain;
pub mod songinfo;
pub mod traits;

pub use domain::{EnrichmentError, SongDetails};
pub use songinfo::SongInfoClient;
pub use traits::SongInfoApi;
