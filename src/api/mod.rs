//! HTTP API for the song library.
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | /songs?page&size&group&title | 200, array of songs |
//! | POST | /songs | 201, created song |
//! | GET | /songs/{id} | 200, song |
//! | PUT | /songs/{id} | 200, updated song |
//! | DELETE | /songs/{id} | 204 |
//! | GET | /songs/{id}/text?page&size | 200, array of verses |
//! | GET | /health | 200 |
//!
//! Failures use the status mapping in [`error::ApiError`].

pub mod error;
mod handlers;

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use tokio::net::TcpListener;

use crate::library::SongService;

/// Build the router with all routes and request logging.
pub fn router(service: SongService) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/songs",
            get(handlers::list_songs).post(handlers::create_song),
        )
        .route(
            "/songs/:id",
            get(handlers::get_song)
                .put(handlers::update_song)
                .delete(handlers::delete_song),
        )
        .route("/songs/:id/text", get(handlers::song_text))
        .layer(middleware::from_fn(log_request))
        .with_state(service)
}

/// Serve the API until ctrl-c.
pub async fn serve(listener: TcpListener, service: SongService) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request"
    );
    response
}
