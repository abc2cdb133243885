//! Route handlers for `/songs`.
//!
//! Handlers only translate between HTTP and [`SongService`]; request
//! cancellation (client disconnect) drops the handler future, which drops
//! any in-flight lookup or query with it.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::library::SongService;
use crate::model::{NewSong, Pagination, Song, SongFilter, SongUpdate};

/// Query string of `GET /songs`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub group: Option<String>,
    pub title: Option<String>,
}

/// Query string of `GET /songs/{id}/text`
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_songs(
    State(service): State<SongService>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Song>>, ApiError> {
    let Query(query) = query?;
    let page = Pagination::from_query(query.page, query.size)?;
    let filter = SongFilter::from_optional(query.group, query.title);

    let songs = service.list_songs(&filter, page).await?;
    Ok(Json(songs))
}

pub async fn create_song(
    State(service): State<SongService>,
    payload: Result<Json<NewSong>, JsonRejection>,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let Json(song) = payload?;
    let created = service.create_song(song).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_song(
    State(service): State<SongService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Song>, ApiError> {
    let Path(id) = id?;
    Ok(Json(service.get_song(id).await?))
}

pub async fn update_song(
    State(service): State<SongService>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SongUpdate>, JsonRejection>,
) -> Result<Json<Song>, ApiError> {
    let Path(id) = id?;
    let Json(update) = payload?;
    Ok(Json(service.update_song(id, update).await?))
}

pub async fn delete_song(
    State(service): State<SongService>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    service.delete_song(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn song_text(
    State(service): State<SongService>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<String>>, ApiError> {
    let Path(id) = id?;
    let Query(query) = query?;
    let page = Pagination::from_query(query.page, query.size)?;
    Ok(Json(service.song_verses(id, page).await?))
}
