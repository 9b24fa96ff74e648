use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::types::{FilmPayload, PopularQuery};
use super::{ApiError, ApiResponse, AppState};
use crate::domain::{FilmId, UserId};
use crate::models::Film;

/// Default page size for `/films/popular`, per the query's absence.
const DEFAULT_TOP_COUNT: i64 = 10;

pub async fn list_films(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Film>>>, ApiError> {
    let films = state.films().get_all().await?;
    Ok(Json(ApiResponse::success(films)))
}

pub async fn create_film(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FilmPayload>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let film = state.films().create(payload.into_new_film()).await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn update_film(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FilmPayload>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::ValidationError("'id' is required for update".to_string()))?;
    let film = state
        .films()
        .update(FilmId::new(id), payload.into_new_film())
        .await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Film>>, ApiError> {
    let film = state.films().get_film(FilmId::new(id)).await?;
    Ok(Json(ApiResponse::success(film)))
}

pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.films().delete(FilmId::new(id)).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn add_like(
    State(state): State<Arc<AppState>>,
    Path((film_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .films()
        .add_like(FilmId::new(film_id), UserId::new(user_id))
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn delete_like(
    State(state): State<Arc<AppState>>,
    Path((film_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .films()
        .delete_like(FilmId::new(film_id), UserId::new(user_id))
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn popular_films(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PopularQuery>,
) -> Result<Json<ApiResponse<Vec<Film>>>, ApiError> {
    let count = params.count.unwrap_or(DEFAULT_TOP_COUNT);
    let films = state.films().get_top_films(count).await?;
    Ok(Json(ApiResponse::success(films)))
}
