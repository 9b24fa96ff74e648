//! Read-only genre and MPA rating lookups.

use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::models::{Genre, Mpa};

pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Genre>>>, ApiError> {
    let genres = state.films().get_all_genres().await?;
    Ok(Json(ApiResponse::success(genres)))
}

pub async fn get_genre(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Genre>>, ApiError> {
    let genre = state.films().get_genre(id).await?;
    Ok(Json(ApiResponse::success(genre)))
}

pub async fn list_mpa(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Mpa>>>, ApiError> {
    let ratings = state.films().get_all_mpa().await?;
    Ok(Json(ApiResponse::success(ratings)))
}

pub async fn get_mpa(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Mpa>>, ApiError> {
    let rating = state.films().get_mpa(id).await?;
    Ok(Json(ApiResponse::success(rating)))
}
