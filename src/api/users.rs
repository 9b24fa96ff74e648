use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::types::UserPayload;
use super::{ApiError, ApiResponse, AppState};
use crate::domain::UserId;
use crate::models::User;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.users().get_all().await?;
    Ok(Json(ApiResponse::success(users)))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.users().create(payload.into_new_user()).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::ValidationError("'id' is required for update".to_string()))?;
    let user = state
        .users()
        .update(UserId::new(id), payload.into_new_user())
        .await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.users().get_user(UserId::new(id)).await?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.users().delete(UserId::new(id)).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn list_friends(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let friends = state.users().get_user_friends(UserId::new(id)).await?;
    Ok(Json(ApiResponse::success(friends)))
}

pub async fn add_friend(
    State(state): State<Arc<AppState>>,
    Path((user_id, friend_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .users()
        .add_friend(UserId::new(user_id), UserId::new(friend_id))
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn delete_friend(
    State(state): State<Arc<AppState>>,
    Path((user_id, friend_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .users()
        .delete_friend(UserId::new(user_id), UserId::new(friend_id))
        .await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn common_friends(
    State(state): State<Arc<AppState>>,
    Path((user_id, other_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let friends = state
        .users()
        .get_common_friends(UserId::new(user_id), UserId::new(other_id))
        .await?;
    Ok(Json(ApiResponse::success(friends)))
}
