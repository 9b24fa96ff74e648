use axum::{Json, extract::State};
use std::sync::Arc;

use super::types::HealthStatus;
use super::{ApiError, ApiResponse, AppState};

pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthStatus>>, ApiError> {
    if let Some(store) = state.store() {
        store
            .ping()
            .await
            .map_err(|e| ApiError::DatabaseError(e.to_string()))?;
    }

    Ok(Json(ApiResponse::success(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })))
}
