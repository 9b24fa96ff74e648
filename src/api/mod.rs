use axum::{
    Router,
    routing::{get, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::Store;
use crate::services::{FilmService, UserService};
use crate::state::SharedState;

mod error;
mod films;
mod reference;
mod system;
mod types;
mod users;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn films(&self) -> &Arc<dyn FilmService> {
        &self.shared.film_service
    }

    #[must_use]
    pub fn users(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn store(&self) -> Option<&Store> {
        self.shared.store.as_ref()
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
    })
}

#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/films",
            get(films::list_films)
                .post(films::create_film)
                .put(films::update_film),
        )
        .route("/films/popular", get(films::popular_films))
        .route("/films/{id}", get(films::get_film).delete(films::delete_film))
        .route(
            "/films/{id}/like/{user_id}",
            put(films::add_like).delete(films::delete_like),
        )
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route("/users/{id}", get(users::get_user).delete(users::delete_user))
        .route("/users/{id}/friends", get(users::list_friends))
        .route(
            "/users/{id}/friends/common/{other_id}",
            get(users::common_friends),
        )
        .route(
            "/users/{id}/friends/{friend_id}",
            put(users::add_friend).delete(users::delete_friend),
        )
        .route("/genres", get(reference::list_genres))
        .route("/genres/{id}", get(reference::get_genre))
        .route("/mpa", get(reference::list_mpa))
        .route("/mpa/{id}", get(reference::get_mpa))
        .route("/health", get(system::health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
