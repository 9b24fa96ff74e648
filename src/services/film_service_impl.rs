//! Default [`FilmService`] implementation over a [`FilmStorage`] backend.

use std::sync::Arc;
use tracing::info;

use crate::domain::{FilmId, UserId};
use crate::models::{Film, Genre, Mpa, NewFilm};
use crate::services::film_service::{FilmError, FilmService, top_film_ids, validate_film};
use crate::services::user_service::UserService;
use crate::storage::FilmStorage;

pub struct DefaultFilmService {
    storage: Arc<dyn FilmStorage>,
    users: Arc<dyn UserService>,
}

impl DefaultFilmService {
    #[must_use]
    pub fn new(storage: Arc<dyn FilmStorage>, users: Arc<dyn UserService>) -> Self {
        Self { storage, users }
    }

    async fn ensure_exists(&self, id: FilmId) -> Result<(), FilmError> {
        self.storage
            .get_film(id.value())
            .await
            .map_err(storage_err)?
            .map(|_| ())
            .ok_or(FilmError::NotFound(id))
    }
}

fn storage_err(err: anyhow::Error) -> FilmError {
    FilmError::Storage(err.to_string())
}

#[async_trait::async_trait]
impl FilmService for DefaultFilmService {
    async fn get_all(&self) -> Result<Vec<Film>, FilmError> {
        self.storage.get_all().await.map_err(storage_err)
    }

    async fn get_film(&self, id: FilmId) -> Result<Film, FilmError> {
        self.storage
            .get_film(id.value())
            .await
            .map_err(storage_err)?
            .ok_or(FilmError::NotFound(id))
    }

    async fn create(&self, film: NewFilm) -> Result<Film, FilmError> {
        validate_film(&film)?;
        self.storage.create(film).await.map_err(storage_err)
    }

    async fn update(&self, id: FilmId, film: NewFilm) -> Result<Film, FilmError> {
        self.ensure_exists(id).await?;
        validate_film(&film)?;
        self.storage
            .update(id.value(), film)
            .await
            .map_err(storage_err)?
            .ok_or(FilmError::NotFound(id))
    }

    async fn delete(&self, id: FilmId) -> Result<(), FilmError> {
        self.ensure_exists(id).await?;
        self.storage.delete(id.value()).await.map_err(storage_err)
    }

    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), FilmError> {
        self.ensure_exists(film_id).await?;
        self.users.ensure_exists(user_id).await?;
        info!("User {} likes film {}", user_id, film_id);
        self.storage
            .add_like(film_id.value(), user_id.value())
            .await
            .map_err(storage_err)
    }

    async fn delete_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), FilmError> {
        self.ensure_exists(film_id).await?;
        self.users.ensure_exists(user_id).await?;
        info!("User {} unlikes film {}", user_id, film_id);
        self.storage
            .delete_like(film_id.value(), user_id.value())
            .await
            .map_err(storage_err)
    }

    async fn get_top_films(&self, count: i64) -> Result<Vec<Film>, FilmError> {
        let likes = self.storage.get_likes().await.map_err(storage_err)?;
        let take = usize::try_from(count).unwrap_or(0);

        let mut films = Vec::new();
        for film_id in top_film_ids(&likes, take) {
            let film = self
                .storage
                .get_film(film_id)
                .await
                .map_err(storage_err)?
                .ok_or(FilmError::NotFound(FilmId::new(film_id)))?;
            films.push(film);
        }
        Ok(films)
    }

    async fn get_all_genres(&self) -> Result<Vec<Genre>, FilmError> {
        self.storage.get_all_genres().await.map_err(storage_err)
    }

    async fn get_genre(&self, genre_id: i64) -> Result<Genre, FilmError> {
        self.storage
            .get_genre(genre_id)
            .await
            .map_err(storage_err)?
            .ok_or(FilmError::GenreNotFound(genre_id))
    }

    async fn get_all_mpa(&self) -> Result<Vec<Mpa>, FilmError> {
        self.storage.get_all_mpa().await.map_err(storage_err)
    }

    async fn get_mpa(&self, rating_id: i64) -> Result<Mpa, FilmError> {
        self.storage
            .get_mpa(rating_id)
            .await
            .map_err(storage_err)?
            .ok_or(FilmError::MpaNotFound(rating_id))
    }
}
