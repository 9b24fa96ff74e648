//! Domain service for film, like, and reference-data operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{FilmId, UserId};
use crate::models::{Film, Genre, Mpa, NewFilm};

/// The earliest admissible release date: the first public film screening.
pub const CINEMA_BIRTHDAY: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
    Some(date) => date,
    None => panic!("invalid cinema birthday"),
};

const MAX_DESCRIPTION_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum FilmError {
    #[error("Film not found: {0}")]
    NotFound(FilmId),

    #[error("Genre not found: {0}")]
    GenreNotFound(i64),

    #[error("MPA rating not found: {0}")]
    MpaNotFound(i64),

    #[error("{0}")]
    InvalidInput(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<crate::services::user_service::UserError> for FilmError {
    fn from(err: crate::services::user_service::UserError) -> Self {
        use crate::services::user_service::UserError;
        match err {
            UserError::NotFound(id) => Self::UserNotFound(id),
            UserError::InvalidInput(msg) => Self::InvalidInput(msg),
            UserError::Storage(msg) => Self::Storage(msg),
        }
    }
}

/// Film operations: CRUD with validation, likes, popularity ranking, and
/// read-only genre/MPA lookups.
#[async_trait::async_trait]
pub trait FilmService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Film>, FilmError>;

    /// # Errors
    ///
    /// Returns [`FilmError::NotFound`] when the id is unknown.
    async fn get_film(&self, id: FilmId) -> Result<Film, FilmError>;

    /// # Errors
    ///
    /// Returns [`FilmError::InvalidInput`] when validation fails.
    async fn create(&self, film: NewFilm) -> Result<Film, FilmError>;

    /// # Errors
    ///
    /// Returns [`FilmError::NotFound`] when the id is unknown and
    /// [`FilmError::InvalidInput`] when validation fails. A failed update
    /// leaves the stored record untouched.
    async fn update(&self, id: FilmId, film: NewFilm) -> Result<Film, FilmError>;

    /// Removes the film and cascades to its likes and genre links.
    async fn delete(&self, id: FilmId) -> Result<(), FilmError>;

    /// Both the film and the user must exist. Re-liking is a no-op.
    async fn add_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), FilmError>;

    /// Both the film and the user must exist. Removing an absent like is a
    /// no-op.
    async fn delete_like(&self, film_id: FilmId, user_id: UserId) -> Result<(), FilmError>;

    /// The `count` most-liked films, most likes first. Non-positive `count`
    /// yields nothing; a `count` past the film total yields every film.
    async fn get_top_films(&self, count: i64) -> Result<Vec<Film>, FilmError>;

    async fn get_all_genres(&self) -> Result<Vec<Genre>, FilmError>;

    /// # Errors
    ///
    /// Returns [`FilmError::GenreNotFound`] when the id is unknown.
    async fn get_genre(&self, genre_id: i64) -> Result<Genre, FilmError>;

    async fn get_all_mpa(&self) -> Result<Vec<Mpa>, FilmError>;

    /// # Errors
    ///
    /// Returns [`FilmError::MpaNotFound`] when the id is unknown.
    async fn get_mpa(&self, rating_id: i64) -> Result<Mpa, FilmError>;
}

/// Field validation for a submitted film. Pure and deterministic.
pub fn validate_film(film: &NewFilm) -> Result<(), FilmError> {
    if film.name.trim().is_empty() {
        return Err(FilmError::InvalidInput("'name' is empty!".to_string()));
    }
    if let Some(description) = &film.description {
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(FilmError::InvalidInput(format!(
                "'description' is longer than {MAX_DESCRIPTION_CHARS} characters!"
            )));
        }
    }
    if let Some(release_date) = film.release_date {
        if release_date < CINEMA_BIRTHDAY {
            return Err(FilmError::InvalidInput(format!(
                "'release_date' is before than {CINEMA_BIRTHDAY}!"
            )));
        }
    }
    if film.duration <= 0 {
        return Err(FilmError::InvalidInput(
            "'duration' must be positive!".to_string(),
        ));
    }
    Ok(())
}

/// Film ids ranked by like count descending, truncated to `count`.
///
/// The sort is stable, so films with equal counts keep the like-map order
/// the storage layer produced.
#[must_use]
pub fn top_film_ids(likes: &[(i64, Vec<i64>)], count: usize) -> Vec<i64> {
    let mut ranked: Vec<&(i64, Vec<i64>)> = likes.iter().collect();
    ranked.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    ranked
        .into_iter()
        .take(count)
        .map(|(film_id, _)| *film_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_film() -> NewFilm {
        NewFilm {
            name: "test".to_string(),
            description: Some("test".to_string()),
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1),
            duration: 1,
            mpa_id: 1,
            genre_ids: vec![],
        }
    }

    #[test]
    fn valid_film_passes() {
        assert!(validate_film(&valid_film()).is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let film = NewFilm {
            name: "  ".to_string(),
            ..valid_film()
        };
        assert!(matches!(
            validate_film(&film),
            Err(FilmError::InvalidInput(_))
        ));
    }

    #[test]
    fn description_boundary_at_200_chars() {
        let exactly = NewFilm {
            description: Some("a".repeat(200)),
            ..valid_film()
        };
        assert!(validate_film(&exactly).is_ok());

        let too_long = NewFilm {
            description: Some("a".repeat(201)),
            ..valid_film()
        };
        assert!(validate_film(&too_long).is_err());
    }

    #[test]
    fn release_date_boundary_at_cinema_birthday() {
        let on_the_day = NewFilm {
            release_date: NaiveDate::from_ymd_opt(1895, 12, 28),
            ..valid_film()
        };
        assert!(validate_film(&on_the_day).is_ok());

        let before = NewFilm {
            release_date: NaiveDate::from_ymd_opt(1895, 12, 27),
            ..valid_film()
        };
        assert!(validate_film(&before).is_err());
    }

    #[test]
    fn missing_release_date_is_fine() {
        let film = NewFilm {
            release_date: None,
            ..valid_film()
        };
        assert!(validate_film(&film).is_ok());
    }

    #[test]
    fn non_positive_duration_rejected() {
        for duration in [0, -1] {
            let film = NewFilm {
                duration,
                ..valid_film()
            };
            assert!(validate_film(&film).is_err());
        }
    }

    #[test]
    fn ranking_orders_by_like_count_desc() {
        let likes = vec![
            (1, vec![10]),
            (2, vec![10, 11, 12, 13, 14]),
            (3, vec![10, 11, 12]),
        ];
        assert_eq!(top_film_ids(&likes, 2), vec![2, 3]);
        assert_eq!(top_film_ids(&likes, 10), vec![2, 3, 1]);
    }

    #[test]
    fn ranking_with_zero_count_is_empty() {
        let likes = vec![(1, vec![10])];
        assert!(top_film_ids(&likes, 0).is_empty());
    }

    #[test]
    fn ranking_ties_keep_map_order() {
        let likes = vec![(5, vec![1]), (2, vec![2]), (9, vec![3])];
        assert_eq!(top_film_ids(&likes, 3), vec![5, 2, 9]);
    }
}
