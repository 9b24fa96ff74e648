use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{NewFilm, NewUser};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Bare reference-data pointer as submitted in film payloads.
#[derive(Debug, Deserialize)]
pub struct IdRef {
    pub id: i64,
}

/// Film fields as accepted on create (POST) and update (PUT). The id is
/// only meaningful for updates.
#[derive(Debug, Deserialize)]
pub struct FilmPayload {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub mpa: IdRef,
    #[serde(default)]
    pub genres: Vec<IdRef>,
}

impl FilmPayload {
    pub fn into_new_film(self) -> NewFilm {
        NewFilm {
            name: self.name,
            description: self.description,
            release_date: self.release_date,
            duration: self.duration,
            mpa_id: self.mpa.id,
            genre_ids: self.genres.into_iter().map(|g| g.id).collect(),
        }
    }
}

/// User fields as accepted on create (POST) and update (PUT).
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub id: Option<i64>,
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl UserPayload {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            email: self.email,
            login: self.login,
            name: self.name,
            birthday: self.birthday,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    pub count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}
