use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::FilmId;

/// MPA content-classification rating (reference data).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mpa {
    pub id: i64,
    pub name: String,
}

/// Film genre tag (reference data, many-to-many with films).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A stored film record. Genres are unique by id and keep a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: FilmId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub mpa: Mpa,
    pub genres: Vec<Genre>,
}

/// Film fields as submitted by a caller, before an id is assigned.
///
/// Mpa and genres arrive as bare reference ids; the stored record carries
/// the resolved names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFilm {
    pub name: String,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: i32,
    pub mpa_id: i64,
    pub genre_ids: Vec<i64>,
}
