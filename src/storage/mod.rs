//! Storage capability traits.
//!
//! Services talk to storage exclusively through these traits; the concrete
//! backend (relational or in-memory) is picked once at composition time.
//! Lookups report absence as `None`; existence checking is a service
//! concern and storage never errors on a missing id.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Film, Friendship, Genre, Mpa, NewFilm, NewUser, User};

pub mod database;
pub mod memory;

pub use database::DatabaseStorage;
pub use memory::InMemoryStore;

#[async_trait]
pub trait FilmStorage: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Film>>;

    /// Assigns a fresh id and persists the record.
    async fn create(&self, film: NewFilm) -> Result<Film>;

    /// Full replacement of mutable fields, including the genre link set.
    /// Returns `None` when the id does not exist.
    async fn update(&self, film_id: i64, film: NewFilm) -> Result<Option<Film>>;

    /// Removes the film, its genre links, and every like on it.
    async fn delete(&self, film_id: i64) -> Result<()>;

    async fn get_film(&self, film_id: i64) -> Result<Option<Film>>;

    /// Idempotent: re-liking an already liked film is a no-op.
    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<()>;

    /// Idempotent: removing an absent like is a no-op.
    async fn delete_like(&self, film_id: i64, user_id: i64) -> Result<()>;

    /// Liker ids per film for every stored film, zero-like films included.
    /// Outer order follows film ids, inner order follows like insertion.
    async fn get_likes(&self) -> Result<Vec<(i64, Vec<i64>)>>;

    async fn get_all_genres(&self) -> Result<Vec<Genre>>;

    async fn get_genre(&self, genre_id: i64) -> Result<Option<Genre>>;

    async fn get_all_mpa(&self) -> Result<Vec<Mpa>>;

    async fn get_mpa(&self, rating_id: i64) -> Result<Option<Mpa>>;
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>>;

    /// Assigns a fresh id, applies name defaulting, persists.
    async fn create(&self, user: NewUser) -> Result<User>;

    /// Returns `None` when the id does not exist.
    async fn update(&self, user_id: i64, user: NewUser) -> Result<Option<User>>;

    /// Removes the user, their likes, and every directed friendship record
    /// where they appear on either side.
    async fn delete(&self, user_id: i64) -> Result<()>;

    async fn get_user(&self, user_id: i64) -> Result<Option<User>>;

    /// No-op when the directed record already exists; otherwise inserts it
    /// and flips both directions to approved when the reciprocal exists.
    async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<()>;

    /// No-op when the directed record is absent; otherwise removes it and
    /// downgrades a surviving reciprocal record to unapproved.
    async fn delete_friend(&self, user_id: i64, friend_id: i64) -> Result<()>;

    async fn get_friendship(&self, user_id: i64, friend_id: i64)
    -> Result<Option<Friendship>>;

    /// Friends by outgoing directed records, regardless of approval status.
    async fn get_user_friends(&self, user_id: i64) -> Result<Vec<User>>;
}
