use anyhow::Result;
use async_trait::async_trait;

use crate::db::Store;
use crate::models::{Film, Friendship, Genre, Mpa, NewFilm, NewUser, User};
use crate::storage::{FilmStorage, UserStorage};

/// Relational backend: both capability traits over one [`Store`].
pub struct DatabaseStorage {
    store: Store,
}

impl DatabaseStorage {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FilmStorage for DatabaseStorage {
    async fn get_all(&self) -> Result<Vec<Film>> {
        self.store.get_all_films().await
    }

    async fn create(&self, film: NewFilm) -> Result<Film> {
        self.store.create_film(&film).await
    }

    async fn update(&self, film_id: i64, film: NewFilm) -> Result<Option<Film>> {
        self.store.update_film(film_id, &film).await
    }

    async fn delete(&self, film_id: i64) -> Result<()> {
        self.store.delete_film(film_id).await
    }

    async fn get_film(&self, film_id: i64) -> Result<Option<Film>> {
        self.store.get_film(film_id).await
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        self.store.add_like(film_id, user_id).await
    }

    async fn delete_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        self.store.delete_like(film_id, user_id).await
    }

    async fn get_likes(&self) -> Result<Vec<(i64, Vec<i64>)>> {
        self.store.get_likes().await
    }

    async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        self.store.get_all_genres().await
    }

    async fn get_genre(&self, genre_id: i64) -> Result<Option<Genre>> {
        self.store.get_genre(genre_id).await
    }

    async fn get_all_mpa(&self) -> Result<Vec<Mpa>> {
        self.store.get_all_mpa().await
    }

    async fn get_mpa(&self, rating_id: i64) -> Result<Option<Mpa>> {
        self.store.get_mpa(rating_id).await
    }
}

#[async_trait]
impl UserStorage for DatabaseStorage {
    async fn get_all(&self) -> Result<Vec<User>> {
        self.store.get_all_users().await
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        self.store.create_user(&user).await
    }

    async fn update(&self, user_id: i64, user: NewUser) -> Result<Option<User>> {
        self.store.update_user(user_id, &user).await
    }

    async fn delete(&self, user_id: i64) -> Result<()> {
        self.store.delete_user(user_id).await
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.store.get_user(user_id).await
    }

    async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        self.store.add_friend(user_id, friend_id).await
    }

    async fn delete_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        self.store.delete_friend(user_id, friend_id).await
    }

    async fn get_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<Option<Friendship>> {
        self.store.get_friendship(user_id, friend_id).await
    }

    async fn get_user_friends(&self, user_id: i64) -> Result<Vec<User>> {
        self.store.get_user_friends(user_id).await
    }
}
