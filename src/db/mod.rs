use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

use crate::models::{Film, Friendship, Genre, Mpa, NewFilm, NewUser, User};

/// Connection handle for the relational backend. Running `new` connects,
/// applies pending migrations, and seeds reference data.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");
        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Every pooled connection to an in-memory sqlite gets its own
        // database, so the pool must stay at a single connection there.
        let max_connections = if in_memory { 1 } else { max_connections };
        let min_connections = min_connections.min(max_connections);

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn film_repo(&self) -> repositories::film::FilmRepository {
        repositories::film::FilmRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn get_all_films(&self) -> Result<Vec<Film>> {
        self.film_repo().get_all().await
    }

    pub async fn get_film(&self, film_id: i64) -> Result<Option<Film>> {
        self.film_repo().get(film_id).await
    }

    pub async fn create_film(&self, film: &NewFilm) -> Result<Film> {
        self.film_repo().create(film).await
    }

    pub async fn update_film(&self, film_id: i64, film: &NewFilm) -> Result<Option<Film>> {
        self.film_repo().update(film_id, film).await
    }

    pub async fn delete_film(&self, film_id: i64) -> Result<()> {
        self.film_repo().delete(film_id).await
    }

    pub async fn add_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        self.film_repo().add_like(film_id, user_id).await
    }

    pub async fn delete_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        self.film_repo().delete_like(film_id, user_id).await
    }

    pub async fn get_likes(&self) -> Result<Vec<(i64, Vec<i64>)>> {
        self.film_repo().get_likes().await
    }

    pub async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        self.film_repo().get_all_genres().await
    }

    pub async fn get_genre(&self, genre_id: i64) -> Result<Option<Genre>> {
        self.film_repo().get_genre(genre_id).await
    }

    pub async fn get_all_mpa(&self) -> Result<Vec<Mpa>> {
        self.film_repo().get_all_mpa().await
    }

    pub async fn get_mpa(&self, rating_id: i64) -> Result<Option<Mpa>> {
        self.film_repo().get_mpa(rating_id).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        self.user_repo().get_all().await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.user_repo().get(user_id).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.user_repo().create(user).await
    }

    pub async fn update_user(&self, user_id: i64, user: &NewUser) -> Result<Option<User>> {
        self.user_repo().update(user_id, user).await
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<()> {
        self.user_repo().delete(user_id).await
    }

    pub async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        self.user_repo().add_friend(user_id, friend_id).await
    }

    pub async fn delete_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        self.user_repo().delete_friend(user_id, friend_id).await
    }

    pub async fn get_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<Option<Friendship>> {
        self.user_repo().get_friendship(user_id, friend_id).await
    }

    pub async fn get_user_friends(&self, user_id: i64) -> Result<Vec<User>> {
        self.user_repo().get_user_friends(user_id).await
    }
}
