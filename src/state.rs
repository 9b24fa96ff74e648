use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::db::Store;
use crate::services::{
    DefaultFilmService, DefaultUserService, FilmService, UserService,
};
use crate::storage::{DatabaseStorage, FilmStorage, InMemoryStore, UserStorage};

/// Everything the request handlers share: the chosen storage backend and
/// the services wired over it.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    /// Present only with the database backend; used by the health check.
    pub store: Option<Store>,

    pub film_storage: Arc<dyn FilmStorage>,

    pub user_storage: Arc<dyn UserStorage>,

    pub film_service: Arc<dyn FilmService>,

    pub user_service: Arc<dyn UserService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Option<Store>;
        let film_storage: Arc<dyn FilmStorage>;
        let user_storage: Arc<dyn UserStorage>;
        match config.general.storage_backend {
            StorageBackend::Database => {
                let db = Store::with_pool_options(
                    &config.database.url,
                    config.database.max_connections,
                    config.database.min_connections,
                )
                .await?;
                let storage = Arc::new(DatabaseStorage::new(db.clone()));
                store = Some(db);
                film_storage = storage.clone();
                user_storage = storage;
            }
            StorageBackend::Memory => {
                let storage = Arc::new(InMemoryStore::new());
                store = None;
                film_storage = storage.clone();
                user_storage = storage;
            }
        }

        let user_service: Arc<dyn UserService> =
            Arc::new(DefaultUserService::new(user_storage.clone()));
        let film_service: Arc<dyn FilmService> = Arc::new(DefaultFilmService::new(
            film_storage.clone(),
            user_service.clone(),
        ));

        Ok(Self {
            config,
            store,
            film_storage,
            user_storage,
            film_service,
            user_service,
        })
    }
}
