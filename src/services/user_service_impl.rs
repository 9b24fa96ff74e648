//! Default [`UserService`] implementation over a [`UserStorage`] backend.

use std::sync::Arc;
use tracing::info;

use crate::domain::UserId;
use crate::models::{NewUser, User};
use crate::services::user_service::{UserError, UserService, intersect_friends, validate_user};
use crate::storage::UserStorage;

pub struct DefaultUserService {
    storage: Arc<dyn UserStorage>,
}

impl DefaultUserService {
    #[must_use]
    pub fn new(storage: Arc<dyn UserStorage>) -> Self {
        Self { storage }
    }
}

fn storage_err(err: anyhow::Error) -> UserError {
    UserError::Storage(err.to_string())
}

#[async_trait::async_trait]
impl UserService for DefaultUserService {
    async fn get_all(&self) -> Result<Vec<User>, UserError> {
        self.storage.get_all().await.map_err(storage_err)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.storage
            .get_user(id.value())
            .await
            .map_err(storage_err)?
            .ok_or(UserError::NotFound(id))
    }

    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        validate_user(&user, chrono::Local::now().date_naive())?;
        self.storage.create(user).await.map_err(storage_err)
    }

    async fn update(&self, id: UserId, user: NewUser) -> Result<User, UserError> {
        self.ensure_exists(id).await?;
        validate_user(&user, chrono::Local::now().date_naive())?;
        self.storage
            .update(id.value(), user)
            .await
            .map_err(storage_err)?
            .ok_or(UserError::NotFound(id))
    }

    async fn delete(&self, id: UserId) -> Result<(), UserError> {
        self.ensure_exists(id).await?;
        self.storage.delete(id.value()).await.map_err(storage_err)
    }

    async fn ensure_exists(&self, id: UserId) -> Result<(), UserError> {
        self.storage
            .get_user(id.value())
            .await
            .map_err(storage_err)?
            .map(|_| ())
            .ok_or(UserError::NotFound(id))
    }

    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), UserError> {
        self.ensure_exists(user_id).await?;
        self.ensure_exists(friend_id).await?;
        info!("Adding friend {} to user {}", friend_id, user_id);
        self.storage
            .add_friend(user_id.value(), friend_id.value())
            .await
            .map_err(storage_err)
    }

    async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), UserError> {
        self.ensure_exists(user_id).await?;
        self.ensure_exists(friend_id).await?;
        info!("Removing friend {} from user {}", friend_id, user_id);
        self.storage
            .delete_friend(user_id.value(), friend_id.value())
            .await
            .map_err(storage_err)
    }

    async fn get_user_friends(&self, user_id: UserId) -> Result<Vec<User>, UserError> {
        self.ensure_exists(user_id).await?;
        self.storage
            .get_user_friends(user_id.value())
            .await
            .map_err(storage_err)
    }

    async fn get_common_friends(
        &self,
        user_id: UserId,
        other_id: UserId,
    ) -> Result<Vec<User>, UserError> {
        self.ensure_exists(user_id).await?;
        self.ensure_exists(other_id).await?;

        let friends = self
            .storage
            .get_user_friends(user_id.value())
            .await
            .map_err(storage_err)?;
        let other_friends = self
            .storage
            .get_user_friends(other_id.value())
            .await
            .map_err(storage_err)?;

        Ok(intersect_friends(&friends, &other_friends))
    }
}
