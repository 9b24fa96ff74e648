use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use crate::domain::UserId;
use crate::entities::{friendships, likes, prelude::*, user_friends, users};
use crate::models::{Friendship, FriendshipStatus, NewUser, User};

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_user(model: users::Model) -> User {
        User {
            id: UserId::new(model.user_id),
            email: model.email,
            login: model.login,
            name: model.name,
            birthday: model.birthday,
        }
    }

    fn map_friendship(model: friendships::Model) -> Result<Friendship> {
        Ok(Friendship {
            id: model.friendship_id,
            user_id: model.user_id,
            friend_id: model.friend_id,
            status: FriendshipStatus::parse(&model.status)?,
        })
    }

    async fn find_friendship<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        friend_id: i64,
    ) -> Result<Option<friendships::Model>> {
        Friendships::find()
            .filter(friendships::Column::UserId.eq(user_id))
            .filter(friendships::Column::FriendId.eq(friend_id))
            .one(conn)
            .await
            .context("Failed to query friendship")
    }

    async fn set_friendship_status<C: ConnectionTrait>(
        conn: &C,
        record: friendships::Model,
        status: FriendshipStatus,
    ) -> Result<()> {
        let mut active: friendships::ActiveModel = record.into();
        active.status = Set(status.as_str().to_string());
        active
            .update(conn)
            .await
            .context("Failed to update friendship status")?;
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<User>> {
        let rows = Users::find()
            .order_by_asc(users::Column::UserId)
            .all(&self.conn)
            .await
            .context("Failed to query users")?;
        Ok(rows.into_iter().map(Self::map_user).collect())
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<User>> {
        let row = Users::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user by id")?;
        Ok(row.map(Self::map_user))
    }

    pub async fn create(&self, user: &NewUser) -> Result<User> {
        let inserted = users::ActiveModel {
            email: Set(user.email.clone()),
            login: Set(user.login.clone()),
            name: Set(user.display_name()),
            birthday: Set(user.birthday),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert user")?;

        info!("Created user {} ({})", inserted.user_id, inserted.login);
        Ok(Self::map_user(inserted))
    }

    pub async fn update(&self, user_id: i64, user: &NewUser) -> Result<Option<User>> {
        if Users::find_by_id(user_id)
            .one(&self.conn)
            .await
            .context("Failed to query user for update")?
            .is_none()
        {
            return Ok(None);
        }

        let updated = users::ActiveModel {
            user_id: Set(user_id),
            email: Set(user.email.clone()),
            login: Set(user.login.clone()),
            name: Set(user.display_name()),
            birthday: Set(user.birthday),
        }
        .update(&self.conn)
        .await
        .context("Failed to update user")?;

        info!("Updated user {}", user_id);
        Ok(Some(Self::map_user(updated)))
    }

    /// Remove the user together with their likes and every directed
    /// friendship record where they appear on either side.
    pub async fn delete(&self, user_id: i64) -> Result<()> {
        let txn = self.conn.begin().await?;

        Likes::delete_many()
            .filter(likes::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        let affected: Vec<i64> = Friendships::find()
            .filter(
                friendships::Column::UserId
                    .eq(user_id)
                    .or(friendships::Column::FriendId.eq(user_id)),
            )
            .all(&txn)
            .await
            .context("Failed to query friendships for user delete")?
            .into_iter()
            .map(|f| f.friendship_id)
            .collect();

        if !affected.is_empty() {
            UserFriends::delete_many()
                .filter(user_friends::Column::FriendshipId.is_in(affected.clone()))
                .exec(&txn)
                .await?;
            Friendships::delete_many()
                .filter(friendships::Column::FriendshipId.is_in(affected))
                .exec(&txn)
                .await?;
        }

        Users::delete_by_id(user_id).exec(&txn).await?;

        txn.commit().await?;

        info!("Deleted user {}", user_id);
        Ok(())
    }

    /// Insert the directed record `user_id -> friend_id` unless it already
    /// exists. When the reciprocal record is present both sides become
    /// `Approved`; otherwise the new record starts `Unapproved`.
    pub async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        let txn = self.conn.begin().await?;

        if Self::find_friendship(&txn, user_id, friend_id)
            .await?
            .is_some()
        {
            txn.commit().await?;
            return Ok(());
        }

        let opposite = Self::find_friendship(&txn, friend_id, user_id).await?;
        let status = if opposite.is_some() {
            FriendshipStatus::Approved
        } else {
            FriendshipStatus::Unapproved
        };

        if let Some(record) = opposite {
            Self::set_friendship_status(&txn, record, status).await?;
        }

        let inserted = friendships::ActiveModel {
            user_id: Set(user_id),
            friend_id: Set(friend_id),
            status: Set(status.as_str().to_string()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert friendship")?;

        user_friends::ActiveModel {
            user_id: Set(user_id),
            friendship_id: Set(inserted.friendship_id),
        }
        .insert(&txn)
        .await
        .context("Failed to insert friendship link")?;

        txn.commit().await?;

        info!(
            "User {} now lists {} as a friend ({})",
            user_id, friend_id, status
        );
        Ok(())
    }

    /// Remove the directed record `user_id -> friend_id` if present and
    /// downgrade a surviving reciprocal record to `Unapproved`.
    pub async fn delete_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        let txn = self.conn.begin().await?;

        let Some(direct) = Self::find_friendship(&txn, user_id, friend_id).await? else {
            txn.commit().await?;
            return Ok(());
        };

        if let Some(opposite) = Self::find_friendship(&txn, friend_id, user_id).await? {
            Self::set_friendship_status(&txn, opposite, FriendshipStatus::Unapproved).await?;
        }

        UserFriends::delete_many()
            .filter(user_friends::Column::FriendshipId.eq(direct.friendship_id))
            .exec(&txn)
            .await?;
        Friendships::delete_by_id(direct.friendship_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!("User {} no longer lists {} as a friend", user_id, friend_id);
        Ok(())
    }

    pub async fn get_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<Option<Friendship>> {
        Self::find_friendship(&self.conn, user_id, friend_id)
            .await?
            .map(Self::map_friendship)
            .transpose()
    }

    /// Users the given user lists via an outgoing directed record. Status is
    /// deliberately not filtered: an unapproved record still counts.
    pub async fn get_user_friends(&self, user_id: i64) -> Result<Vec<User>> {
        let friend_ids: Vec<i64> = Friendships::find()
            .filter(friendships::Column::UserId.eq(user_id))
            .all(&self.conn)
            .await
            .context("Failed to query outgoing friendships")?
            .into_iter()
            .map(|f| f.friend_id)
            .collect();

        if friend_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Users::find()
            .filter(users::Column::UserId.is_in(friend_ids))
            .order_by_asc(users::Column::UserId)
            .all(&self.conn)
            .await
            .context("Failed to query friend users")?;
        Ok(rows.into_iter().map(Self::map_user).collect())
    }
}
