//! Domain service for user and friendship operations.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::UserId;
use crate::models::{NewUser, User};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// User operations: CRUD with validation plus the friendship graph.
///
/// Existence checks live here; storage below reports absence as `None` and
/// the asymmetric friendship listing is delegated unchanged.
#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    async fn get_all(&self) -> Result<Vec<User>, UserError>;

    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] when the id is unknown.
    async fn get_user(&self, id: UserId) -> Result<User, UserError>;

    /// # Errors
    ///
    /// Returns [`UserError::InvalidInput`] when validation fails.
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// # Errors
    ///
    /// Returns [`UserError::NotFound`] when the id is unknown and
    /// [`UserError::InvalidInput`] when validation fails. A failed update
    /// leaves the stored record untouched.
    async fn update(&self, id: UserId, user: NewUser) -> Result<User, UserError>;

    /// Removes the user and cascades to their friendships and likes.
    async fn delete(&self, id: UserId) -> Result<(), UserError>;

    /// Fails with [`UserError::NotFound`] when the id is unknown; used by
    /// sibling services that reference users.
    async fn ensure_exists(&self, id: UserId) -> Result<(), UserError>;

    /// Both ids must exist; the reciprocal-approval bookkeeping happens in
    /// storage.
    async fn add_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), UserError>;

    async fn delete_friend(&self, user_id: UserId, friend_id: UserId) -> Result<(), UserError>;

    async fn get_user_friends(&self, user_id: UserId) -> Result<Vec<User>, UserError>;

    /// Intersection of the two friend lists by user id, keeping the first
    /// user's ordering.
    async fn get_common_friends(
        &self,
        user_id: UserId,
        other_id: UserId,
    ) -> Result<Vec<User>, UserError>;
}

/// Field validation for a submitted user. Pure: the outcome depends only on
/// the payload and the supplied `today`.
pub fn validate_user(user: &NewUser, today: NaiveDate) -> Result<(), UserError> {
    if user.email.trim().is_empty() {
        return Err(UserError::InvalidInput("'email' is empty!".to_string()));
    }
    if !user.email.contains('@') {
        return Err(UserError::InvalidInput(
            "'email' must contain '@'!".to_string(),
        ));
    }
    if user.login.trim().is_empty() {
        return Err(UserError::InvalidInput("'login' is empty!".to_string()));
    }
    if user.login.contains(' ') {
        return Err(UserError::InvalidInput(
            "'login' must not contain blanks!".to_string(),
        ));
    }
    if let Some(birthday) = user.birthday {
        if birthday > today {
            return Err(UserError::InvalidInput(
                "'birthday' must not be in future!".to_string(),
            ));
        }
    }
    Ok(())
}

/// Users present in both lists, compared by id, in `first`'s order.
#[must_use]
pub fn intersect_friends(first: &[User], second: &[User]) -> Vec<User> {
    first
        .iter()
        .filter(|user| second.iter().any(|other| other.id == user.id))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn valid_user() -> NewUser {
        NewUser {
            email: "a@a.ru".to_string(),
            login: "test".to_string(),
            name: Some("test".to_string()),
            birthday: NaiveDate::from_ymd_opt(2000, 1, 1),
        }
    }

    #[test]
    fn valid_user_passes() {
        assert!(validate_user(&valid_user(), today()).is_ok());
    }

    #[test]
    fn empty_email_rejected() {
        let user = NewUser {
            email: String::new(),
            ..valid_user()
        };
        assert!(matches!(
            validate_user(&user, today()),
            Err(UserError::InvalidInput(_))
        ));
    }

    #[test]
    fn email_without_at_rejected() {
        let user = NewUser {
            email: "test".to_string(),
            ..valid_user()
        };
        assert!(validate_user(&user, today()).is_err());
    }

    #[test]
    fn empty_login_rejected() {
        let user = NewUser {
            login: "  ".to_string(),
            ..valid_user()
        };
        assert!(validate_user(&user, today()).is_err());
    }

    #[test]
    fn login_with_blanks_rejected() {
        let user = NewUser {
            login: "t e s t".to_string(),
            ..valid_user()
        };
        assert!(validate_user(&user, today()).is_err());
    }

    #[test]
    fn missing_name_is_fine() {
        let user = NewUser {
            name: None,
            ..valid_user()
        };
        assert!(validate_user(&user, today()).is_ok());
    }

    #[test]
    fn birthday_today_accepted_future_rejected() {
        let on_the_day = NewUser {
            birthday: Some(today()),
            ..valid_user()
        };
        assert!(validate_user(&on_the_day, today()).is_ok());

        let future = NewUser {
            birthday: NaiveDate::from_ymd_opt(2100, 1, 1),
            ..valid_user()
        };
        assert!(validate_user(&future, today()).is_err());
    }

    fn user(id: i64) -> User {
        User {
            id: UserId::new(id),
            email: format!("u{id}@a.ru"),
            login: format!("u{id}"),
            name: format!("u{id}"),
            birthday: None,
        }
    }

    #[test]
    fn intersect_keeps_first_order() {
        let first = vec![user(1), user(2), user(3)];
        let second = vec![user(3), user(4), user(1)];
        let common: Vec<i64> = intersect_friends(&first, &second)
            .into_iter()
            .map(|u| u.id.value())
            .collect();
        assert_eq!(common, vec![1, 3]);
    }

    #[test]
    fn intersect_with_disjoint_lists_is_empty() {
        assert!(intersect_friends(&[user(1)], &[user(2)]).is_empty());
    }
}
