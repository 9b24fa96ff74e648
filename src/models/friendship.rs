use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval state of a directed friendship record.
///
/// `Approved` holds exactly when the reciprocal directed record exists; the
/// storage layer derives it, callers never choose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FriendshipStatus {
    Unapproved,
    Approved,
}

impl FriendshipStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unapproved => "Unapproved",
            Self::Approved => "Approved",
        }
    }

    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "Unapproved" => Ok(Self::Unapproved),
            "Approved" => Ok(Self::Approved),
            other => bail!("unknown friendship status: {other}"),
        }
    }
}

impl fmt::Display for FriendshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed friendship record from `user_id` towards `friend_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friendship {
    pub id: i64,
    pub user_id: i64,
    pub friend_id: i64,
    pub status: FriendshipStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_storage_form() {
        for status in [FriendshipStatus::Unapproved, FriendshipStatus::Approved] {
            assert_eq!(FriendshipStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(FriendshipStatus::parse("Pending").is_err());
    }
}
