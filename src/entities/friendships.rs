use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "friendships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub friendship_id: i64,

    /// Requesting side of the directed record.
    pub user_id: i64,

    /// Target side of the directed record.
    pub friend_id: i64,

    /// "Unapproved" or "Approved"; derived from the reciprocal record.
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
