use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "films")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub film_id: i64,

    pub title: String,

    pub description: Option<String>,

    pub release_date: Option<Date>,

    pub duration: i32,

    pub rating_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::mpa_ratings::Entity",
        from = "Column::RatingId",
        to = "super::mpa_ratings::Column::RatingId"
    )]
    MpaRatings,
}

impl Related<super::mpa_ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MpaRatings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
