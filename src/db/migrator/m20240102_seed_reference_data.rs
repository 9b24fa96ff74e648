use crate::entities::prelude::*;
use crate::entities::{genres, mpa_ratings};
use crate::models::{GENRE_SEED, MPA_SEED};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (id, name) in MPA_SEED {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(MpaRatings)
                .columns([mpa_ratings::Column::RatingId, mpa_ratings::Column::Name])
                .values_panic([(*id).into(), (*name).into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        for (id, name) in GENRE_SEED {
            let insert = sea_orm_migration::sea_query::Query::insert()
                .into_table(Genres)
                .columns([genres::Column::GenreId, genres::Column::Name])
                .values_panic([(*id).into(), (*name).into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete_genres = sea_orm_migration::sea_query::Query::delete()
            .from_table(Genres)
            .to_owned();
        manager.exec_stmt(delete_genres).await?;

        let delete_mpa = sea_orm_migration::sea_query::Query::delete()
            .from_table(MpaRatings)
            .to_owned();
        manager.exec_stmt(delete_mpa).await?;

        Ok(())
    }
}
