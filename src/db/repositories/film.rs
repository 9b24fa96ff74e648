use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::info;

use crate::domain::FilmId;
use crate::entities::{film_genre, films, likes, prelude::*};
use crate::models::{Film, Genre, Mpa, NewFilm};

pub struct FilmRepository {
    conn: DatabaseConnection,
}

impl FilmRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Resolve a film row into the domain record, pulling in its MPA rating
    /// and genre set.
    async fn load_film<C: ConnectionTrait>(conn: &C, model: films::Model) -> Result<Film> {
        let mpa = MpaRatings::find_by_id(model.rating_id)
            .one(conn)
            .await
            .context("Failed to query MPA rating for film")?
            .with_context(|| format!("Film {} references unknown rating", model.film_id))?;

        let genre_rows = FilmGenre::find()
            .filter(film_genre::Column::FilmId.eq(model.film_id))
            .order_by_asc(film_genre::Column::GenreId)
            .find_also_related(Genres)
            .all(conn)
            .await
            .context("Failed to query genres for film")?;

        Ok(Film {
            id: FilmId::new(model.film_id),
            name: model.title,
            description: model.description,
            release_date: model.release_date,
            duration: model.duration,
            mpa: Mpa {
                id: mpa.rating_id,
                name: mpa.name,
            },
            genres: genre_rows
                .into_iter()
                .filter_map(|(_, genre)| genre)
                .map(|g| Genre {
                    id: g.genre_id,
                    name: g.name,
                })
                .collect(),
        })
    }

    async fn replace_genres<C: ConnectionTrait>(
        conn: &C,
        film_id: i64,
        genre_ids: &[i64],
    ) -> Result<()> {
        FilmGenre::delete_many()
            .filter(film_genre::Column::FilmId.eq(film_id))
            .exec(conn)
            .await?;

        for genre_id in dedup_ids(genre_ids) {
            film_genre::ActiveModel {
                film_id: Set(film_id),
                genre_id: Set(genre_id),
            }
            .insert(conn)
            .await
            .context("Failed to link genre to film")?;
        }
        Ok(())
    }

    pub async fn get_all(&self) -> Result<Vec<Film>> {
        let rows = Films::find()
            .order_by_asc(films::Column::FilmId)
            .all(&self.conn)
            .await
            .context("Failed to query films")?;

        let mut result = Vec::with_capacity(rows.len());
        for model in rows {
            result.push(Self::load_film(&self.conn, model).await?);
        }
        Ok(result)
    }

    pub async fn get(&self, film_id: i64) -> Result<Option<Film>> {
        let Some(model) = Films::find_by_id(film_id)
            .one(&self.conn)
            .await
            .context("Failed to query film by id")?
        else {
            return Ok(None);
        };
        Ok(Some(Self::load_film(&self.conn, model).await?))
    }

    pub async fn create(&self, film: &NewFilm) -> Result<Film> {
        let txn = self.conn.begin().await?;

        let inserted = films::ActiveModel {
            title: Set(film.name.clone()),
            description: Set(film.description.clone()),
            release_date: Set(film.release_date),
            duration: Set(film.duration),
            rating_id: Set(film.mpa_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .context("Failed to insert film")?;

        Self::replace_genres(&txn, inserted.film_id, &film.genre_ids).await?;

        txn.commit().await?;

        info!("Created film {} ({})", inserted.film_id, film.name);

        self.get(inserted.film_id)
            .await?
            .context("Film vanished right after insert")
    }

    pub async fn update(&self, film_id: i64, film: &NewFilm) -> Result<Option<Film>> {
        if Films::find_by_id(film_id)
            .one(&self.conn)
            .await
            .context("Failed to query film for update")?
            .is_none()
        {
            return Ok(None);
        }

        let txn = self.conn.begin().await?;

        films::ActiveModel {
            film_id: Set(film_id),
            title: Set(film.name.clone()),
            description: Set(film.description.clone()),
            release_date: Set(film.release_date),
            duration: Set(film.duration),
            rating_id: Set(film.mpa_id),
        }
        .update(&txn)
        .await
        .context("Failed to update film")?;

        Self::replace_genres(&txn, film_id, &film.genre_ids).await?;

        txn.commit().await?;

        info!("Updated film {}", film_id);
        self.get(film_id).await
    }

    pub async fn delete(&self, film_id: i64) -> Result<()> {
        let txn = self.conn.begin().await?;

        Likes::delete_many()
            .filter(likes::Column::FilmId.eq(film_id))
            .exec(&txn)
            .await?;

        FilmGenre::delete_many()
            .filter(film_genre::Column::FilmId.eq(film_id))
            .exec(&txn)
            .await?;

        Films::delete_by_id(film_id).exec(&txn).await?;

        txn.commit().await?;

        info!("Deleted film {}", film_id);
        Ok(())
    }

    pub async fn add_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        let insert = Likes::insert(likes::ActiveModel {
            film_id: Set(film_id),
            user_id: Set(user_id),
            ..Default::default()
        })
        .on_conflict(
            sea_orm::sea_query::OnConflict::columns([
                likes::Column::FilmId,
                likes::Column::UserId,
            ])
            .do_nothing()
            .to_owned(),
        );

        // RecordNotInserted is the on-conflict no-op case, not a failure.
        match insert.exec(&self.conn).await {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e).context("Failed to insert like"),
        }
    }

    pub async fn delete_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        Likes::delete_many()
            .filter(likes::Column::FilmId.eq(film_id))
            .filter(likes::Column::UserId.eq(user_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete like")?;
        Ok(())
    }

    /// Liker ids per film, for every film. Films without likes map to an
    /// empty list; outer order is film id, inner order is like insertion.
    pub async fn get_likes(&self) -> Result<Vec<(i64, Vec<i64>)>> {
        let film_rows = Films::find()
            .order_by_asc(films::Column::FilmId)
            .all(&self.conn)
            .await
            .context("Failed to query films for like map")?;

        let like_rows = Likes::find()
            .order_by_asc(likes::Column::LikeId)
            .all(&self.conn)
            .await
            .context("Failed to query likes")?;

        let mut map: Vec<(i64, Vec<i64>)> = film_rows
            .iter()
            .map(|film| (film.film_id, Vec::new()))
            .collect();
        let positions: HashMap<i64, usize> = map
            .iter()
            .enumerate()
            .map(|(idx, (film_id, _))| (*film_id, idx))
            .collect();

        for like in like_rows {
            if let Some(idx) = positions.get(&like.film_id) {
                map[*idx].1.push(like.user_id);
            }
        }
        Ok(map)
    }

    pub async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        let rows = Genres::find()
            .order_by_asc(crate::entities::genres::Column::GenreId)
            .all(&self.conn)
            .await
            .context("Failed to query genres")?;
        Ok(rows
            .into_iter()
            .map(|g| Genre {
                id: g.genre_id,
                name: g.name,
            })
            .collect())
    }

    pub async fn get_genre(&self, genre_id: i64) -> Result<Option<Genre>> {
        let row = Genres::find_by_id(genre_id)
            .one(&self.conn)
            .await
            .context("Failed to query genre by id")?;
        Ok(row.map(|g| Genre {
            id: g.genre_id,
            name: g.name,
        }))
    }

    pub async fn get_all_mpa(&self) -> Result<Vec<Mpa>> {
        let rows = MpaRatings::find()
            .order_by_asc(crate::entities::mpa_ratings::Column::RatingId)
            .all(&self.conn)
            .await
            .context("Failed to query MPA ratings")?;
        Ok(rows
            .into_iter()
            .map(|m| Mpa {
                id: m.rating_id,
                name: m.name,
            })
            .collect())
    }

    pub async fn get_mpa(&self, rating_id: i64) -> Result<Option<Mpa>> {
        let row = MpaRatings::find_by_id(rating_id)
            .one(&self.conn)
            .await
            .context("Failed to query MPA rating by id")?;
        Ok(row.map(|m| Mpa {
            id: m.rating_id,
            name: m.name,
        }))
    }
}

fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(id) {
            unique.push(*id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::dedup_ids;

    #[test]
    fn dedup_keeps_first_occurrence_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert_eq!(dedup_ids(&[]), Vec::<i64>::new());
    }
}
