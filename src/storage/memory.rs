use anyhow::{Result, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::domain::{FilmId, UserId};
use crate::models::{
    Film, Friendship, FriendshipStatus, GENRE_SEED, Genre, MPA_SEED, Mpa, NewFilm, NewUser, User,
};
use crate::storage::{FilmStorage, UserStorage};

/// Map-based backend for tests and single-node development.
///
/// Both capability traits live on one store so that user deletion can
/// cascade into the like map. The interior maps are mutex-guarded; the only
/// method taking both locks (`UserStorage::delete`) acquires users before
/// films.
pub struct InMemoryStore {
    films: Mutex<FilmState>,
    users: Mutex<UserState>,
}

struct FilmState {
    films: BTreeMap<i64, Film>,
    likes: BTreeMap<i64, Vec<i64>>,
    genres: Vec<Genre>,
    mpa: Vec<Mpa>,
    next_id: i64,
}

struct UserState {
    users: BTreeMap<i64, User>,
    friendships: Vec<Friendship>,
    next_id: i64,
    next_friendship_id: i64,
}

impl UserState {
    fn position(&self, user_id: i64, friend_id: i64) -> Option<usize> {
        self.friendships
            .iter()
            .position(|f| f.user_id == user_id && f.friend_id == friend_id)
    }
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            films: Mutex::new(FilmState {
                films: BTreeMap::new(),
                likes: BTreeMap::new(),
                genres: GENRE_SEED
                    .iter()
                    .map(|(id, name)| Genre {
                        id: *id,
                        name: (*name).to_string(),
                    })
                    .collect(),
                mpa: MPA_SEED
                    .iter()
                    .map(|(id, name)| Mpa {
                        id: *id,
                        name: (*name).to_string(),
                    })
                    .collect(),
                next_id: 1,
            }),
            users: Mutex::new(UserState {
                users: BTreeMap::new(),
                friendships: Vec::new(),
                next_id: 1,
                next_friendship_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_film(state: &FilmState, id: i64, film: &NewFilm) -> Result<Film> {
    let Some(mpa) = state.mpa.iter().find(|m| m.id == film.mpa_id) else {
        bail!("unknown MPA rating id: {}", film.mpa_id);
    };

    let mut genres: Vec<Genre> = Vec::new();
    for genre_id in &film.genre_ids {
        if genres.iter().any(|g| g.id == *genre_id) {
            continue;
        }
        let Some(genre) = state.genres.iter().find(|g| g.id == *genre_id) else {
            bail!("unknown genre id: {genre_id}");
        };
        genres.push(genre.clone());
    }

    Ok(Film {
        id: FilmId::new(id),
        name: film.name.clone(),
        description: film.description.clone(),
        release_date: film.release_date,
        duration: film.duration,
        mpa: mpa.clone(),
        genres,
    })
}

#[async_trait]
impl FilmStorage for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<Film>> {
        let state = self.films.lock().await;
        Ok(state.films.values().cloned().collect())
    }

    async fn create(&self, film: NewFilm) -> Result<Film> {
        let mut state = self.films.lock().await;
        let id = state.next_id;
        let record = resolve_film(&state, id, &film)?;
        state.next_id += 1;
        state.films.insert(id, record.clone());
        state.likes.insert(id, Vec::new());
        Ok(record)
    }

    async fn update(&self, film_id: i64, film: NewFilm) -> Result<Option<Film>> {
        let mut state = self.films.lock().await;
        if !state.films.contains_key(&film_id) {
            return Ok(None);
        }
        let record = resolve_film(&state, film_id, &film)?;
        state.films.insert(film_id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, film_id: i64) -> Result<()> {
        let mut state = self.films.lock().await;
        state.likes.remove(&film_id);
        state.films.remove(&film_id);
        Ok(())
    }

    async fn get_film(&self, film_id: i64) -> Result<Option<Film>> {
        let state = self.films.lock().await;
        Ok(state.films.get(&film_id).cloned())
    }

    async fn add_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        let mut state = self.films.lock().await;
        if let Some(likers) = state.likes.get_mut(&film_id) {
            if !likers.contains(&user_id) {
                likers.push(user_id);
            }
        }
        Ok(())
    }

    async fn delete_like(&self, film_id: i64, user_id: i64) -> Result<()> {
        let mut state = self.films.lock().await;
        if let Some(likers) = state.likes.get_mut(&film_id) {
            likers.retain(|id| *id != user_id);
        }
        Ok(())
    }

    async fn get_likes(&self) -> Result<Vec<(i64, Vec<i64>)>> {
        let state = self.films.lock().await;
        Ok(state
            .films
            .keys()
            .map(|film_id| {
                (
                    *film_id,
                    state.likes.get(film_id).cloned().unwrap_or_default(),
                )
            })
            .collect())
    }

    async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        let state = self.films.lock().await;
        Ok(state.genres.clone())
    }

    async fn get_genre(&self, genre_id: i64) -> Result<Option<Genre>> {
        let state = self.films.lock().await;
        Ok(state.genres.iter().find(|g| g.id == genre_id).cloned())
    }

    async fn get_all_mpa(&self) -> Result<Vec<Mpa>> {
        let state = self.films.lock().await;
        Ok(state.mpa.clone())
    }

    async fn get_mpa(&self, rating_id: i64) -> Result<Option<Mpa>> {
        let state = self.films.lock().await;
        Ok(state.mpa.iter().find(|m| m.id == rating_id).cloned())
    }
}

#[async_trait]
impl UserStorage for InMemoryStore {
    async fn get_all(&self) -> Result<Vec<User>> {
        let state = self.users.lock().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn create(&self, user: NewUser) -> Result<User> {
        let mut state = self.users.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        let record = User {
            id: UserId::new(id),
            email: user.email.clone(),
            login: user.login.clone(),
            name: user.display_name(),
            birthday: user.birthday,
        };
        state.users.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, user_id: i64, user: NewUser) -> Result<Option<User>> {
        let mut state = self.users.lock().await;
        if !state.users.contains_key(&user_id) {
            return Ok(None);
        }
        let record = User {
            id: UserId::new(user_id),
            email: user.email.clone(),
            login: user.login.clone(),
            name: user.display_name(),
            birthday: user.birthday,
        };
        state.users.insert(user_id, record.clone());
        Ok(Some(record))
    }

    async fn delete(&self, user_id: i64) -> Result<()> {
        let mut users = self.users.lock().await;
        users.users.remove(&user_id);
        users
            .friendships
            .retain(|f| f.user_id != user_id && f.friend_id != user_id);
        drop(users);

        let mut films = self.films.lock().await;
        for likers in films.likes.values_mut() {
            likers.retain(|id| *id != user_id);
        }
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        let state = self.users.lock().await;
        Ok(state.users.get(&user_id).cloned())
    }

    async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        let mut state = self.users.lock().await;
        if state.position(user_id, friend_id).is_some() {
            return Ok(());
        }

        let opposite = state.position(friend_id, user_id);
        let status = if opposite.is_some() {
            FriendshipStatus::Approved
        } else {
            FriendshipStatus::Unapproved
        };
        if let Some(idx) = opposite {
            state.friendships[idx].status = FriendshipStatus::Approved;
        }

        let id = state.next_friendship_id;
        state.next_friendship_id += 1;
        state.friendships.push(Friendship {
            id,
            user_id,
            friend_id,
            status,
        });
        Ok(())
    }

    async fn delete_friend(&self, user_id: i64, friend_id: i64) -> Result<()> {
        let mut state = self.users.lock().await;
        let Some(idx) = state.position(user_id, friend_id) else {
            return Ok(());
        };
        state.friendships.remove(idx);

        if let Some(opposite) = state.position(friend_id, user_id) {
            state.friendships[opposite].status = FriendshipStatus::Unapproved;
        }
        Ok(())
    }

    async fn get_friendship(
        &self,
        user_id: i64,
        friend_id: i64,
    ) -> Result<Option<Friendship>> {
        let state = self.users.lock().await;
        Ok(state
            .position(user_id, friend_id)
            .map(|idx| state.friendships[idx].clone()))
    }

    async fn get_user_friends(&self, user_id: i64) -> Result<Vec<User>> {
        let state = self.users.lock().await;
        Ok(state
            .friendships
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| state.users.get(&f.friend_id).cloned())
            .collect())
    }
}
