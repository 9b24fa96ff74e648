//! Backend-parity tests: the relational and in-memory storages must agree
//! on CRUD, the friendship state machine, and cascade behavior.

use chrono::NaiveDate;
use filmorate::db::Store;
use filmorate::models::{FriendshipStatus, NewFilm, NewUser};
use filmorate::storage::{DatabaseStorage, FilmStorage, InMemoryStore, UserStorage};
use std::sync::Arc;

type Backend = (Arc<dyn FilmStorage>, Arc<dyn UserStorage>);

async fn database_backend() -> Backend {
    let store = Store::new("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    let storage = Arc::new(DatabaseStorage::new(store));
    let films: Arc<dyn FilmStorage> = storage.clone();
    let users: Arc<dyn UserStorage> = storage;
    (films, users)
}

fn memory_backend() -> Backend {
    let storage = Arc::new(InMemoryStore::new());
    let films: Arc<dyn FilmStorage> = storage.clone();
    let users: Arc<dyn UserStorage> = storage;
    (films, users)
}

fn new_film(name: &str) -> NewFilm {
    NewFilm {
        name: name.to_string(),
        description: Some("test".to_string()),
        release_date: NaiveDate::from_ymd_opt(2000, 1, 1),
        duration: 100,
        mpa_id: 1,
        genre_ids: vec![1, 2],
    }
}

fn new_user(login: &str) -> NewUser {
    NewUser {
        email: format!("{login}@a.ru"),
        login: login.to_string(),
        name: Some(login.to_string()),
        birthday: NaiveDate::from_ymd_opt(2000, 1, 1),
    }
}

async fn check_film_crud(films: &Arc<dyn FilmStorage>) {
    let created = films.create(new_film("test")).await.unwrap();
    assert_eq!(created.id.value(), 1);
    assert_eq!(created.mpa.name, "G");
    let genre_names: Vec<&str> = created.genres.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(genre_names, vec!["Comedy", "Drama"]);

    let fetched = films.get_film(1).await.unwrap().expect("film must exist");
    assert_eq!(fetched, created);

    let mut changed = new_film("test");
    changed.description = Some("changed".to_string());
    changed.genre_ids = vec![3];
    let updated = films
        .update(1, changed)
        .await
        .unwrap()
        .expect("update of existing film");
    assert_eq!(updated.description.as_deref(), Some("changed"));
    assert_eq!(updated.genres.len(), 1);
    assert_eq!(updated.genres[0].name, "Cartoon");

    assert!(films.update(99, new_film("ghost")).await.unwrap().is_none());
    assert!(films.get_film(99).await.unwrap().is_none());

    films.delete(1).await.unwrap();
    assert!(films.get_film(1).await.unwrap().is_none());
}

#[tokio::test]
async fn film_crud_database() {
    let (films, _) = database_backend().await;
    check_film_crud(&films).await;
}

#[tokio::test]
async fn film_crud_memory() {
    let (films, _) = memory_backend();
    check_film_crud(&films).await;
}

async fn check_user_crud(users: &Arc<dyn UserStorage>) {
    let created = users.create(new_user("test")).await.unwrap();
    assert_eq!(created.id.value(), 1);
    assert_eq!(created.name, "test");

    let blank_name = NewUser {
        name: None,
        ..new_user("second")
    };
    let second = users.create(blank_name).await.unwrap();
    assert_eq!(second.id.value(), 2);
    assert_eq!(second.name, "second");

    let mut changed = new_user("test");
    changed.email = "b@b.ru".to_string();
    let updated = users
        .update(1, changed)
        .await
        .unwrap()
        .expect("update of existing user");
    assert_eq!(updated.email, "b@b.ru");

    assert!(users.update(99, new_user("ghost")).await.unwrap().is_none());

    users.delete(1).await.unwrap();
    assert!(users.get_user(1).await.unwrap().is_none());
    assert_eq!(users.get_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn user_crud_database() {
    let (_, users) = database_backend().await;
    check_user_crud(&users).await;
}

#[tokio::test]
async fn user_crud_memory() {
    let (_, users) = memory_backend();
    check_user_crud(&users).await;
}

async fn check_friendship_state_machine(users: &Arc<dyn UserStorage>) {
    users.create(new_user("u1")).await.unwrap();
    users.create(new_user("u2")).await.unwrap();

    // One-sided add: directed record unapproved, nothing in the other
    // direction, listing asymmetric.
    users.add_friend(1, 2).await.unwrap();
    let direct = users.get_friendship(1, 2).await.unwrap().unwrap();
    assert_eq!(direct.status, FriendshipStatus::Unapproved);
    assert!(users.get_friendship(2, 1).await.unwrap().is_none());

    let friends_of_1: Vec<i64> = users
        .get_user_friends(1)
        .await
        .unwrap()
        .iter()
        .map(|u| u.id.value())
        .collect();
    assert_eq!(friends_of_1, vec![2]);
    assert!(users.get_user_friends(2).await.unwrap().is_empty());

    // Re-adding the same direction changes nothing.
    users.add_friend(1, 2).await.unwrap();
    assert_eq!(
        users.get_friendship(1, 2).await.unwrap().unwrap().status,
        FriendshipStatus::Unapproved
    );

    // Reciprocating flips both records to approved.
    users.add_friend(2, 1).await.unwrap();
    assert_eq!(
        users.get_friendship(1, 2).await.unwrap().unwrap().status,
        FriendshipStatus::Approved
    );
    assert_eq!(
        users.get_friendship(2, 1).await.unwrap().unwrap().status,
        FriendshipStatus::Approved
    );

    // Deleting one direction removes it and downgrades the survivor.
    users.delete_friend(1, 2).await.unwrap();
    assert!(users.get_friendship(1, 2).await.unwrap().is_none());
    assert_eq!(
        users.get_friendship(2, 1).await.unwrap().unwrap().status,
        FriendshipStatus::Unapproved
    );

    // Deleting an absent record is a no-op.
    users.delete_friend(1, 2).await.unwrap();
    assert_eq!(
        users.get_friendship(2, 1).await.unwrap().unwrap().status,
        FriendshipStatus::Unapproved
    );
}

#[tokio::test]
async fn friendship_state_machine_database() {
    let (_, users) = database_backend().await;
    check_friendship_state_machine(&users).await;
}

#[tokio::test]
async fn friendship_state_machine_memory() {
    let (_, users) = memory_backend();
    check_friendship_state_machine(&users).await;
}

async fn check_like_idempotence(films: &Arc<dyn FilmStorage>, users: &Arc<dyn UserStorage>) {
    films.create(new_film("one")).await.unwrap();
    films.create(new_film("two")).await.unwrap();
    users.create(new_user("u1")).await.unwrap();

    films.add_like(1, 1).await.unwrap();
    films.add_like(1, 1).await.unwrap();

    let likes = films.get_likes().await.unwrap();
    assert_eq!(likes, vec![(1, vec![1]), (2, vec![])]);

    films.delete_like(1, 1).await.unwrap();
    films.delete_like(1, 1).await.unwrap();
    let likes = films.get_likes().await.unwrap();
    assert_eq!(likes, vec![(1, vec![]), (2, vec![])]);
}

#[tokio::test]
async fn like_idempotence_database() {
    let (films, users) = database_backend().await;
    check_like_idempotence(&films, &users).await;
}

#[tokio::test]
async fn like_idempotence_memory() {
    let (films, users) = memory_backend();
    check_like_idempotence(&films, &users).await;
}

async fn check_delete_cascades(films: &Arc<dyn FilmStorage>, users: &Arc<dyn UserStorage>) {
    films.create(new_film("one")).await.unwrap();
    users.create(new_user("u1")).await.unwrap();
    users.create(new_user("u2")).await.unwrap();

    films.add_like(1, 1).await.unwrap();
    films.add_like(1, 2).await.unwrap();
    users.add_friend(1, 2).await.unwrap();
    users.add_friend(2, 1).await.unwrap();

    // Removing a user strips their likes and both friendship directions.
    users.delete(1).await.unwrap();
    let likes = films.get_likes().await.unwrap();
    assert_eq!(likes, vec![(1, vec![2])]);
    assert!(users.get_friendship(1, 2).await.unwrap().is_none());
    assert!(users.get_friendship(2, 1).await.unwrap().is_none());
    assert!(users.get_user_friends(2).await.unwrap().is_empty());

    // Removing a film drops its like set entirely.
    films.delete(1).await.unwrap();
    assert!(films.get_likes().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_cascades_database() {
    let (films, users) = database_backend().await;
    check_delete_cascades(&films, &users).await;
}

#[tokio::test]
async fn delete_cascades_memory() {
    let (films, users) = memory_backend();
    check_delete_cascades(&films, &users).await;
}
