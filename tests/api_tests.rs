use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use filmorate::api::{create_app_state, router};
use filmorate::config::{Config, StorageBackend};
use filmorate::state::SharedState;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app(backend: StorageBackend) -> Router {
    let mut config = Config::default();
    config.general.storage_backend = backend;
    config.database.url = "sqlite::memory:".to_string();

    let shared = Arc::new(
        SharedState::new(config)
            .await
            .expect("Failed to build app state"),
    );
    router(create_app_state(shared))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn film_json(name: &str) -> Value {
    json!({
        "name": name,
        "description": "test",
        "release_date": "2000-01-01",
        "duration": 120,
        "mpa": {"id": 1},
        "genres": [{"id": 1}, {"id": 2}]
    })
}

fn user_json(login: &str) -> Value {
    json!({
        "email": format!("{login}@a.ru"),
        "login": login,
        "name": login,
        "birthday": "2000-01-01"
    })
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = spawn_app(StorageBackend::Database).await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn film_create_then_get_round_trip() {
    let app = spawn_app(StorageBackend::Database).await;

    let (status, body) = send(&app, "POST", "/films", Some(film_json("The Matrix"))).await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(id, 1);
    assert_eq!(body["data"]["mpa"]["name"], "G");

    let (status, body) = send(&app, "GET", &format!("/films/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "The Matrix");
    assert_eq!(body["data"]["duration"], 120);
    let genres: Vec<&str> = body["data"]["genres"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(genres, vec!["Comedy", "Drama"]);
}

#[tokio::test]
async fn film_validation_rejections() {
    let app = spawn_app(StorageBackend::Database).await;

    let mut zero_duration = film_json("test");
    zero_duration["duration"] = json!(0);
    let (status, body) = send(&app, "POST", "/films", Some(zero_duration)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let mut long_description = film_json("test");
    long_description["description"] = json!("a".repeat(201));
    let (status, _) = send(&app, "POST", "/films", Some(long_description)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut too_early = film_json("test");
    too_early["release_date"] = json!("1895-12-27");
    let (status, _) = send(&app, "POST", "/films", Some(too_early)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The day of the first public screening itself is allowed.
    let mut on_the_day = film_json("first screening");
    on_the_day["release_date"] = json!("1895-12-28");
    let (status, _) = send(&app, "POST", "/films", Some(on_the_day)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn film_update_of_unknown_id_is_not_found() {
    let app = spawn_app(StorageBackend::Database).await;

    let mut payload = film_json("ghost");
    payload["id"] = json!(99);
    let (status, _) = send(&app, "PUT", "/films", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/films", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn user_blank_name_defaults_to_login() {
    let app = spawn_app(StorageBackend::Database).await;

    let payload = json!({
        "email": "a@a.ru",
        "login": "neo",
        "birthday": "2000-01-01"
    });
    let (status, body) = send(&app, "POST", "/users", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "neo");
}

#[tokio::test]
async fn user_validation_rejections() {
    let app = spawn_app(StorageBackend::Database).await;

    let mut no_at = user_json("neo");
    no_at["email"] = json!("not-an-email");
    let (status, _) = send(&app, "POST", "/users", Some(no_at)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut spaced_login = user_json("neo");
    spaced_login["login"] = json!("n e o");
    let (status, _) = send(&app, "POST", "/users", Some(spaced_login)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut future_birthday = user_json("neo");
    future_birthday["birthday"] = json!("2100-01-01");
    let (status, _) = send(&app, "POST", "/users", Some(future_birthday)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn friends_listing_is_one_directional() {
    let app = spawn_app(StorageBackend::Database).await;

    send(&app, "POST", "/users", Some(user_json("u1"))).await;
    send(&app, "POST", "/users", Some(user_json("u2"))).await;

    let (status, _) = send(&app, "PUT", "/users/1/friends/2", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/users/1/friends", None).await;
    let friends: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(friends, vec![2]);

    // The other side has not reciprocated, so their list stays empty.
    let (_, body) = send(&app, "GET", "/users/2/friends", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn common_friends_intersection() {
    let app = spawn_app(StorageBackend::Database).await;

    for login in ["a", "b", "x", "y", "z", "w"] {
        send(&app, "POST", "/users", Some(user_json(login))).await;
    }

    // a (1) befriends x, y, z; b (2) befriends y, z, w.
    for friend in [3, 4, 5] {
        send(&app, "PUT", &format!("/users/1/friends/{friend}"), None).await;
    }
    for friend in [4, 5, 6] {
        send(&app, "PUT", &format!("/users/2/friends/{friend}"), None).await;
    }

    let (status, body) = send(&app, "GET", "/users/1/friends/common/2", None).await;
    assert_eq!(status, StatusCode::OK);
    let common: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(common, vec![4, 5]);
}

#[tokio::test]
async fn friend_of_unknown_user_is_not_found() {
    let app = spawn_app(StorageBackend::Database).await;

    send(&app, "POST", "/users", Some(user_json("u1"))).await;

    let (status, _) = send(&app, "PUT", "/users/1/friends/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/users/42/friends/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn popular_films_ranked_by_like_count() {
    let app = spawn_app(StorageBackend::Database).await;

    for name in ["one", "two", "three"] {
        send(&app, "POST", "/films", Some(film_json(name))).await;
    }
    for login in ["u1", "u2", "u3"] {
        send(&app, "POST", "/users", Some(user_json(login))).await;
    }

    // Film 2 gets three likes, film 1 two, film 3 one.
    for user in [1, 2, 3] {
        send(&app, "PUT", &format!("/films/2/like/{user}"), None).await;
    }
    for user in [1, 2] {
        send(&app, "PUT", &format!("/films/1/like/{user}"), None).await;
    }
    send(&app, "PUT", "/films/3/like/1", None).await;

    let (status, body) = send(&app, "GET", "/films/popular?count=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let top: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect();
    assert_eq!(top, vec![2, 1]);

    // A count beyond the film total returns everything.
    let (_, body) = send(&app, "GET", "/films/popular?count=50", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn like_twice_is_idempotent() {
    let app = spawn_app(StorageBackend::Database).await;

    send(&app, "POST", "/films", Some(film_json("one"))).await;
    send(&app, "POST", "/films", Some(film_json("two"))).await;
    send(&app, "POST", "/users", Some(user_json("u1"))).await;
    send(&app, "POST", "/users", Some(user_json("u2"))).await;

    // Film 1 is liked twice by the same user, film 2 once by each of two.
    send(&app, "PUT", "/films/1/like/1", None).await;
    let (status, _) = send(&app, "PUT", "/films/1/like/1", None).await;
    assert_eq!(status, StatusCode::OK);
    send(&app, "PUT", "/films/2/like/1", None).await;
    send(&app, "PUT", "/films/2/like/2", None).await;

    // The duplicate must not count: film 2 (2 distinct likes) outranks
    // film 1 (1 distinct like).
    let (_, body) = send(&app, "GET", "/films/popular?count=2", None).await;
    let top: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect();
    assert_eq!(top, vec![2, 1]);
}

#[tokio::test]
async fn like_for_unknown_film_or_user_is_not_found() {
    let app = spawn_app(StorageBackend::Database).await;

    send(&app, "POST", "/films", Some(film_json("one"))).await;
    send(&app, "POST", "/users", Some(user_json("u1"))).await;

    let (status, _) = send(&app, "PUT", "/films/9/like/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/films/1/like/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn genre_and_mpa_reference_data() {
    let app = spawn_app(StorageBackend::Database).await;

    let (status, body) = send(&app, "GET", "/genres", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);

    let (status, body) = send(&app, "GET", "/genres/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Comedy");

    let (status, _) = send(&app, "GET", "/genres/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/mpa", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (status, body) = send(&app, "GET", "/mpa/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "NC-17");

    let (status, _) = send(&app, "GET", "/mpa/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn memory_backend_serves_the_same_flows() {
    let app = spawn_app(StorageBackend::Memory).await;

    let (status, body) = send(&app, "POST", "/films", Some(film_json("The Matrix"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);

    let (status, body) = send(&app, "POST", "/users", Some(user_json("neo"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);

    let (status, _) = send(&app, "PUT", "/films/1/like/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/films/popular?count=10", None).await;
    assert_eq!(body["data"][0]["name"], "The Matrix");

    let (status, body) = send(&app, "GET", "/genres/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Drama");
}
