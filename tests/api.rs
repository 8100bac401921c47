use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use std::sync::Arc;

use mindfulday::{
    app::build_app,
    config::{AppConfig, JwtConfig},
    state::AppState,
    store::{JsonFileStore, Store},
};

fn test_app() -> Router {
    build_app(AppState::in_memory())
}

fn app_with_store(environment: &str, store: Arc<dyn Store>) -> Router {
    let config = Arc::new(AppConfig {
        data_file: "unused".into(),
        environment: environment.into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt: JwtConfig {
            secret: "test-secret".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_days: 7,
        },
    });
    build_app(AppState::from_parts(store, config))
}

async fn request(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

async fn get(app: &Router, path: &str, token: Option<&str>) -> (StatusCode, Value) {
    request(app, Method::GET, path, token, None).await
}

async fn post(app: &Router, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, path, token, Some(body)).await
}

async fn signup(app: &Router, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
    post(
        app,
        "/api/users/signup",
        None,
        json!({ "name": name, "email": email, "password": password }),
    )
    .await
}

/// Signs up a fresh user and returns their bearer token.
async fn signup_token(app: &Router, email: &str) -> String {
    let (status, body) = signup(app, "Test User", email, "secret1").await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().expect("token").to_string()
}

// --- auth ---

#[tokio::test]
async fn signup_missing_field_is_a_validation_error() {
    let app = test_app();
    let (status, body) = post(
        &app,
        "/api/users/signup",
        None,
        json!({ "name": "Ann", "email": "a@x.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn signup_rejects_short_password_and_accepts_six_chars() {
    let app = test_app();

    let (status, body) = signup(&app, "Ann", "short@x.com", "12345").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at least 6 characters");

    let (status, body) = signup(&app, "Ann", "short@x.com", "123456").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "short@x.com");
}

#[tokio::test]
async fn signup_rejects_duplicate_email_regardless_of_other_fields() {
    let app = test_app();
    signup_token(&app, "dup@x.com").await;

    let (status, body) = signup(&app, "Somebody Else", "dup@x.com", "other-password").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists with this email");
}

#[tokio::test]
async fn signup_response_never_contains_the_password() {
    let app = test_app();
    let (status, body) = signup(&app, "Ann", "a@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["user"].get("password").is_none());
    assert!(body["user"]["id"].is_string());
    assert!(body["user"]["createdAt"].is_string());
}

#[tokio::test]
async fn login_never_distinguishes_unknown_email_from_wrong_password() {
    let app = test_app();
    signup_token(&app, "ann@x.com").await;

    let unknown = post(
        &app,
        "/api/users/login",
        None,
        json!({ "email": "nobody@x.com", "password": "secret1" }),
    )
    .await;
    let wrong = post(
        &app,
        "/api/users/login",
        None,
        json!({ "email": "ann@x.com", "password": "wrong" }),
    )
    .await;

    assert_eq!(unknown.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.1, wrong.1);
    assert_eq!(unknown.1["message"], "Invalid credentials");
}

#[tokio::test]
async fn signup_then_login_scenario() {
    let app = test_app();

    let (status, body) = signup(&app, "Ann", "a@x.com", "secret1").await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].is_string());

    let (status, body) = post(
        &app,
        "/api/users/login",
        None,
        json!({ "email": "a@x.com", "password": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Invalid credentials" }));

    let (status, body) = post(
        &app,
        "/api/users/login",
        None,
        json!({ "email": "a@x.com", "password": "secret1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["name"], "Ann");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = test_app();
    let token = signup_token(&app, "me@x.com").await;

    let (status, body) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "me@x.com");
    assert!(body["user"].get("password").is_none());

    let (status, _) = get(&app, "/api/users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&app, "/api/users/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// --- tasks ---

#[tokio::test]
async fn created_task_defaults_and_round_trips_through_get() {
    let app = test_app();
    let token = signup_token(&app, "tasks@x.com").await;

    let (status, body) = post(
        &app,
        "/api/tasks",
        Some(&token),
        json!({ "title": "Write spec" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let task = &body["task"];
    assert_eq!(task["title"], "Write spec");
    assert_eq!(task["priority"], "medium");
    assert_eq!(task["completed"], false);
    assert_eq!(task["description"], "");
    assert!(task["id"].is_string());
    assert!(task["createdAt"].is_string());
    assert!(task["updatedAt"].is_string());

    let (status, body) = get(&app, "/api/tasks", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let listed = &body["tasks"][0];
    assert_eq!(listed["id"], task["id"]);
    assert_eq!(listed["title"], "Write spec");
    assert_eq!(listed["priority"], "medium");
}

#[tokio::test]
async fn create_task_validates_title_and_priority() {
    let app = test_app();
    let token = signup_token(&app, "tv@x.com").await;

    let (status, body) = post(&app, "/api/tasks", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Task title is required");

    let (status, body) = post(
        &app,
        "/api/tasks",
        Some(&token),
        json!({ "title": "x", "priority": "urgent" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Priority must be low, medium, or high");
}

#[tokio::test]
async fn completed_toggle_is_idempotent() {
    let app = test_app();
    let token = signup_token(&app, "toggle@x.com").await;

    let (_, body) = post(&app, "/api/tasks", Some(&token), json!({ "title": "t" })).await;
    let id = body["task"]["id"].as_str().expect("id").to_string();
    let path = format!("/api/tasks/{id}");

    for _ in 0..2 {
        let (status, body) = request(
            &app,
            Method::PUT,
            &path,
            Some(&token),
            Some(json!({ "completed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["task"]["completed"], true);
    }
}

#[tokio::test]
async fn task_lifecycle_create_update_delete() {
    let app = test_app();
    let token = signup_token(&app, "life@x.com").await;

    let (status, body) = post(
        &app,
        "/api/tasks",
        Some(&token),
        json!({ "title": "Write spec" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["task"]["id"].as_str().expect("id").to_string();
    let path = format!("/api/tasks/{id}");

    let (status, body) = request(
        &app,
        Method::PUT,
        &path,
        Some(&token),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"]["completed"], true);

    let (status, body) = request(&app, Method::DELETE, &path, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted successfully");

    let (_, body) = get(&app, "/api/tasks", Some(&token)).await;
    assert_eq!(body["tasks"].as_array().expect("tasks").len(), 0);
}

#[tokio::test]
async fn foreign_task_mutations_answer_404_never_200() {
    let app = test_app();
    let ann = signup_token(&app, "ann2@x.com").await;
    let bob = signup_token(&app, "bob2@x.com").await;

    let (_, body) = post(&app, "/api/tasks", Some(&ann), json!({ "title": "mine" })).await;
    let id = body["task"]["id"].as_str().expect("id").to_string();
    let path = format!("/api/tasks/{id}");

    let (status, body) = request(
        &app,
        Method::PUT,
        &path,
        Some(&bob),
        Some(json!({ "completed": true })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task not found or access denied");

    let (status, _) = request(&app, Method::DELETE, &path, Some(&bob), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Ann still owns an untouched task.
    let (_, body) = get(&app, "/api/tasks", Some(&ann)).await;
    assert_eq!(body["tasks"][0]["completed"], false);
}

#[tokio::test]
async fn tasks_require_authentication() {
    let app = test_app();
    let (status, _) = get(&app, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = post(&app, "/api/tasks", None, json!({ "title": "t" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// --- moods ---

#[tokio::test]
async fn mood_requires_emoji_or_rating_and_a_sane_rating() {
    let app = test_app();
    let token = signup_token(&app, "mood@x.com").await;

    let (status, body) = post(&app, "/api/moods", Some(&token), json!({ "note": "meh" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Either emoji or rating is required");

    let (status, body) = post(&app, "/api/moods", Some(&token), json!({ "rating": 11 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rating must be between 1 and 10");

    let (status, body) = post(
        &app,
        "/api/moods",
        Some(&token),
        json!({ "emoji": "🙂", "note": "fine" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mood"]["emoji"], "🙂");
    assert!(body["mood"]["date"].is_string());
}

#[tokio::test]
async fn zero_rating_counts_as_no_rating() {
    let app = test_app();
    let token = signup_token(&app, "zero@x.com").await;

    // Alone it does not satisfy the emoji-or-rating requirement.
    let (status, body) = post(&app, "/api/moods", Some(&token), json!({ "rating": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Either emoji or rating is required");

    // With an emoji the entry is stored, minus the rating.
    let (status, body) = post(
        &app,
        "/api/moods",
        Some(&token),
        json!({ "emoji": "🙂", "rating": 0 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["mood"]["rating"].is_null());
}

#[tokio::test]
async fn moods_list_newest_first() {
    let app = test_app();
    let token = signup_token(&app, "moodlist@x.com").await;

    post(&app, "/api/moods", Some(&token), json!({ "rating": 3 })).await;
    post(&app, "/api/moods", Some(&token), json!({ "rating": 9 })).await;

    let (status, body) = get(&app, "/api/moods", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let moods = body["moods"].as_array().expect("moods");
    assert_eq!(moods.len(), 2);
    let first = moods[0]["createdAt"].as_str().expect("createdAt");
    let second = moods[1]["createdAt"].as_str().expect("createdAt");
    assert!(first >= second);
}

#[tokio::test]
async fn mood_stats_average_matches_the_mean_rounded_to_one_decimal() {
    let app = test_app();
    let token = signup_token(&app, "stats@x.com").await;

    let (status, body) = get(&app, "/api/moods/stats", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stats"]["totalMoods"], 0);
    assert_eq!(body["stats"]["averageRating"], 0.0);

    post(&app, "/api/moods", Some(&token), json!({ "rating": 6 })).await;
    post(&app, "/api/moods", Some(&token), json!({ "rating": 7 })).await;
    post(&app, "/api/moods", Some(&token), json!({ "emoji": "🙂" })).await;

    let (_, body) = get(&app, "/api/moods/stats", Some(&token)).await;
    let stats = &body["stats"];
    assert_eq!(stats["totalMoods"], 3);
    assert_eq!(stats["averageRating"], 6.5);
    assert_eq!(stats["recentMoodsCount"], 3);
    let daily = stats["dailyAverages"].as_array().expect("dailyAverages");
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["count"], 3);
    assert_eq!(daily[0]["average"], 6.5);
}

#[tokio::test]
async fn mood_stats_are_per_user() {
    let app = test_app();
    let ann = signup_token(&app, "ann3@x.com").await;
    let bob = signup_token(&app, "bob3@x.com").await;

    post(&app, "/api/moods", Some(&ann), json!({ "rating": 10 })).await;

    let (_, body) = get(&app, "/api/moods/stats", Some(&bob)).await;
    assert_eq!(body["stats"]["totalMoods"], 0);
}

// --- quotes ---

#[tokio::test]
async fn quote_read_is_public_but_create_requires_auth() {
    let app = test_app();

    let (status, body) = get(&app, "/api/quotes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quotes"].as_array().expect("quotes").len(), 0);

    let (status, _) = post(&app, "/api/quotes", None, json!({ "text": "hi" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn random_quote_is_404_when_none_exist() {
    let app = test_app();
    let (status, body) = get(&app, "/api/quotes/random", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No quotes available");

    let token = signup_token(&app, "q@x.com").await;
    post(&app, "/api/quotes", Some(&token), json!({ "text": "onward" })).await;

    let (status, body) = get(&app, "/api/quotes/random", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quote"]["text"], "onward");
}

#[tokio::test]
async fn quote_length_boundary_is_exactly_500_chars() {
    let app = test_app();
    let token = signup_token(&app, "long@x.com").await;

    let exactly = "x".repeat(500);
    let (status, _) = post(&app, "/api/quotes", Some(&token), json!({ "text": exactly })).await;
    assert_eq!(status, StatusCode::CREATED);

    let too_long = "x".repeat(501);
    let (status, body) = post(&app, "/api/quotes", Some(&token), json!({ "text": too_long })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Quote text must be less than 500 characters");
}

#[tokio::test]
async fn quote_records_its_submitter_and_defaults_the_author() {
    let app = test_app();
    let token = signup_token(&app, "sub@x.com").await;

    let (status, body) = post(
        &app,
        "/api/quotes",
        Some(&token),
        json!({ "text": "  breathe  " }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let quote = &body["quote"];
    assert_eq!(quote["text"], "breathe");
    assert_eq!(quote["author"], "Anonymous");
    assert_eq!(quote["submittedByName"], "Test User");
    assert!(quote["submittedBy"].is_string());
}

// --- error rendering ---

fn corrupt_file_store(dir: &tempfile::TempDir) -> Arc<dyn Store> {
    let path = dir.path().join("data.json");
    std::fs::write(&path, b"{ not json").expect("write garbage");
    Arc::new(JsonFileStore::new(path))
}

#[tokio::test]
async fn production_500_bodies_are_sanitized() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_with_store("production", corrupt_file_store(&dir));

    let (status, body) = get(&app, "/api/quotes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Server error" }));
}

#[tokio::test]
async fn development_500_bodies_keep_the_detail() {
    let dir = tempfile::tempdir().expect("tempdir");
    let app = app_with_store("development", corrupt_file_store(&dir));

    let (status, body) = get(&app, "/api/quotes", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["message"].as_str().expect("message");
    assert!(message.contains("not valid JSON"));
}

// --- health ---

#[tokio::test]
async fn health_probes_answer() {
    let app = test_app();

    let (status, body) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (status, body) = get(&app, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().expect("message").contains("running"));
}
