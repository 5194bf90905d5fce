//! End-to-end API tests against the full router and an in-memory database.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use bookstall_auth::{TokenConfig, TokenService};
use bookstall_db::{open_db_in_memory, Store};
use bookstall_kernel::settings::Settings;
use bookstall_kernel::{AppState, ModuleRegistry};

fn test_app() -> Router {
    let store = Store::new(open_db_in_memory().unwrap());
    let tokens = TokenService::new(&TokenConfig {
        secret: "test_secret_key_for_testing_only".to_string(),
        ..TokenConfig::default()
    })
    .unwrap();

    let mut registry = ModuleRegistry::new();
    bookstall_app::modules::register_all(&mut registry);

    let state = AppState { store, tokens };
    bookstall_http::build_router(&registry, state, &Settings::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register_seller(app: &Router, e_mail: &str, password: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/saller/",
        Some(json!({
            "first_name": "Ivan",
            "last_name": "Ivanov",
            "e_mail": e_mail,
            "password": password
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

async fn login(app: &Router, e_mail: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        &format!("/saller/token?e_mail={e_mail}&password={password}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    body["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_check_responds() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn full_catalog_scenario() {
    let app = test_app();

    let seller_id = register_seller(&app, "email@x.com", "pw").await;
    assert_eq!(seller_id, 1);

    let token = login(&app, "email@x.com", "pw").await;
    assert!(!token.is_empty());

    let (status, created) = send(
        &app,
        "POST",
        &format!("/books/?token={token}"),
        Some(json!({
            "title": "Wrong Code",
            "author": "Robert Martin",
            "year": 2007,
            "count_pages": 104,
            "saller_id": seller_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["title"], "Wrong Code");
    assert_eq!(created["author"], "Robert Martin");
    assert_eq!(created["year"], 2007);
    assert_eq!(created["count_pages"], 104);
    assert_eq!(created["saller_id"], seller_id);
    assert!(created["id"].as_i64().is_some());

    let (status, listing) = send(&app, "GET", "/books/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["books"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/saller/{seller_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, listing) = send(&app, "GET", "/books/", None).await;
    assert!(listing["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn book_with_ancient_year_is_rejected() {
    let app = test_app();
    let seller_id = register_seller(&app, "email@x.com", "pw").await;
    let token = login(&app, "email@x.com", "pw").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/books/?token={token}"),
        Some(json!({
            "title": "Old",
            "author": "Ancient",
            "year": 1850,
            "count_pages": 10,
            "saller_id": seller_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    // Nothing was persisted.
    let (_, listing) = send(&app, "GET", "/books/", None).await;
    assert!(listing["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn creating_book_for_another_seller_is_forbidden() {
    let app = test_app();
    let owner = register_seller(&app, "owner@x.com", "pw").await;
    register_seller(&app, "intruder@x.com", "pw2").await;
    let intruder_token = login(&app, "intruder@x.com", "pw2").await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/books/?token={intruder_token}"),
        Some(json!({
            "title": "Stolen",
            "author": "Nobody",
            "year": 2000,
            "count_pages": 1,
            "saller_id": owner
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "forbidden");

    let (_, listing) = send(&app, "GET", "/books/", None).await;
    assert!(listing["books"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn updating_anothers_book_is_forbidden_and_leaves_it_unchanged() {
    let app = test_app();
    let owner = register_seller(&app, "owner@x.com", "pw").await;
    register_seller(&app, "intruder@x.com", "pw2").await;
    let owner_token = login(&app, "owner@x.com", "pw").await;
    let intruder_token = login(&app, "intruder@x.com", "pw2").await;

    let (_, created) = send(
        &app,
        "POST",
        &format!("/books/?token={owner_token}"),
        Some(json!({
            "title": "Mine",
            "author": "Owner",
            "year": 2001,
            "count_pages": 50,
            "saller_id": owner
        })),
    )
    .await;
    let book_id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/books/{book_id}?token={intruder_token}"),
        Some(json!({
            "title": "Hijacked",
            "author": "Intruder",
            "year": 2020,
            "count_pages": 1,
            "saller_id": owner
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, book) = send(&app, "GET", &format!("/books/{book_id}"), None).await;
    assert_eq!(book["title"], "Mine");
    assert_eq!(book["year"], 2001);
}

#[tokio::test]
async fn update_preserves_owner_even_when_payload_reassigns() {
    let app = test_app();
    let owner = register_seller(&app, "owner@x.com", "pw").await;
    let other = register_seller(&app, "other@x.com", "pw2").await;
    let owner_token = login(&app, "owner@x.com", "pw").await;

    let (_, created) = send(
        &app,
        "POST",
        &format!("/books/?token={owner_token}"),
        Some(json!({
            "title": "Mine",
            "author": "Owner",
            "year": 2001,
            "count_pages": 50,
            "saller_id": owner
        })),
    )
    .await;
    let book_id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/books/{book_id}?token={owner_token}"),
        Some(json!({
            "title": "Still Mine",
            "author": "Owner",
            "year": 2002,
            "count_pages": 60,
            "saller_id": other
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Still Mine");
    assert_eq!(updated["saller_id"], owner);
}

#[tokio::test]
async fn updating_missing_book_returns_not_found() {
    let app = test_app();
    register_seller(&app, "owner@x.com", "pw").await;
    let token = login(&app, "owner@x.com", "pw").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/999?token={token}"),
        Some(json!({
            "title": "Ghost",
            "author": "Nobody",
            "year": 2000,
            "count_pages": 1,
            "saller_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn update_of_missing_book_reports_not_found_before_validation() {
    let app = test_app();
    register_seller(&app, "owner@x.com", "pw").await;
    let token = login(&app, "owner@x.com", "pw").await;

    // Existence is settled first, so an invalid year on an absent id is 404.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/999?token={token}"),
        Some(json!({
            "title": "Ghost",
            "author": "Nobody",
            "year": 1850,
            "count_pages": 1,
            "saller_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn update_with_ancient_year_is_rejected_and_book_unchanged() {
    let app = test_app();
    let owner = register_seller(&app, "owner@x.com", "pw").await;
    let token = login(&app, "owner@x.com", "pw").await;

    let (_, created) = send(
        &app,
        "POST",
        &format!("/books/?token={token}"),
        Some(json!({
            "title": "Mine",
            "author": "Owner",
            "year": 2001,
            "count_pages": 50,
            "saller_id": owner
        })),
    )
    .await;
    let book_id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/books/{book_id}?token={token}"),
        Some(json!({
            "title": "Backdated",
            "author": "Owner",
            "year": 1850,
            "count_pages": 50,
            "saller_id": owner
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "validation_error");

    let (_, book) = send(&app, "GET", &format!("/books/{book_id}"), None).await;
    assert_eq!(book["title"], "Mine");
    assert_eq!(book["year"], 2001);
}

#[tokio::test]
async fn deleting_missing_book_is_idempotent() {
    let app = test_app();
    let (status, _) = send(&app, "DELETE", "/books/424242", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn missing_book_reads_as_null() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/books/5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let app = test_app();
    register_seller(&app, "email@x.com", "pw").await;

    let (status, body) = send(
        &app,
        "POST",
        "/saller/token?e_mail=email@x.com&password=wrong",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "unauthorized");

    let (status, _) = send(
        &app,
        "POST",
        "/saller/token?e_mail=unknown@x.com&password=pw",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutating_books_with_garbage_token_is_rejected() {
    let app = test_app();
    let seller_id = register_seller(&app, "email@x.com", "pw").await;

    let (status, body) = send(
        &app,
        "POST",
        "/books/?token=not.a.token",
        Some(json!({
            "title": "t",
            "author": "a",
            "year": 2000,
            "count_pages": 1,
            "saller_id": seller_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "invalid_token");
}

#[tokio::test]
async fn seller_detail_requires_matching_identity() {
    let app = test_app();
    let first = register_seller(&app, "first@x.com", "pw").await;
    let second = register_seller(&app, "second@x.com", "pw2").await;
    let first_token = login(&app, "first@x.com", "pw").await;

    let (status, _) = send(
        &app,
        "GET",
        &format!("/saller/{second}?token={first_token}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, created) = send(
        &app,
        "POST",
        &format!("/books/?token={first_token}"),
        Some(json!({
            "title": "Owned",
            "author": "Me",
            "year": 2010,
            "count_pages": 42,
            "saller_id": first
        })),
    )
    .await;
    assert!(created["id"].as_i64().is_some());

    let (status, detail) = send(
        &app,
        "GET",
        &format!("/saller/{first}?token={first_token}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["id"], first);
    assert_eq!(detail["e_mail"], "first@x.com");
    assert_eq!(detail["books"].as_array().unwrap().len(), 1);
    assert!(detail.get("password").is_none());
}

#[tokio::test]
async fn seller_listing_and_profile_update() {
    let app = test_app();
    let id = register_seller(&app, "email@x.com", "pw").await;

    let (status, listing) = send(&app, "GET", "/saller/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["sallers"].as_array().unwrap().len(), 1);

    // Profile update needs no token (documented asymmetry).
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/saller/{id}"),
        Some(json!({
            "first_name": "Petr",
            "last_name": "Petrov",
            "e_mail": "petr@x.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["first_name"], "Petr");
    assert_eq!(updated["e_mail"], "petr@x.com");

    let (status, _) = send(
        &app,
        "PUT",
        "/saller/999",
        Some(json!({
            "first_name": "x",
            "last_name": "y",
            "e_mail": "z@x.com"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Login still works after the profile update with the new e_mail.
    let token = login(&app, "petr@x.com", "pw").await;
    assert!(!token.is_empty());
}
