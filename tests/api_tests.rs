//! API integration tests driving the full router against an in-memory database

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use bookshelf_server::{api, repository::Repository, services::Services, AppState};

const FORM: &str = "application/x-www-form-urlencoded";

/// Helper to build an application over a fresh in-memory database
async fn test_app() -> Router {
    let repository = Repository::in_memory()
        .await
        .expect("Failed to open in-memory database");

    api::router(AppState {
        services: Arc::new(Services::new(repository)),
    })
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, FORM)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn book_ids(app: &Router) -> Vec<(i64, String)> {
    let (status, _, body) = get(app, "/api/v1/books").await;
    assert_eq!(status, StatusCode::OK);
    let books: Value = serde_json::from_str(&body).expect("Failed to parse response");
    books
        .as_array()
        .expect("Expected an array")
        .iter()
        .map(|b| {
            (
                b["id"].as_i64().expect("No book ID"),
                b["title"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_empty_library_page() {
    let app = test_app().await;

    let (status, _, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No books in the library yet."));
}

#[tokio::test]
async fn test_add_form_page() {
    let app = test_app().await;

    let (status, _, body) = get(&app, "/add").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"book_name\""));
    assert!(body.contains("name=\"book_author\""));
    assert!(body.contains("name=\"book_rating\""));
}

#[tokio::test]
async fn test_add_book_then_list() {
    let app = test_app().await;

    let (status, location, _) = post_form(
        &app,
        "/add",
        "book_name=Dune&book_author=Frank+Herbert&book_rating=4.8",
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let (status, _, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Dune"));
    assert!(body.contains("Frank Herbert"));
    assert!(body.contains("4.8"));
}

#[tokio::test]
async fn test_delete_book_removes_it_from_list() {
    let app = test_app().await;
    post_form(
        &app,
        "/add",
        "book_name=Dune&book_author=Frank+Herbert&book_rating=4.8",
    )
    .await;
    let (id, _) = book_ids(&app).await[0].clone();

    let (status, location, _) = post_form(&app, &format!("/delete/{}", id), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let (_, _, body) = get(&app, "/").await;
    assert!(!body.contains("Dune"));
}

#[tokio::test]
async fn test_delete_requires_post() {
    let app = test_app().await;
    post_form(&app, "/add", "book_name=Emma&book_author=Jane+Austen&book_rating=3").await;
    let (id, _) = book_ids(&app).await[0].clone();

    let (status, _, _) = get(&app, &format!("/delete/{}", id)).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(book_ids(&app).await.len(), 1);
}

#[tokio::test]
async fn test_delete_missing_book_is_not_found() {
    let app = test_app().await;

    let (status, _, body) = post_form(&app, "/delete/404", "").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Book 404 not found"));
}

#[tokio::test]
async fn test_edit_rating() {
    let app = test_app().await;
    post_form(&app, "/add", "book_name=Emma&book_author=Jane+Austen&book_rating=3.5").await;
    let (id, _) = book_ids(&app).await[0].clone();

    let (status, _, body) = get(&app, &format!("/edit/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"3.5\""));

    let (status, location, _) = post_form(&app, &format!("/edit/{}", id), "new_rating=9.5").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));

    let (_, _, body) = get(&app, &format!("/api/v1/books/{}", id)).await;
    let book: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(book["rating"], 9.5);
    assert_eq!(book["title"], "Emma");
    assert_eq!(book["author"], "Jane Austen");
}

#[tokio::test]
async fn test_edit_missing_book_does_not_crash() {
    let app = test_app().await;

    let (status, _, body) = get(&app, "/edit/12345").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404 Not Found"));

    let (status, _, _) = post_form(&app, "/edit/12345", "new_rating=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Still serving
    let (status, _, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_non_numeric_rating_is_rejected() {
    let app = test_app().await;

    let (status, _, body) = post_form(
        &app,
        "/add",
        "book_name=Dune&book_author=Frank+Herbert&book_rating=excellent",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("book_rating"));
    assert!(book_ids(&app).await.is_empty());
}

#[tokio::test]
async fn test_missing_form_field_is_bad_request() {
    let app = test_app().await;

    let (status, _, _) = post_form(&app, "/add", "book_name=Dune").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(book_ids(&app).await.is_empty());
}

#[tokio::test]
async fn test_duplicate_title_is_conflict() {
    let app = test_app().await;
    post_form(&app, "/add", "book_name=Dune&book_author=Frank+Herbert&book_rating=4.8").await;

    let (status, _, body) = post_form(
        &app,
        "/add",
        "book_name=Dune&book_author=Someone+Else&book_rating=1",
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body.contains("already exists"));
    let books = book_ids(&app).await;
    assert_eq!(books.iter().filter(|(_, title)| title == "Dune").count(), 1);
}

#[tokio::test]
async fn test_api_get_missing_book() {
    let app = test_app().await;

    let (status, _, body) = get(&app, "/api/v1/books/8").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], "NoSuchBook");
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = test_app().await;

    let (status, _, body) = get(&app, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");

    let (status, _, body) = get(&app, "/api/v1/ready").await;
    assert_eq!(status, StatusCode::OK);
    let ready: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(ready["status"], "ready");
}

#[tokio::test]
async fn test_unparsable_book_id_renders_error_page() {
    let app = test_app().await;

    for uri in ["/edit/99999999999999999999", "/edit/dune"] {
        let (status, _, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("400 Bad Request"));
        assert!(body.contains("<html"));
    }

    let (status, _, body) = post_form(&app, "/delete/not-a-number", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("<html"));
}
