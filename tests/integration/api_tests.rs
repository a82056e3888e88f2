//! Catalog integration tests
//!
//! These exercise a running server against a real database.

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:8080";

/// Client that surfaces redirects instead of following them
fn raw_client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_root_redirects_to_catalog() {
    let response = raw_client()
        .get(BASE_URL)
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()["location"], "/catalog");
}

#[tokio::test]
#[ignore]
async fn test_index_page_renders() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Local Library Home"));
}

#[tokio::test]
#[ignore]
async fn test_list_pages_render() {
    let client = Client::new();

    for path in ["/catalog/books", "/catalog/authors", "/catalog/genres", "/catalog/bookinstances"] {
        let response = client
            .get(format!("{}{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success(), "GET {} failed", path);
    }
}

#[tokio::test]
#[ignore]
async fn test_create_genre_redirects_to_detail() {
    let name = format!("Test Genre {}", uuid::Uuid::new_v4());

    let response = raw_client()
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_redirection());
    let location = response.headers()["location"]
        .to_str()
        .expect("Bad location header");
    assert!(location.starts_with("/catalog/genre/"));
}

#[tokio::test]
#[ignore]
async fn test_create_genre_too_short_rerenders_form() {
    let client = Client::new();

    let response = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", "ab")])
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Genre name must be between 3 and 100 characters"));
}

#[tokio::test]
#[ignore]
async fn test_unknown_record_is_not_found() {
    let client = Client::new();

    let response = client
        .get(format!(
            "{}/catalog/book/{}",
            BASE_URL,
            uuid::Uuid::new_v4()
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_malformed_id_is_bad_request() {
    let client = Client::new();

    let response = client
        .get(format!("{}/catalog/author/not-an-id", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
