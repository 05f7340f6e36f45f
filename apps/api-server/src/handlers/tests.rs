use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{TimeDelta, Utc};
use serde_json::{Value, json};

use postdesk_core::domain::{Author, AuthorId, Post, PostStatus};
use postdesk_core::ports::TokenService;
use postdesk_infra::{JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

fn token_service() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        expiration_hours: 1,
        issuer: "postdesk-test".to_string(),
    }))
}

fn bearer(roles: &[&str]) -> (&'static str, String) {
    let token = token_service()
        .generate_token("tester", roles.iter().map(|r| r.to_string()).collect())
        .unwrap();
    ("Authorization", format!("Bearer {}", token))
}

macro_rules! test_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::Data::new(token_service()))
                .configure(configure_routes),
        )
        .await
    };
}

/// In-memory state holding one author (id 1).
async fn seeded_state() -> AppState {
    let state = AppState::in_memory();
    state.authors.save(Author::new("Ada")).await.unwrap();
    state
}

async fn seed_post(state: &AppState, status: PostStatus) -> Post {
    state
        .posts
        .save(Post::new("Seeded", "Seeded content", status, AuthorId(1)))
        .await
        .unwrap()
}

fn post_body() -> Value {
    json!({
        "title": "Hello",
        "content": "World",
        "status": "published",
        "author": 1
    })
}

fn violation_paths(body: &Value) -> Vec<String> {
    body["violations"]
        .as_array()
        .map(|vs| {
            vs.iter()
                .filter_map(|v| v["propertyPath"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[actix_web::test]
async fn test_health_check() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}

#[actix_web::test]
async fn test_create_requires_token() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(post_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_without_admin_role_is_forbidden_before_validation() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["user"]))
        .set_json(json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let page = state
        .posts
        .find_page(&Default::default(), 1, 5)
        .await
        .unwrap();
    assert_eq!(page.total_items, 0);
}

#[actix_web::test]
async fn test_admin_creates_post_and_gets_id() {
    let state = seeded_state().await;
    let app = test_app!(state);
    let before = Utc::now();

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .set_json(post_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "published");
    assert!(body.get("content").is_none());

    let published_at: chrono::DateTime<Utc> =
        serde_json::from_value(body["publishedAt"].clone()).unwrap();
    assert!(published_at >= before);
}

#[actix_web::test]
async fn test_create_rejects_long_title() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let mut body = post_body();
    body["title"] = json!("x".repeat(129));
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(violation_paths(&body), vec!["title"]);
    assert_eq!(
        body["violations"][0]["message"],
        "The title of the post must be less than 128 characters"
    );
}

#[actix_web::test]
async fn test_create_accepts_title_of_exactly_128_chars() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let mut body = post_body();
    body["title"] = json!("x".repeat(128));
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_create_rejects_unknown_status() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let mut body = post_body();
    body["status"] = json!("archived");
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(violation_paths(&body), vec!["status"]);
}

#[actix_web::test]
async fn test_create_rejects_null_and_unknown_author() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let mut body = post_body();
    body["author"] = Value::Null;
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["violations"][0]["message"], "The author cannot be null");

    let mut body = post_body();
    body["author"] = json!(42);
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(violation_paths(&body), vec!["author"]);
}

#[actix_web::test]
async fn test_create_rejects_published_at_in_the_past() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let mut body = post_body();
    body["publishedAt"] = json!(Utc::now() - TimeDelta::days(2));
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(violation_paths(&body), vec!["publishedAt"]);
}

#[actix_web::test]
async fn test_malformed_json_is_bad_request() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&["admin"]))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_collection_is_paginated_by_five() {
    let state = seeded_state().await;
    for _ in 0..7 {
        seed_post(&state, PostStatus::Draft).await;
    }
    for _ in 0..4 {
        seed_post(&state, PostStatus::Published).await;
    }
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["itemsPerPage"], 5);
    assert_eq!(body["totalItems"], 11);
    assert_eq!(body["totalPages"], 3);
    assert!(body["items"][0].get("content").is_none());

    let req = test::TestRequest::get().uri("/api/posts?page=3").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_collection_filters_on_status() {
    let state = seeded_state().await;
    for _ in 0..7 {
        seed_post(&state, PostStatus::Draft).await;
    }
    for _ in 0..3 {
        seed_post(&state, PostStatus::Deleted).await;
    }
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/posts?status=draft&page=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|p| p["status"] == "draft"));
    assert_eq!(body["totalItems"], 7);

    let req = test::TestRequest::get()
        .uri("/api/posts?status=archived")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["totalItems"], 0);
}

#[actix_web::test]
async fn test_collection_rejects_page_zero() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/posts?page=0").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_item_fetch_includes_content() {
    let state = seeded_state().await;
    let post = seed_post(&state, PostStatus::Draft).await;
    let app = test_app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/api/posts/{}", post.id().unwrap()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["content"], "Seeded content");
    assert_eq!(body["author"], 1);
}

#[actix_web::test]
async fn test_item_fetch_missing_is_not_found() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/posts/404").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_to_deleted_clears_published_at() {
    let state = seeded_state().await;
    let post = seed_post(&state, PostStatus::Published).await;
    let id = post.id().unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", id))
        .set_json(json!({ "status": "deleted" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "deleted");
    assert_eq!(body["publishedAt"], Value::Null);
    assert_eq!(body["title"], "Seeded");

    let stored = state.posts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.content(), "Seeded content");
    assert_eq!(stored.published_at(), None);
}

#[actix_web::test]
async fn test_update_keeps_draft_timestamp() {
    let state = seeded_state().await;
    let post = seed_post(&state, PostStatus::Draft).await;
    let id = post.id().unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", id))
        .set_json(json!({ "title": "Edited" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let stored = state.posts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.title(), "Edited");
    assert_eq!(stored.published_at(), post.published_at());
}

#[actix_web::test]
async fn test_update_rejects_invalid_merge() {
    let state = seeded_state().await;
    let post = seed_post(&state, PostStatus::Draft).await;
    let id = post.id().unwrap();
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", id))
        .set_json(json!({ "content": " ", "status": "archived" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(violation_paths(&body), vec!["content", "status"]);

    let stored = state.posts.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored, post);
}

#[actix_web::test]
async fn test_update_missing_post_is_not_found() {
    let state = seeded_state().await;
    let app = test_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/posts/77")
        .set_json(post_body())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_removes_post() {
    let state = seeded_state().await;
    let post = seed_post(&state, PostStatus::Draft).await;
    let uri = format!("/api/posts/{}", post.id().unwrap());
    let app = test_app!(state);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_author_create_and_fetch() {
    let state = AppState::in_memory();
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/authors")
        .insert_header(bearer(&["admin"]))
        .set_json(json!({ "name": "Grace" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/authors/{}", created["id"]))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["name"], "Grace");
}
