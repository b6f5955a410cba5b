// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public pages and the contact form.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use oneamlog::models::{PostDraft, PostStatus, TagDraft};
use tower::ServiceExt;

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn contact_submission(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn published(title: &str, slug: &str) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        slug: slug.to_string(),
        content: "Body".to_string(),
        excerpt: None,
        status: PostStatus::Published,
        published_at: Some("2026-03-01T00:00:00.000Z".to_string()),
    }
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = common::create_test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_security_headers_on_pages() {
    let (app, _, _) = common::create_test_app();

    let response = app.oneshot(get("/about")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_contact_submission_redirects() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .oneshot(contact_submission(
            "name=Taro&email=Taro%40Example.com&message=Hello+there",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/contact?success=true");

    let contacts = state.db.list_contacts().await.unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].email, "taro@example.com");
    assert!(!contacts[0].is_read);
}

#[tokio::test]
async fn test_contact_validation_rerenders_form() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .oneshot(contact_submission("name=Taro&email=not-an-email&message="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = common::body_text(response).await;
    assert!(html.contains("Email must be valid, Message is required"), "{html}");
    assert!(state.db.list_contacts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_contact_success_banner() {
    let (app, _, _) = common::create_test_app();

    let response = app.oneshot(get("/contact?success=true")).await.unwrap();

    let html = common::body_text(response).await;
    assert!(html.contains("Your message has been sent"));
}

#[tokio::test]
async fn test_unknown_post_is_404() {
    let (app, _, _) = common::create_test_app();

    let response = app.oneshot(get("/blog/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_draft_is_not_public() {
    let (app, state, _) = common::create_test_app();
    let mut draft = published("Secret", "secret");
    draft.status = PostStatus::Draft;
    draft.published_at = None;
    state.db.create_post(&draft, "author").await.unwrap();

    let response = app.oneshot(get("/blog/secret")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_page_counts_views() {
    let (app, state, _) = common::create_test_app();
    let post = state
        .db
        .create_post(&published("Hello <World>", "hello"), "author")
        .await
        .unwrap();

    let response = app.oneshot(get("/blog/hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = common::body_text(response).await;
    assert!(html.contains("World"));
    assert!(!html.contains("Hello <World>"));

    let stored = state.db.get_post(&post.id).await.unwrap().unwrap();
    assert_eq!(stored.view_count, 1);
}

#[tokio::test]
async fn test_blog_tag_filter() {
    let (app, state, _) = common::create_test_app();
    let rust = state
        .db
        .create_tag(&TagDraft {
            name: "Rust".to_string(),
            slug: "rust".to_string(),
        })
        .await
        .unwrap();
    let tagged = state
        .db
        .create_post(&published("Tagged post", "tagged"), "author")
        .await
        .unwrap();
    state
        .db
        .create_post(&published("Plain post", "plain"), "author")
        .await
        .unwrap();
    state
        .db
        .set_post_tags(&tagged.id, &[rust.id.as_str()])
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/blog?tag=rust")).await.unwrap();
    let html = common::body_text(response).await;
    assert!(html.contains("Tagged post"));
    assert!(!html.contains("Plain post"));

    let response = app.oneshot(get("/blog")).await.unwrap();
    let html = common::body_text(response).await;
    assert!(html.contains("Tagged post"));
    assert!(html.contains("Plain post"));
}
