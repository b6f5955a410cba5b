// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin API tests: form redirects, JSON errors, method override.

use axum::http::StatusCode;
use oneamlog::models::{PostStatus, TagDraft};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_create_post_from_form() {
    let (app, state, _) = common::create_test_app();
    let tag = state
        .db
        .create_tag(&TagDraft {
            name: "Rust".to_string(),
            slug: "rust".to_string(),
        })
        .await
        .unwrap();

    let body = format!(
        "title=Hello&slug=hello-world&content=Body+text&status=published&tags={}",
        tag.id
    );
    let response = app
        .oneshot(common::form_post("/api/posts", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/admin");

    let posts = state.db.list_all_posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.slug, "hello-world");
    assert_eq!(post.status, PostStatus::Published);
    assert!(post.published_at.is_some());
    assert_eq!(post.author_id.as_deref(), Some(common::admin().id.as_str()));
    assert!(post.has_tag("rust"));
}

#[tokio::test]
async fn test_create_post_generates_missing_slug() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .oneshot(common::form_post("/api/posts", "title=Hello&content=Body"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let posts = state.db.list_all_posts().await.unwrap();
    let (stamp, suffix) = posts[0].slug.split_once('-').unwrap();
    assert!(!stamp.is_empty());
    assert_eq!(suffix.len(), 6);
    assert_eq!(posts[0].status, PostStatus::Draft);
}

#[tokio::test]
async fn test_create_post_validation_redirects_back() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .oneshot(common::form_post("/api/posts", "slug=Bad+Slug"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        common::location(&response),
        "/admin/posts/new?error=Title%20is%20required%2C%20Slug%20must%20contain%20only%20lowercase%20letters%2C%20numbers%2C%20and%20hyphens%2C%20Content%20is%20required"
    );
    assert!(state.db.list_all_posts().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_post_via_method_override_keeps_published_at() {
    let (app, state, _) = common::create_test_app();

    app.clone()
        .oneshot(common::form_post(
            "/api/posts",
            "title=First&slug=first&content=Body&status=published",
        ))
        .await
        .unwrap();
    let original = state.db.list_all_posts().await.unwrap().remove(0);

    let response = app
        .oneshot(common::form_post(
            &format!("/api/posts/{}", original.id),
            "_method=PUT&title=Renamed&slug=first&content=Body&status=published",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/admin");

    let updated = state.db.get_post(&original.id).await.unwrap().unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.published_at, original.published_at);
}

#[tokio::test]
async fn test_update_post_validation_redirects_to_editor() {
    let (app, state, _) = common::create_test_app();

    app.clone()
        .oneshot(common::form_post(
            "/api/posts",
            "title=First&slug=first&content=Body",
        ))
        .await
        .unwrap();
    let post = state.db.list_all_posts().await.unwrap().remove(0);

    let response = app
        .oneshot(common::form_post(
            &format!("/api/posts/{}", post.id),
            "_method=PUT&title=First&slug=first&content=Body&status=archived",
        ))
        .await
        .unwrap();

    assert_eq!(
        common::location(&response),
        format!(
            "/admin/posts/{}/edit?error=Status%20must%20be%20either%20%22draft%22%20or%20%22published%22",
            post.id
        )
    );
}

#[tokio::test]
async fn test_delete_post_from_script() {
    let (app, state, _) = common::create_test_app();

    app.clone()
        .oneshot(common::form_post(
            "/api/posts",
            "title=First&slug=first&content=Body",
        ))
        .await
        .unwrap();
    let post = state.db.list_all_posts().await.unwrap().remove(0);

    let response = app
        .oneshot(
            common::authed("DELETE", &format!("/api/posts/{}", post.id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, json!({ "success": true }));
    assert!(state.db.get_post(&post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_tag_slug_must_be_unique() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::form_post("/api/tags", "name=Rust&slug=rust"))
        .await
        .unwrap();
    assert_eq!(
        common::location(&response),
        "/admin/tags?success=Tag%20created"
    );

    let response = app
        .oneshot(common::form_post("/api/tags", "name=Rust+again&slug=rust"))
        .await
        .unwrap();
    assert_eq!(
        common::location(&response),
        "/admin/tags?error=This%20slug%20is%20already%20in%20use"
    );
    assert_eq!(state.db.list_tags().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_tag_delete_requires_method_override() {
    let (app, state, _) = common::create_test_app();
    let tag = state
        .db
        .create_tag(&TagDraft {
            name: "Rust".to_string(),
            slug: "rust".to_string(),
        })
        .await
        .unwrap();
    let uri = format!("/api/tags/{}", tag.id);

    let response = app
        .clone()
        .oneshot(common::form_post(&uri, "name=ignored"))
        .await
        .unwrap();
    assert_eq!(
        common::location(&response),
        "/admin/tags?error=Invalid%20request"
    );
    assert_eq!(state.db.list_tags().await.unwrap().len(), 1);

    let response = app
        .oneshot(common::form_post(&uri, "_method=DELETE"))
        .await
        .unwrap();
    assert_eq!(
        common::location(&response),
        "/admin/tags?success=Tag%20deleted"
    );
    assert!(state.db.list_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_mark_contact_read() {
    let (app, state, _) = common::create_test_app();
    let contact = state
        .db
        .create_contact(&oneamlog::models::ContactDraft {
            name: "Taro".to_string(),
            email: "taro@example.com".to_string(),
            message: "Hi".to_string(),
        })
        .await
        .unwrap();

    let response = app
        .oneshot(common::form_post(
            &format!("/api/contacts/{}/read", contact.id),
            "_method=PATCH",
        ))
        .await
        .unwrap();

    assert_eq!(
        common::location(&response),
        "/admin/contacts?success=Marked%20as%20read"
    );
    let contacts = state.db.list_contacts().await.unwrap();
    assert!(contacts[0].is_read);
}

#[tokio::test]
async fn test_create_time_json() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/times",
            json!({ "content": "  Shipped it  ", "image_url": null }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["content"], "Shipped it");
    assert_eq!(state.db.list_times().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_time_too_long_is_400() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/times",
            json!({ "content": "x".repeat(281) }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        common::body_json(response).await,
        json!({ "error": "Content must be 280 characters or less" })
    );
    assert!(state.db.list_times().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_time() {
    let (app, state, _) = common::create_test_app();
    let entry = state
        .db
        .create_time(&oneamlog::models::TimeDraft {
            content: "hello".to_string(),
            image_url: None,
        })
        .await
        .unwrap();

    let response = app
        .oneshot(
            common::authed("DELETE", &format!("/api/times/{}", entry.id))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.db.list_times().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_work_lifecycle() {
    let (app, state, _) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/works",
            json!({
                "title": "Portfolio",
                "slug": "portfolio",
                "description": "This site",
                "languages": "Rust, TypeScript, ,",
                "display_order": "2",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["languages"], json!(["Rust", "TypeScript"]));
    assert_eq!(body["data"]["display_order"], 2);

    // Duplicate slug
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/works",
            json!({ "title": "Other", "slug": "portfolio", "description": "x" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Update keeps its own slug
    let response = app
        .clone()
        .oneshot(common::json_request(
            "PUT",
            &format!("/api/works/{id}"),
            json!({ "title": "Portfolio v2", "slug": "portfolio", "description": "This site" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let work = state.db.get_work(&id).await.unwrap().unwrap();
    assert_eq!(work.title, "Portfolio v2");
    assert_eq!(work.display_order, 0);

    let response = app
        .oneshot(
            common::authed("DELETE", &format!("/api/works/{id}"))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.db.get_work(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_missing_work_is_404() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "PUT",
            "/api/works/does-not-exist",
            json!({ "title": "T", "slug": "t", "description": "d" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        common::body_json(response).await,
        json!({ "error": "Work not found" })
    );
}

#[tokio::test]
async fn test_work_validation_is_400_json() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/works",
            json!({ "title": "T", "slug": "Not A Slug" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("Slug must contain only lowercase letters, numbers, and hyphens"));
    assert!(error.contains("Description is required"));
}
