// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public site pages.

use crate::error::{AppError, Result};
use crate::models::Post;
use crate::routes::payload::Payload;
use crate::validation::normalize_contact;
use crate::views::{
    render, AboutTemplate, BlogListTemplate, BlogPostTemplate, ContactTemplate, HomeTemplate,
    TimesTemplate, WorkDetailTemplate, WorkListTemplate, HOME_POST_COUNT,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

const CONTACT_FAILURE: &str = "Failed to send your message. Please try again.";

/// Create public page routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/blog", get(blog_list))
        .route("/blog/{slug}", get(blog_post))
        .route("/work", get(work_list))
        .route("/work/{slug}", get(work_detail))
        .route("/times", get(times))
        .route("/contact", get(contact_page).post(submit_contact))
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let mut posts = state.db.list_published_posts().await?;
    posts.truncate(HOME_POST_COUNT);
    render(&HomeTemplate { posts: &posts })
}

async fn about() -> Result<Html<String>> {
    render(&AboutTemplate)
}

#[derive(Debug, Deserialize)]
struct BlogQuery {
    tag: Option<String>,
}

/// Published posts, optionally filtered by tag slug.
async fn blog_list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BlogQuery>,
) -> Result<Html<String>> {
    let current_tag = params
        .tag
        .as_deref()
        .map(str::trim)
        .filter(|tag| !tag.is_empty());

    let (posts, tags) = tokio::try_join!(state.db.list_published_posts(), state.db.list_tags())?;
    let posts: Vec<Post> = match current_tag {
        Some(tag) => posts.into_iter().filter(|post| post.has_tag(tag)).collect(),
        None => posts,
    };

    render(&BlogListTemplate::new(&posts, &tags, current_tag))
}

async fn blog_post(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>> {
    let post = state
        .db
        .get_published_post_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    // A lost view is not worth failing the page over.
    if let Err(err) = state.db.increment_view_count(&post).await {
        tracing::warn!(post_id = %post.id, error = %err, "Failed to increment view count");
    }

    render(&BlogPostTemplate { post: &post })
}

async fn work_list(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let works = state.db.list_works().await?;
    render(&WorkListTemplate { works: &works })
}

async fn work_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>> {
    let work = state
        .db
        .get_work_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Work not found".to_string()))?;

    render(&WorkDetailTemplate { work: &work })
}

async fn times(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let times = state.db.list_times().await?;
    render(&TimesTemplate { times: &times })
}

#[derive(Debug, Deserialize)]
struct ContactQuery {
    success: Option<String>,
}

async fn contact_page(Query(params): Query<ContactQuery>) -> Result<Html<String>> {
    render(&ContactTemplate {
        success: params.success.as_deref() == Some("true"),
        error: None,
    })
}

/// Store a contact message. Errors re-render the form with a message.
async fn submit_contact(State(state): State<Arc<AppState>>, payload: Payload) -> Result<Response> {
    let result = match normalize_contact(&payload.fields) {
        Ok(draft) => state.db.create_contact(&draft).await.map(|_| ()),
        Err(err) => Err(AppError::from(err)),
    };

    match result {
        Ok(()) => {
            tracing::info!("Contact message received");
            Ok(Redirect::to("/contact?success=true").into_response())
        }
        Err(AppError::Validation(err)) => {
            let message = err.to_string();
            Ok(render(&ContactTemplate {
                success: false,
                error: Some(&message),
            })?
            .into_response())
        }
        Err(err) => {
            tracing::error!(error = %err, "Contact submission failed");
            Ok(render(&ContactTemplate {
                success: false,
                error: Some(CONTACT_FAILURE),
            })?
            .into_response())
        }
    }
}
