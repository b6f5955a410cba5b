// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin API: posts, tags, contacts, times and works.
//!
//! All routes sit behind the session guard. Each accepts a form or JSON body
//! and answers in the same shape (see [`respond`]).

use crate::error::AppError;
use crate::models::{Post, Principal, Tag, TimeEntry, Work};
use crate::routes::form::{respond, FormFlow, NO_DATA};
use crate::routes::payload::{InputShape, Payload, Verb};
use crate::validation::{normalize_post, normalize_tag, normalize_time, normalize_work};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::{delete, post, put},
    Extension, Router,
};
use chrono::Utc;
use std::sync::Arc;

const INVALID_REQUEST: &str = "Invalid request";

/// Create API routes (guard applied by the caller).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/posts", post(create_post))
        .route(
            "/api/posts/{id}",
            post(post_item).put(post_item).delete(post_item),
        )
        .route("/api/tags", post(create_tag))
        .route("/api/tags/{id}", post(tag_item).delete(tag_item))
        .route(
            "/api/contacts/{id}/read",
            post(mark_contact_read).patch(mark_contact_read),
        )
        .route("/api/times", post(create_time))
        .route("/api/times/{id}", delete(delete_time))
        .route("/api/works", post(create_work))
        .route("/api/works/{id}", put(update_work).delete(delete_work))
}

// ─── Posts ───────────────────────────────────────────────────────

async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    payload: Payload,
) -> Response {
    let result: Result<Option<Post>, AppError> = async {
        let draft = normalize_post(&payload.fields, Utc::now())?;
        let post = state.db.create_post(&draft, &principal.id).await?;
        state
            .db
            .set_post_tags(&post.id, &payload.fields.all("tags"))
            .await?;

        tracing::info!(post_id = %post.id, slug = %post.slug, "Post created");
        Ok(Some(post))
    }
    .await;

    respond(
        payload.shape,
        result,
        StatusCode::CREATED,
        FormFlow {
            success: "/admin".to_string(),
            error_path: "/admin/posts/new".to_string(),
            failure: "Failed to create post",
        },
    )
}

/// `/api/posts/{id}`: update on PUT, delete on DELETE (or their `_method` forms).
async fn post_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Response {
    match payload.verb {
        Verb::Put | Verb::Patch => update_post(&state, &id, payload).await,
        Verb::Delete => {
            let result = state.db.delete_post(&id).await;
            if result.is_ok() {
                tracing::info!(post_id = %id, "Post deleted");
            }
            respond(
                payload.shape,
                result.map(|()| NO_DATA),
                StatusCode::OK,
                FormFlow {
                    success: "/admin".to_string(),
                    error_path: format!("/admin/posts/{}/edit", id),
                    failure: "Failed to delete post",
                },
            )
        }
        Verb::Get | Verb::Post => respond(
            payload.shape,
            Err::<Option<()>, _>(AppError::BadRequest(INVALID_REQUEST.to_string())),
            StatusCode::OK,
            FormFlow {
                success: "/admin".to_string(),
                error_path: "/admin".to_string(),
                failure: INVALID_REQUEST,
            },
        ),
    }
}

async fn update_post(state: &AppState, id: &str, payload: Payload) -> Response {
    let result: Result<Option<()>, AppError> = async {
        let existing = state
            .db
            .get_post(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        let mut draft = normalize_post(&payload.fields, Utc::now())?;
        // Re-saving a published post keeps its original publication time.
        if !payload.fields.contains("published_at") && existing.published_at.is_some() {
            draft.published_at = existing.published_at.clone();
        }

        state.db.update_post(id, &draft).await?;

        // Forms always submit the full tag selection; JSON callers opt in.
        if payload.shape == InputShape::Form || payload.fields.contains("tags") {
            state
                .db
                .set_post_tags(id, &payload.fields.all("tags"))
                .await?;
        }

        tracing::info!(post_id = %id, "Post updated");
        Ok(NO_DATA)
    }
    .await;

    respond(
        payload.shape,
        result,
        StatusCode::OK,
        FormFlow {
            success: "/admin".to_string(),
            error_path: format!("/admin/posts/{}/edit", id),
            failure: "Failed to update post",
        },
    )
}

// ─── Tags ────────────────────────────────────────────────────────

async fn create_tag(State(state): State<Arc<AppState>>, payload: Payload) -> Response {
    let result: Result<Option<Tag>, AppError> = async {
        let draft = normalize_tag(&payload.fields)?;
        if state.db.tag_slug_exists(&draft.slug).await? {
            return Err(AppError::Conflict("This slug is already in use".to_string()));
        }

        let tag = state.db.create_tag(&draft).await?;
        tracing::info!(tag_id = %tag.id, slug = %tag.slug, "Tag created");
        Ok(Some(tag))
    }
    .await;

    respond(
        payload.shape,
        result,
        StatusCode::CREATED,
        FormFlow {
            success: "/admin/tags?success=Tag%20created".to_string(),
            error_path: "/admin/tags".to_string(),
            failure: "Failed to create tag",
        },
    )
}

/// `/api/tags/{id}`: only deletion is supported.
async fn tag_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Response {
    let result = match payload.verb {
        Verb::Delete => state.db.delete_tag(&id).await.map(|()| NO_DATA),
        _ => Err(AppError::BadRequest(INVALID_REQUEST.to_string())),
    };
    if result.is_ok() {
        tracing::info!(tag_id = %id, "Tag deleted");
    }

    respond(
        payload.shape,
        result,
        StatusCode::OK,
        FormFlow {
            success: "/admin/tags?success=Tag%20deleted".to_string(),
            error_path: "/admin/tags".to_string(),
            failure: "Failed to delete tag",
        },
    )
}

// ─── Contacts ────────────────────────────────────────────────────

async fn mark_contact_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Response {
    let result = match payload.verb {
        Verb::Patch => state.db.mark_contact_read(&id).await.map(|()| NO_DATA),
        _ => Err(AppError::BadRequest(INVALID_REQUEST.to_string())),
    };

    respond(
        payload.shape,
        result,
        StatusCode::OK,
        FormFlow {
            success: "/admin/contacts?success=Marked%20as%20read".to_string(),
            error_path: "/admin/contacts".to_string(),
            failure: "Failed to mark as read",
        },
    )
}

// ─── Times ───────────────────────────────────────────────────────

async fn create_time(State(state): State<Arc<AppState>>, payload: Payload) -> Response {
    let result: Result<Option<TimeEntry>, AppError> = async {
        let draft = normalize_time(&payload.fields)?;
        let entry = state.db.create_time(&draft).await?;
        tracing::info!(time_id = %entry.id, "Times entry created");
        Ok(Some(entry))
    }
    .await;

    respond(
        payload.shape,
        result,
        StatusCode::CREATED,
        FormFlow {
            success: "/admin/times".to_string(),
            error_path: "/admin/times/new".to_string(),
            failure: "Failed to post",
        },
    )
}

async fn delete_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Response {
    let result = state.db.delete_time(&id).await.map(|()| NO_DATA);

    respond(
        payload.shape,
        result,
        StatusCode::OK,
        FormFlow {
            success: "/admin/times".to_string(),
            error_path: "/admin/times".to_string(),
            failure: "Failed to delete entry",
        },
    )
}

// ─── Works ───────────────────────────────────────────────────────

const WORK_SLUG_TAKEN: &str = "Slug already exists";

async fn create_work(State(state): State<Arc<AppState>>, payload: Payload) -> Response {
    let result: Result<Option<Work>, AppError> = async {
        let draft = normalize_work(&payload.fields)?;
        if state.db.work_slug_taken(&draft.slug, None).await? {
            return Err(AppError::Conflict(WORK_SLUG_TAKEN.to_string()));
        }

        let work = state.db.create_work(&draft).await?;
        tracing::info!(work_id = %work.id, slug = %work.slug, "Work created");
        Ok(Some(work))
    }
    .await;

    respond(
        payload.shape,
        result,
        StatusCode::CREATED,
        FormFlow {
            success: "/admin/works?success=created".to_string(),
            error_path: "/admin/works/new".to_string(),
            failure: "Failed to create work",
        },
    )
}

async fn update_work(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Response {
    let result: Result<Option<()>, AppError> = async {
        if state.db.get_work(&id).await?.is_none() {
            return Err(AppError::NotFound("Work not found".to_string()));
        }

        let draft = normalize_work(&payload.fields)?;
        if state.db.work_slug_taken(&draft.slug, Some(&id)).await? {
            return Err(AppError::Conflict(WORK_SLUG_TAKEN.to_string()));
        }

        state.db.update_work(&id, &draft).await?;
        tracing::info!(work_id = %id, "Work updated");
        Ok(NO_DATA)
    }
    .await;

    respond(
        payload.shape,
        result,
        StatusCode::OK,
        FormFlow {
            success: "/admin/works?success=updated".to_string(),
            error_path: format!("/admin/works/{}/edit", id),
            failure: "Failed to update work",
        },
    )
}

async fn delete_work(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Payload,
) -> Response {
    let result = state.db.delete_work(&id).await.map(|()| NO_DATA);
    if result.is_ok() {
        tracing::info!(work_id = %id, "Work deleted");
    }

    respond(
        payload.shape,
        result,
        StatusCode::OK,
        FormFlow {
            success: "/admin/works?success=deleted".to_string(),
            error_path: "/admin/works".to_string(),
            failure: "Failed to delete work",
        },
    )
}
