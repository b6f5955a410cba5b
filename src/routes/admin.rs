// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin pages. Everything except the login page is guarded.

use crate::error::{AppError, Result};
use crate::middleware::auth::DASHBOARD_PATH;
use crate::models::MAX_TIME_CONTENT_CHARS;
use crate::views::{
    login_error_message, render, ContactListTemplate, DashboardTemplate, LoginTemplate,
    PostEditorTemplate, TagManagerTemplate, TimeFormTemplate, TimesAdminTemplate, WorkForm,
    WorkFormTemplate, WorksAdminTemplate,
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

/// `?error=` / `?success=` banners passed along by redirects.
#[derive(Debug, Default, Deserialize)]
struct Notice {
    error: Option<String>,
    success: Option<String>,
}

/// The login page (unguarded).
pub fn login_routes() -> Router<Arc<AppState>> {
    Router::new().route("/admin/login", get(login_page))
}

/// Guarded admin pages (guard applied by the caller).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/posts/new", get(new_post))
        .route("/admin/posts/{id}/edit", get(edit_post))
        .route("/admin/tags", get(tags))
        .route("/admin/contacts", get(contacts))
        .route("/admin/times", get(times))
        .route("/admin/times/new", get(new_time))
        .route("/admin/works", get(works))
        .route("/admin/works/new", get(new_work))
        .route("/admin/works/{id}/edit", get(edit_work))
}

async fn login_page(Query(notice): Query<Notice>) -> Result<Html<String>> {
    render(&LoginTemplate {
        error: login_error_message(notice.error.as_deref()),
    })
}

async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let posts = state.db.list_all_posts().await?;
    render(&DashboardTemplate { posts: &posts })
}

async fn new_post(
    State(state): State<Arc<AppState>>,
    Query(notice): Query<Notice>,
) -> Result<Html<String>> {
    let all_tags = state.db.list_tags().await?;
    render(&PostEditorTemplate::new(
        None,
        &all_tags,
        notice.error.as_deref(),
    ))
}

/// Unknown posts send the user back to the dashboard.
async fn edit_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(notice): Query<Notice>,
) -> Result<Response> {
    let (post, all_tags) = tokio::try_join!(state.db.get_post(&id), state.db.list_tags())?;
    let Some(post) = post else {
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    };

    Ok(render(&PostEditorTemplate::new(
        Some(&post),
        &all_tags,
        notice.error.as_deref(),
    ))?
    .into_response())
}

async fn tags(
    State(state): State<Arc<AppState>>,
    Query(notice): Query<Notice>,
) -> Result<Html<String>> {
    let tags = state.db.list_tags().await?;
    render(&TagManagerTemplate {
        tags: &tags,
        error: notice.error.as_deref(),
        success: notice.success.as_deref(),
    })
}

async fn contacts(
    State(state): State<Arc<AppState>>,
    Query(notice): Query<Notice>,
) -> Result<Html<String>> {
    let contacts = state.db.list_contacts().await?;
    render(&ContactListTemplate {
        contacts: &contacts,
        error: notice.error.as_deref(),
        success: notice.success.as_deref(),
    })
}

async fn times(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let times = state.db.list_times().await?;
    render(&TimesAdminTemplate { times: &times })
}

async fn new_time() -> Result<Html<String>> {
    render(&TimeFormTemplate {
        max_chars: MAX_TIME_CONTENT_CHARS,
    })
}

async fn works(
    State(state): State<Arc<AppState>>,
    Query(notice): Query<Notice>,
) -> Result<Html<String>> {
    let works = state.db.list_works().await?;
    render(&WorksAdminTemplate {
        works: &works,
        success: WorksAdminTemplate::success_message(notice.success.as_deref()),
    })
}

async fn new_work() -> Result<Html<String>> {
    render(&WorkFormTemplate {
        form: WorkForm::new_work(),
    })
}

async fn edit_work(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let work = state
        .db
        .get_work(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Work not found".to_string()))?;

    render(&WorkFormTemplate {
        form: WorkForm::edit(&work),
    })
}
