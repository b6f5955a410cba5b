// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password login and logout.
//!
//! Both are unguarded: login issues the session cookies, logout expires them.

use crate::middleware::auth::{
    clear_session_cookies, set_session_cookies, ACCESS_TOKEN_COOKIE, DASHBOARD_PATH, LOGIN_PATH,
};
use crate::routes::payload::Payload;
use crate::AppState;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

/// Create auth routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Exchange email + password for a session and store it in cookies.
async fn login(State(state): State<Arc<AppState>>, jar: CookieJar, payload: Payload) -> Response {
    let (Some(email), Some(password)) = (
        payload.fields.text("email"),
        payload.fields.raw("password"),
    ) else {
        return Redirect::to(&format!("{}?error=missing-credentials", LOGIN_PATH)).into_response();
    };

    match state.auth.sign_in(email, password).await {
        Ok(session) => {
            tracing::info!(user_id = %session.principal.id, "Admin logged in");
            let jar = set_session_cookies(jar, &session.credentials);
            (jar, Redirect::to(DASHBOARD_PATH)).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Login failed");
            Redirect::to(&format!("{}?error=invalid-credentials", LOGIN_PATH)).into_response()
        }
    }
}

/// Revoke the session (best effort) and expire both cookies.
async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(access_token) = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
    {
        if let Err(err) = state.auth.sign_out(&access_token).await {
            tracing::warn!(error = %err, "Sign-out failed, clearing cookies anyway");
        }
    }

    (clear_session_cookies(jar), Redirect::to(LOGIN_PATH))
}
