// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session guard middleware and session cookie helpers.

use crate::models::CredentialPair;
use crate::services::GuardOutcome;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin";

const ACCESS_TOKEN_TTL: time::Duration = time::Duration::days(7);
const REFRESH_TOKEN_TTL: time::Duration = time::Duration::days(30);

/// Middleware that requires a live session.
///
/// Reads the access token from the cookie (falling back to a Bearer header),
/// refreshes it when the auth service refuses it, and redirects to the login
/// page otherwise. On success the [`Principal`](crate::models::Principal) is
/// attached to the request extensions.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    // Try cookie first, then header
    let access_token = jar
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
        .or_else(|| bearer_token(request.headers()));
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string());

    let outcome = state
        .sessions
        .authenticate(access_token.as_deref(), refresh_token.as_deref())
        .await;

    match outcome {
        GuardOutcome::Proceed {
            principal,
            refreshed,
        } => {
            request.extensions_mut().insert(principal);
            let response = next.run(request).await;

            match refreshed {
                // Only the delta is emitted, so exactly the two session cookies.
                Some(pair) => (set_session_cookies(CookieJar::new(), &pair), response).into_response(),
                None => response,
            }
        }
        GuardOutcome::RedirectLogin(session_state) => {
            tracing::debug!(
                state = ?session_state,
                path = %request.uri().path(),
                "No usable session, redirecting to login"
            );
            Redirect::to(LOGIN_PATH).into_response()
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Build a session cookie. Issuance, refresh and clearing share these attributes.
fn session_cookie(name: &'static str, value: String, ttl: time::Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(ttl)
        .build()
}

/// Write both session cookies.
pub fn set_session_cookies(jar: CookieJar, credentials: &CredentialPair) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        credentials.access_token.clone(),
        ACCESS_TOKEN_TTL,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        credentials.refresh_token.clone(),
        REFRESH_TOKEN_TTL,
    ))
}

/// Expire both session cookies.
pub fn clear_session_cookies(jar: CookieJar) -> CookieJar {
    jar.add(session_cookie(
        ACCESS_TOKEN_COOKIE,
        String::new(),
        time::Duration::ZERO,
    ))
    .add(session_cookie(
        REFRESH_TOKEN_COOKIE,
        String::new(),
        time::Duration::ZERO,
    ))
}
