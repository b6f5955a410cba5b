// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use oneamlog::config::Config;
use oneamlog::db::MemoryStore;
use oneamlog::models::{CredentialPair, Principal, Session};
use oneamlog::routes::create_router;
use oneamlog::services::{AuthError, AuthProvider};
use oneamlog::AppState;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[allow(dead_code)]
pub const VALID_ACCESS: &str = "valid-access";
#[allow(dead_code)]
pub const EXPIRED_ACCESS: &str = "expired-access";
#[allow(dead_code)]
pub const VALID_REFRESH: &str = "valid-refresh";
#[allow(dead_code)]
pub const ADMIN_EMAIL: &str = "admin@example.com";
#[allow(dead_code)]
pub const ADMIN_PASSWORD: &str = "correct horse";

/// Scripted auth service.
///
/// Accepts [`VALID_ACCESS`] plus every access token it has issued, refreshes
/// only [`VALID_REFRESH`] and signs in only the admin credentials.
pub struct FakeAuth {
    live_access_tokens: Mutex<HashSet<String>>,
    pub refresh_calls: AtomicUsize,
    pub sign_out_calls: AtomicUsize,
    refresh_delay: Duration,
}

impl FakeAuth {
    pub fn new(refresh_delay: Duration) -> Self {
        Self {
            live_access_tokens: Mutex::new(HashSet::from([VALID_ACCESS.to_string()])),
            refresh_calls: AtomicUsize::new(0),
            sign_out_calls: AtomicUsize::new(0),
            refresh_delay,
        }
    }

    #[allow(dead_code)]
    pub fn refresh_count(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    fn issue(&self, prefix: &str, n: usize) -> Session {
        let access_token = format!("{prefix}-access-{n}");
        self.live_access_tokens
            .lock()
            .unwrap()
            .insert(access_token.clone());
        Session {
            credentials: CredentialPair {
                access_token,
                refresh_token: format!("{prefix}-refresh-{n}"),
            },
            principal: admin(),
        }
    }
}

#[allow(dead_code)]
pub fn admin() -> Principal {
    Principal {
        id: "00000000-0000-0000-0000-000000000001".to_string(),
        email: Some(ADMIN_EMAIL.to_string()),
        role: Some("authenticated".to_string()),
    }
}

#[async_trait]
impl AuthProvider for FakeAuth {
    async fn get_user(&self, access_token: &str) -> Result<Principal, AuthError> {
        if self.live_access_tokens.lock().unwrap().contains(access_token) {
            Ok(admin())
        } else {
            Err(AuthError::Rejected("invalid JWT: token is expired".to_string()))
        }
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let n = self.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.refresh_delay).await;

        if refresh_token != VALID_REFRESH {
            return Err(AuthError::Rejected("Invalid Refresh Token".to_string()));
        }
        Ok(self.issue("fresh", n))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if email == ADMIN_EMAIL && password == ADMIN_PASSWORD {
            Ok(self.issue("login", 1))
        } else {
            Err(AuthError::Rejected("Invalid login credentials".to_string()))
        }
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Test app over the in-memory store and [`FakeAuth`].
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, Arc<FakeAuth>) {
    create_test_app_with_refresh_delay(Duration::ZERO)
}

#[allow(dead_code)]
pub fn create_test_app_with_refresh_delay(
    refresh_delay: Duration,
) -> (axum::Router, Arc<AppState>, Arc<FakeAuth>) {
    let auth = Arc::new(FakeAuth::new(refresh_delay));
    let state = Arc::new(AppState::new(
        Config::test_default(),
        Arc::new(MemoryStore::new()),
        auth.clone(),
    ));

    (create_router(state.clone()), state, auth)
}

/// Request carrying a valid session cookie.
#[allow(dead_code)]
pub fn authed(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("sb-access-token={VALID_ACCESS}"))
}

/// Authenticated urlencoded form submission.
#[allow(dead_code)]
pub fn form_post(uri: &str, body: &str) -> Request<Body> {
    authed("POST", uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Authenticated JSON request.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    authed(method, uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

#[allow(dead_code)]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
