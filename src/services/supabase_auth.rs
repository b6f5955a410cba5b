// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase Auth (GoTrue) client.
//!
//! Handles:
//! - Token → user resolution
//! - Refresh-token exchange
//! - Password sign-in and sign-out

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use crate::models::{CredentialPair, Principal, Session};
use crate::services::auth_provider::{AuthError, AuthProvider};

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// GoTrue REST client authenticated with the anonymous key.
#[derive(Clone)]
pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

/// Token endpoint response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: Principal,
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Session {
            credentials: CredentialPair {
                access_token: token.access_token,
                refresh_token: token.refresh_token,
            },
            principal: token.user,
        }
    }
}

impl SupabaseAuth {
    pub fn new(supabase_url: &str, anon_key: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .context("failed building auth HTTP client")?;

        Ok(Self {
            http,
            base_url: format!("{}/auth/v1", supabase_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        })
    }

    async fn token_grant(
        &self,
        grant_type: &str,
        body: serde_json::Value,
    ) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(format!("{}/token", self.base_url))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Transient(e.to_string()))?;

        let token: TokenResponse = check_response_json(response).await?;
        Ok(token.into())
    }
}

/// 4xx means the credential was refused; anything else is transient.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AuthError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    if status.is_client_error() {
        Err(AuthError::Rejected(format!("HTTP {}: {}", status, body)))
    } else {
        Err(AuthError::Transient(format!("HTTP {}: {}", status, body)))
    }
}

async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, AuthError> {
    check_response(response)
        .await?
        .json()
        .await
        .map_err(|e| AuthError::Transient(format!("JSON parse error: {}", e)))
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn get_user(&self, access_token: &str) -> Result<Principal, AuthError> {
        let response = self
            .http
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Transient(e.to_string()))?;

        check_response_json(response).await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.token_grant(
            "refresh_token",
            serde_json::json!({ "refresh_token": refresh_token }),
        )
        .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.token_grant(
            "password",
            serde_json::json!({ "email": email, "password": password }),
        )
        .await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(format!("{}/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Transient(e.to_string()))?;

        check_response(response).await?;
        Ok(())
    }
}
