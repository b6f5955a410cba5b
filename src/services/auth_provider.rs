// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth collaborator seam.

use async_trait::async_trait;

use crate::models::{Principal, Session};

/// Auth failure categories.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// The service answered and refused the credential.
    #[error("credential rejected: {0}")]
    Rejected(String),
    /// The service could not be reached or answered unexpectedly.
    #[error("auth service unavailable: {0}")]
    Transient(String),
}

/// Operations consumed from the hosted auth service.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve an access token to the user it was issued for.
    async fn get_user(&self, access_token: &str) -> Result<Principal, AuthError>;

    /// Exchange a refresh token for a new credential pair.
    async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}
