// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Authenticated identity and the credentials that prove it.

use serde::{Deserialize, Serialize};

/// The authenticated user as reported by the auth service.
///
/// Attached to request extensions by the session guard and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    /// Auth service user id (UUID)
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Access/refresh token pair issued by the auth service.
///
/// Both are opaque bearer strings whose expiry is decided upstream.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for CredentialPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

/// Result of a successful sign-in or refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub credentials: CredentialPair,
    pub principal: Principal,
}
