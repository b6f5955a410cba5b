// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session guard, security headers).

pub mod auth;
pub mod security;

pub use auth::require_session;
pub use security::add_security_headers;
