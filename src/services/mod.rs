// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - auth collaborator and session resolution.

pub mod auth_provider;
pub mod session;
pub mod supabase_auth;

pub use auth_provider::{AuthError, AuthProvider};
pub use session::{GuardOutcome, SessionService, SessionState};
pub use supabase_auth::SupabaseAuth;
