// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! oneamlog: personal portfolio and blog server.
//!
//! Public pages (blog, works, times, contact) plus an admin area behind a
//! cookie session issued by Supabase Auth. Content is stored through
//! PostgREST, or in memory for local runs and tests.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod validation;
pub mod views;

use std::sync::Arc;

use config::Config;
use db::{Database, Store};
use services::{AuthProvider, SessionService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub auth: Arc<dyn AuthProvider>,
    pub sessions: SessionService,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn Store>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            config,
            db: Database::new(store),
            sessions: SessionService::new(auth.clone()),
            auth,
        }
    }
}
