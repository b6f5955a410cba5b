// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! oneamlog server
//!
//! Serves the public site, the admin area and its API.

use oneamlog::{
    config::Config,
    db::{MemoryStore, PostgrestStore, Store},
    services::{AuthProvider, SupabaseAuth},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting oneamlog");

    let store: Arc<dyn Store> = if config.use_memory_store {
        tracing::warn!("Using in-memory store; content is lost on restart");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!(url = %config.supabase_url, "Using PostgREST store");
        Arc::new(PostgrestStore::new(
            &config.supabase_url,
            &config.supabase_service_role_key,
        )?)
    };

    let auth: Arc<dyn AuthProvider> = Arc::new(SupabaseAuth::new(
        &config.supabase_url,
        &config.supabase_anon_key,
    )?);

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), store, auth));

    // Build router
    let app = oneamlog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("oneamlog=debug".parse().expect("valid directive"))
                .add_directive("info".parse().expect("valid directive")),
        )
        .with(format)
        .init();
}
