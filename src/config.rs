// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The Supabase keys are read once at startup; Cloud deployments inject them
//! as environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Base URL of the Supabase project, e.g. `https://xyz.supabase.co`
    pub supabase_url: String,
    /// Public site URL (allowed CORS origin)
    pub site_url: String,
    /// Server port
    pub port: u16,
    /// Serve from the in-memory store instead of PostgREST (local development)
    pub use_memory_store: bool,

    // --- Secrets ---
    /// Anonymous (public) API key, used for the auth endpoints
    pub supabase_anon_key: String,
    /// Service-role key, used for table access (bypasses row level security)
    pub supabase_service_role_key: String,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            site_url: "http://localhost:8080".to_string(),
            port: 8080,
            use_memory_store: true,
            supabase_anon_key: "test_anon_key".to_string(),
            supabase_service_role_key: "test_service_role_key".to_string(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let use_memory_store = env::var("USE_MEMORY_STORE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        // The in-memory store never talks to Supabase, so its keys are optional there.
        let required = |name: &'static str| -> Result<String, ConfigError> {
            match env::var(name) {
                Ok(v) => Ok(v.trim().to_string()),
                Err(_) if use_memory_store => Ok(String::new()),
                Err(_) => Err(ConfigError::Missing(name)),
            }
        };

        Ok(Self {
            supabase_url: required("SUPABASE_URL")?
                .trim_end_matches('/')
                .to_string(),
            site_url: env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            use_memory_store,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            supabase_service_role_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
