// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgREST-backed [`Store`] (Supabase `/rest/v1`).

use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

use crate::db::store::{Direction, Query, Store};
use crate::error::AppError;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// PostgREST client authenticated with the service-role key.
#[derive(Clone)]
pub struct PostgrestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(supabase_url: &str, service_role_key: &str) -> anyhow::Result<Self> {
        Self::with_timeout(supabase_url, service_role_key, DEFAULT_HTTP_TIMEOUT)
    }

    /// A request that outlives `timeout` fails as a database error.
    pub fn with_timeout(
        supabase_url: &str,
        service_role_key: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building PostgREST HTTP client")?;

        Ok(Self {
            http,
            base_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
            api_key: service_role_key.to_string(),
        })
    }

    fn url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    fn headers(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| AppError::Database(format!("Invalid API key header: {}", e)))?;
        headers.insert("apikey", key);
        Ok(headers)
    }

    /// Check response status and return error if not successful.
    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Database(format!("HTTP {}: {}", status, body)))
    }
}

/// Render a [`Query`] as PostgREST query parameters.
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = query
        .filters
        .iter()
        .map(|(column, value)| (column.clone(), format!("eq.{}", value)))
        .collect();

    if !query.order.is_empty() {
        let order = query
            .order
            .iter()
            .map(|(column, direction)| match direction {
                Direction::Ascending => format!("{}.asc", column),
                Direction::Descending => format!("{}.desc", column),
            })
            .collect::<Vec<_>>()
            .join(",");
        params.push(("order".to_string(), order));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

#[async_trait]
impl Store for PostgrestStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, AppError> {
        let mut params = query_params(query);
        params.push(("select".to_string(), "*".to_string()));

        let response = self
            .http
            .get(self.url(table))
            .headers(self.headers()?)
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("JSON parse error: {}", e)))
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, AppError> {
        let response = self
            .http
            .post(self.url(table))
            .headers(self.headers()?)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("JSON parse error: {}", e)))
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> Result<(), AppError> {
        let response = self
            .http
            .patch(self.url(table))
            .headers(self.headers()?)
            .bearer_auth(&self.api_key)
            .query(&query_params(query))
            .json(&patch)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_response(response).await?;
        Ok(())
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<(), AppError> {
        let response = self
            .http
            .delete(self.url(table))
            .headers(self.headers()?)
            .bearer_auth(&self.api_key)
            .query(&query_params(query))
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_response(response).await?;
        Ok(())
    }
}
