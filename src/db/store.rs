// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Table-level persistence seam.
//!
//! The hosted database is treated as an opaque service: rows go in and come
//! out as JSON objects, filtered by column equality and ordered by columns.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

/// Sort direction for [`Query::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Equality filters, ordering and an optional limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub filters: Vec<(String, String)>,
    pub order: Vec<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep rows whose `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push((column.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, column: &str, direction: Direction) -> Self {
        self.order.push((column.to_string(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Persistence collaborator.
///
/// Implementations generate `id`, `created_at` and `updated_at` on insert
/// like the hosted database's column defaults do.
#[async_trait]
pub trait Store: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, AppError>;

    /// Insert one or more rows (`row` may be an object or an array of
    /// objects) and return them as stored.
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, AppError>;

    /// Merge `patch` into every row matching `query`.
    async fn update(&self, table: &str, query: &Query, patch: Value) -> Result<(), AppError>;

    async fn delete(&self, table: &str, query: &Query) -> Result<(), AppError>;
}
