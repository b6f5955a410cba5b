// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process [`Store`] used by tests and offline local runs.

use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};

use crate::db::store::{Direction, Query, Store};
use crate::error::AppError;
use crate::time_utils::format_utc_rfc3339;

/// Tables held as vectors of JSON objects, in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: DashMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in `table`.
    pub fn count(&self, table: &str) -> usize {
        self.tables.get(table).map(|rows| rows.len()).unwrap_or(0)
    }
}

/// PostgREST renders filter values as text, so compare in that form.
fn cell_matches(row: &Value, column: &str, expected: &str) -> bool {
    match row.get(column) {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => n.to_string() == expected,
        Some(Value::Bool(b)) => b.to_string() == expected,
        Some(Value::Null) | None => expected == "null",
        Some(_) => false,
    }
}

fn matches(row: &Value, query: &Query) -> bool {
    query
        .filters
        .iter()
        .all(|(column, expected)| cell_matches(row, column, expected))
}

/// Nulls sort last in either direction, like PostgreSQL's default for DESC.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn is_null(cell: Option<&Value>) -> bool {
    matches!(cell, None | Some(Value::Null))
}

fn sort_rows(rows: &mut [Value], order: &[(String, Direction)]) {
    rows.sort_by(|a, b| {
        for (column, direction) in order {
            let (x, y) = (a.get(column), b.get(column));
            let ordering = match (is_null(x), is_null(y)) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => match direction {
                    Direction::Ascending => compare_cells(x, y),
                    Direction::Descending => compare_cells(y, x),
                },
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

fn with_defaults(row: Value) -> Result<Value, AppError> {
    let Value::Object(mut object) = row else {
        return Err(AppError::Database("insert expects JSON objects".to_string()));
    };

    let now = format_utc_rfc3339(chrono::Utc::now());
    object
        .entry("id")
        .or_insert_with(|| Value::String(uuid::Uuid::new_v4().to_string()));
    object
        .entry("created_at")
        .or_insert_with(|| Value::String(now.clone()));
    object
        .entry("updated_at")
        .or_insert_with(|| Value::String(now));

    Ok(Value::Object(object))
}

#[async_trait]
impl Store for MemoryStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, AppError> {
        let mut rows: Vec<Value> = self
            .tables
            .get(table)
            .map(|rows| rows.iter().filter(|row| matches(row, query)).cloned().collect())
            .unwrap_or_default();

        sort_rows(&mut rows, &query.order);
        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>, AppError> {
        let rows = match row {
            Value::Array(rows) => rows,
            other => vec![other],
        };

        let stored = rows
            .into_iter()
            .map(with_defaults)
            .collect::<Result<Vec<_>, _>>()?;

        self.tables
            .entry(table.to_string())
            .or_default()
            .extend(stored.iter().cloned());

        Ok(stored)
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> Result<(), AppError> {
        let Value::Object(patch) = patch else {
            return Err(AppError::Database("update expects a JSON object".to_string()));
        };

        if let Some(mut rows) = self.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches(row, query)) {
                if let Value::Object(object) = row {
                    merge(object, &patch);
                }
            }
        }

        Ok(())
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<(), AppError> {
        if let Some(mut rows) = self.tables.get_mut(table) {
            rows.retain(|row| !matches(row, query));
        }
        Ok(())
    }
}

fn merge(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}
