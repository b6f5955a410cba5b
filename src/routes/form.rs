// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shape-aware responses for mutating endpoints.
//!
//! Form submissions are answered with redirects carrying a URL-encoded
//! `error`/`success` message; JSON requests get a status code and body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::error::AppError;
use crate::routes::payload::InputShape;

/// Placeholder for JSON replies that carry no `data`.
pub const NO_DATA: Option<()> = None;

/// JSON success body.
#[derive(Serialize)]
pub struct ApiSuccess<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Where a form submission goes next.
pub struct FormFlow<'a> {
    /// Redirect target on success, query string included.
    pub success: String,
    /// Form page to send the user back to on error.
    pub error_path: String,
    /// Shown instead of collaborator failure details.
    pub failure: &'a str,
}

/// `path?key=<message>` with the message URL-encoded.
pub fn redirect_with(path: &str, key: &str, message: &str) -> Redirect {
    let separator = if path.contains('?') { '&' } else { '?' };
    Redirect::to(&format!(
        "{}{}{}={}",
        path,
        separator,
        key,
        urlencoding::encode(message)
    ))
}

pub fn redirect_with_error(path: &str, message: &str) -> Redirect {
    redirect_with(path, "error", message)
}

/// Message a form user sees for `err`.
///
/// Collaborator failures are logged here and replaced by `failure`.
pub fn form_error_message(err: &AppError, failure: &str) -> String {
    match err {
        AppError::Validation(e) => e.to_string(),
        AppError::BadRequest(msg) | AppError::Conflict(msg) | AppError::NotFound(msg) => {
            msg.clone()
        }
        AppError::Database(_) | AppError::Internal(_) => {
            tracing::error!(error = %err, "Form submission failed");
            failure.to_string()
        }
    }
}

/// Answer a mutation according to how the request was encoded.
pub fn respond<T: Serialize>(
    shape: InputShape,
    result: Result<Option<T>, AppError>,
    status: StatusCode,
    flow: FormFlow<'_>,
) -> Response {
    match (shape, result) {
        (InputShape::Json, Ok(data)) => (
            status,
            Json(ApiSuccess {
                success: true,
                data,
            }),
        )
            .into_response(),
        (InputShape::Json, Err(err)) => err.into_response(),
        (InputShape::Form, Ok(_)) => Redirect::to(&flow.success).into_response(),
        (InputShape::Form, Err(err)) => {
            redirect_with_error(&flow.error_path, &form_error_message(&err, flow.failure))
                .into_response()
        }
    }
}
