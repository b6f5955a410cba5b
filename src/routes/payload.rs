// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request payload extraction.
//!
//! Admin forms post `application/x-www-form-urlencoded` bodies and tunnel
//! PUT/PATCH/DELETE through a hidden `_method` field; script-driven admin
//! pages send JSON. Both become a [`Fields`] map plus an explicit
//! [`InputShape`] and [`Verb`], resolved once here.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, Method},
};

use crate::error::AppError;
use crate::validation::Fields;

const METHOD_OVERRIDE_FIELD: &str = "_method";

/// How the body was encoded, which also decides how errors are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputShape {
    Form,
    Json,
}

impl InputShape {
    /// JSON when declared as such. A body-less non-POST request (a script's
    /// `fetch(url, { method: 'DELETE' })`) is also answered as JSON.
    pub fn resolve(method: &Method, headers: &HeaderMap) -> Self {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_start().to_ascii_lowercase());

        match content_type {
            Some(ct) if ct.starts_with("application/json") => InputShape::Json,
            Some(_) => InputShape::Form,
            None if *method == Method::POST => InputShape::Form,
            None => InputShape::Json,
        }
    }
}

/// Effective request verb after applying a `_method` override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(Verb::Get),
            "POST" => Some(Verb::Post),
            "PUT" => Some(Verb::Put),
            "PATCH" => Some(Verb::Patch),
            "DELETE" => Some(Verb::Delete),
            _ => None,
        }
    }

    fn from_method(method: &Method) -> Self {
        match *method {
            Method::GET => Verb::Get,
            Method::PUT => Verb::Put,
            Method::PATCH => Verb::Patch,
            Method::DELETE => Verb::Delete,
            _ => Verb::Post,
        }
    }

    /// Only POST can be overridden; an unknown override keeps POST.
    fn resolve(method: &Method, override_value: Option<&str>) -> Self {
        let verb = Self::from_method(method);
        match (verb, override_value.and_then(Verb::parse)) {
            (Verb::Post, Some(overridden)) => overridden,
            _ => verb,
        }
    }
}

/// Decoded request body.
#[derive(Debug, Clone)]
pub struct Payload {
    pub shape: InputShape,
    pub verb: Verb,
    /// Request fields with `_method` already removed.
    pub fields: Fields,
}

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let shape = InputShape::resolve(&method, req.headers());

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        let mut fields = decode_body(shape, &body)?;
        let override_value = fields.take(METHOD_OVERRIDE_FIELD);
        let verb = Verb::resolve(&method, override_value.as_deref());

        Ok(Payload {
            shape,
            verb,
            fields,
        })
    }
}

fn decode_body(shape: InputShape, body: &[u8]) -> Result<Fields, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::new());
    }

    match shape {
        InputShape::Json => {
            let value: serde_json::Value = serde_json::from_slice(body)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
            Fields::from_json(&value)
                .ok_or_else(|| AppError::BadRequest("Expected a JSON object".to_string()))
        }
        InputShape::Form => Ok(Fields::from_pairs(form_urlencoded::parse(body).into_owned())),
    }
}
