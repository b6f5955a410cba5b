// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Work (portfolio entry) normalization.

use super::{coerce_integer, optional, parse_list, Fields, ValidationError, Violations};
use crate::models::WorkDraft;

pub fn normalize_work(fields: &Fields) -> Result<WorkDraft, ValidationError> {
    let mut errors = Violations::default();

    let title = errors.required(fields, "title", "Title is required");
    let slug = errors.required_slug(fields);
    let description = errors.required(fields, "description", "Description is required");

    errors.check()?;

    Ok(WorkDraft {
        title,
        slug,
        description,
        period: optional(fields, "period"),
        position: optional(fields, "position"),
        category: optional(fields, "category"),
        technologies: parse_list(fields, "technologies"),
        languages: parse_list(fields, "languages"),
        libraries: parse_list(fields, "libraries"),
        environments: parse_list(fields, "environments"),
        tools: parse_list(fields, "tools"),
        image_url: optional(fields, "image_url"),
        project_url: optional(fields, "project_url"),
        github_url: optional(fields, "github_url"),
        display_order: coerce_integer(fields.text("display_order"), 0),
    })
}
