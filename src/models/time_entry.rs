// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! "Times" entries: short status updates shown on the timeline page.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::display_datetime;

/// Maximum length of a times entry, in characters.
pub const MAX_TIME_CONTENT_CHARS: usize = 280;

/// Canonical times entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeDraft {
    pub content: String,
    pub image_url: Option<String>,
}

/// Stored times row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct TimeEntry {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl TimeEntry {
    pub fn posted_label(&self) -> String {
        display_datetime(&self.created_at)
    }
}
