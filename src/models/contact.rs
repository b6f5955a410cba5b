//! Contact form submission model.

use serde::{Deserialize, Serialize};

/// Canonical contact message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDraft {
    pub name: String,
    /// Lower-cased
    pub email: String,
    pub message: String,
}

/// Stored contact row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub is_read: bool,
}
