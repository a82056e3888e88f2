//! Genre model and related types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// Genre record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    /// Canonical detail page path
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }

    /// Data-bag representation including derived attributes
    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "url": self.url(),
        })
    }
}

/// Sanitized, not-yet-persisted genre built from form input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreDraft {
    pub name: String,
}
