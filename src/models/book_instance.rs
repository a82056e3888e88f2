//! BookInstance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::{format_date_med, BookRef};

/// Book copy record as stored. `status` is free-form: the set of known values
/// is whatever is already present in the collection.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookInstance {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    /// Canonical detail page path
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    /// Due date in medium human-readable format, empty when not set
    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_date_med).unwrap_or_default()
    }

    /// Due date as yyyy-mm-dd, for form prefill
    pub fn due_back_ymd(&self) -> Option<String> {
        self.due_back.map(|d| d.format("%Y-%m-%d").to_string())
    }

    /// Data-bag representation without the populated book
    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "book_id": self.book_id,
            "imprint": self.imprint,
            "status": self.status,
            "due_back": self.due_back_ymd(),
            "due_back_formatted": self.due_back_formatted(),
            "url": self.url(),
        })
    }
}

/// Book copy with its book reference populated
#[derive(Debug, Clone)]
pub struct BookInstanceDetails {
    pub instance: BookInstance,
    pub book: BookRef,
}

impl BookInstanceDetails {
    pub fn view(&self) -> Value {
        json!({
            "id": self.instance.id,
            "imprint": self.instance.imprint,
            "status": self.instance.status,
            "due_back": self.instance.due_back_ymd(),
            "due_back_formatted": self.instance.due_back_formatted(),
            "url": self.instance.url(),
            "book": self.book.view(),
        })
    }
}

/// Sanitized, not-yet-persisted book copy built from form input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstanceDraft {
    pub book_id: Uuid,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}
