//! BookInstance form payload and validation

use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::models::BookInstanceDraft;

use super::{
    collect_field_errors, escape_html, iso_date_rule, parse_optional_date, FieldError,
};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = iso_date_rule, message = "Invalid date"))]
    pub due_back: String,
}

impl BookInstanceForm {
    pub fn trimmed(mut self) -> Self {
        self.book = self.book.trim().to_string();
        self.imprint = self.imprint.trim().to_string();
        self.status = self.status.trim().to_string();
        self.due_back = self.due_back.trim().to_string();
        self
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        collect_field_errors(self)
    }

    pub fn echo(&self) -> Value {
        json!({
            "book": escape_html(&self.book),
            "imprint": escape_html(&self.imprint),
            "status": escape_html(&self.status),
            "due_back": self.due_back,
        })
    }

    /// Build the persistable draft (valid input only, book id already parsed)
    pub fn to_draft(&self, book_id: Uuid) -> BookInstanceDraft {
        BookInstanceDraft {
            book_id,
            imprint: escape_html(&self.imprint),
            status: escape_html(&self.status),
            due_back: parse_optional_date(&self.due_back),
        }
    }
}
