//! Form input handling: sanitization and declarative field validation.
//!
//! Each entity has a form payload type deserialized straight from the request
//! body. The workflow is always the same: trim the raw input, run the
//! `validator` rules on the trimmed values, then either echo the sanitized
//! input back into the form view (with the collected [`FieldError`]s) or build
//! an escaped draft that is safe to persist.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};

pub use author::AuthorForm;
pub use book::BookForm;
pub use book_instance::BookInstanceForm;
pub use genre::GenreForm;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Escape markup-significant characters before echoing input into a page
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Collect every rule failure on a validated form, sorted by field name.
pub fn collect_field_errors<T: Validate>(form: &T) -> Vec<FieldError> {
    let mut errors: Vec<FieldError> = match form.validate() {
        Ok(()) => return Vec::new(),
        Err(errs) => errs
            .field_errors()
            .iter()
            .flat_map(|(field, field_errs)| {
                field_errs.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .clone()
                        .map(|m| m.into_owned())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect(),
    };
    errors.sort_by(|a, b| a.field.cmp(&b.field));
    errors
}

/// Rule for optional ISO-8601 date fields: empty is fine, anything else must
/// parse as `yyyy-mm-dd`.
pub fn iso_date_rule(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_date"))
}

/// Parse an already-validated optional date field
pub fn parse_optional_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parse a path or form identity token
pub fn parse_entity_id(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid record id: {}", value)))
}
