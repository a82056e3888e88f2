//! Genre form payload and validation

use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::models::GenreDraft;

use super::{collect_field_errors, escape_html, FieldError};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(
        min = 3,
        max = 100,
        message = "Genre name must be between 3 and 100 characters"
    ))]
    pub name: String,
}

impl GenreForm {
    /// Trim surrounding whitespace from every field
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        collect_field_errors(self)
    }

    /// Escaped values echoed back into the form view
    pub fn echo(&self) -> Value {
        json!({ "name": escape_html(&self.name) })
    }

    /// Build the persistable draft (valid input only)
    pub fn to_draft(&self) -> GenreDraft {
        GenreDraft {
            name: escape_html(&self.name),
        }
    }
}
