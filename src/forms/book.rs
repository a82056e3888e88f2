//! Book form payload and validation

use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::AppResult;
use crate::models::BookDraft;

use super::{collect_field_errors, escape_html, parse_entity_id, FieldError};

/// Book form. `genre` arrives as zero or more checkbox values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Author must not be empty."))]
    pub author: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[serde(default)]
    pub genre: Vec<String>,
}

impl BookForm {
    pub fn trimmed(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.author = self.author.trim().to_string();
        self.summary = self.summary.trim().to_string();
        self.isbn = self.isbn.trim().to_string();
        self.genre = self.genre.iter().map(|g| g.trim().to_string()).collect();
        self
    }

    pub fn field_errors(&self) -> Vec<FieldError> {
        collect_field_errors(self)
    }

    pub fn echo(&self) -> Value {
        json!({
            "title": escape_html(&self.title),
            "author": escape_html(&self.author),
            "summary": escape_html(&self.summary),
            "isbn": escape_html(&self.isbn),
            "genre": self.genre.iter().map(|g| escape_html(g)).collect::<Vec<_>>(),
        })
    }

    /// Build the persistable draft (valid input only). Fails when the author
    /// or a genre choice is not a well-formed identity token.
    pub fn to_draft(&self) -> AppResult<BookDraft> {
        Ok(BookDraft {
            title: escape_html(&self.title),
            author_id: parse_entity_id(&self.author)?,
            summary: escape_html(&self.summary),
            isbn: escape_html(&self.isbn),
            genre_ids: self
                .genre
                .iter()
                .map(|g| parse_entity_id(g))
                .collect::<AppResult<Vec<_>>>()?,
        })
    }
}
