//! Book model and related types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Author, Genre};

/// Book record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
}

impl Book {
    /// Canonical detail page path
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Book row for list views, with the author name already joined in
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookSummary {
    pub id: Uuid,
    pub title: String,
    pub author_name: String,
}

impl BookSummary {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }

    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "author_name": self.author_name,
            "url": self.url(),
        })
    }
}

/// Minimal book reference (id + title), used to populate form choice lists
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookRef {
    pub id: Uuid,
    pub title: String,
}

impl BookRef {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }

    pub fn view(&self) -> Value {
        json!({
            "id": self.id,
            "title": self.title,
            "url": self.url(),
        })
    }
}

/// Book with its author and genres populated. The author reference is
/// advisory, so it can be absent.
#[derive(Debug, Clone)]
pub struct BookDetails {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
}

impl BookDetails {
    pub fn view(&self) -> Value {
        json!({
            "id": self.book.id,
            "title": self.book.title,
            "summary": self.book.summary,
            "isbn": self.book.isbn,
            "url": self.book.url(),
            "author": self.author.as_ref().map(Author::view),
            "genre": self.genres.iter().map(Genre::view).collect::<Vec<_>>(),
        })
    }
}

/// Sanitized, not-yet-persisted book built from form input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookDraft {
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<Uuid>,
}
