//! Data models for the Alexandria catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorDraft};
pub use book::{Book, BookDetails, BookDraft, BookRef, BookSummary};
pub use book_instance::{BookInstance, BookInstanceDetails, BookInstanceDraft};
pub use genre::{Genre, GenreDraft};

/// Format a date in medium human-readable style, e.g. "Mar 7, 2020".
pub fn format_date_med(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
