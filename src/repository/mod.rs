//! Repository layer for database operations.
//!
//! Each entity has a store trait describing the persistence operations the
//! controllers need, and a sqlx/Postgres implementation. Controllers depend on
//! the traits only, so tests can swap in mocks.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorDraft, Book, BookDetails, BookDraft, BookInstance, BookInstanceDetails,
        BookInstanceDraft, BookRef, BookSummary, Genre, GenreDraft,
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// All authors, sorted by family name then first name
    async fn list(&self) -> AppResult<Vec<Author>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn insert(&self, draft: AuthorDraft) -> AppResult<Author>;
    async fn update(&self, id: Uuid, draft: AuthorDraft) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    async fn count(&self) -> AppResult<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenreStore: Send + Sync {
    /// All genres, sorted by name ascending
    async fn list(&self) -> AppResult<Vec<Genre>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Genre>>;
    /// Exact-match lookup used by the duplicate-name guard
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn insert(&self, draft: GenreDraft) -> AppResult<Genre>;
    async fn update(&self, id: Uuid, draft: GenreDraft) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    async fn count(&self) -> AppResult<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books with author names, sorted by title
    async fn list(&self) -> AppResult<Vec<BookSummary>>;
    /// id + title pairs for form choice lists, sorted by title
    async fn list_refs(&self) -> AppResult<Vec<BookRef>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookDetails>>;
    async fn find_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>>;
    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>>;
    async fn insert(&self, draft: BookDraft) -> AppResult<Book>;
    async fn update(&self, id: Uuid, draft: BookDraft) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    async fn count(&self) -> AppResult<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookInstanceStore: Send + Sync {
    /// All copies with their book reference populated
    async fn list(&self) -> AppResult<Vec<BookInstanceDetails>>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>>;
    async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    /// Distinct status strings already present in the collection
    async fn distinct_statuses(&self) -> AppResult<Vec<String>>;
    async fn insert(&self, draft: BookInstanceDraft) -> AppResult<BookInstance>;
    async fn update(&self, id: Uuid, draft: BookInstanceDraft) -> AppResult<()>;
    async fn delete(&self, id: Uuid) -> AppResult<()>;
    async fn count(&self) -> AppResult<i64>;
    async fn count_by_status(&self, status: &str) -> AppResult<i64>;
}

/// Main repository struct holding the concrete per-entity stores
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub genres: genres::GenresRepository,
    pub books: books::BooksRepository,
    pub book_instances: book_instances::BookInstancesRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            genres: genres::GenresRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            book_instances: book_instances::BookInstancesRepository::new(pool.clone()),
            pool,
        }
    }
}
