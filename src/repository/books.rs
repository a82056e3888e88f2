//! Books repository.
//!
//! Genre membership lives in the `book_genres` junction table; updates replace
//! the whole membership set (delete then insert), mirroring how the form
//! submits it.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookDetails, BookDraft, BookRef, BookSummary, Genre},
};

use super::BookStore;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn sync_genres(&self, book_id: Uuid, genre_ids: &[Uuid]) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;

        for genre_id in genre_ids {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2) \
                 ON CONFLICT (book_id, genre_id) DO NOTHING",
            )
            .bind(book_id)
            .bind(genre_id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT b.id, b.title, \
                    COALESCE(a.family_name || ' ' || a.first_name, '') AS author_name \
             FROM books b \
             LEFT JOIN authors a ON a.id = b.author_id \
             ORDER BY b.title",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_refs(&self) -> AppResult<Vec<BookRef>> {
        let rows = sqlx::query_as::<_, BookRef>("SELECT id, title FROM books ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookDetails>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(book) = book else {
            return Ok(None);
        };

        let author = sqlx::query_as::<_, Author>(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death \
             FROM authors WHERE id = $1",
        )
        .bind(book.author_id)
        .fetch_optional(&self.pool)
        .await?;

        let genres = sqlx::query_as::<_, Genre>(
            "SELECT g.id, g.name FROM genres g \
             JOIN book_genres bg ON bg.genre_id = g.id \
             WHERE bg.book_id = $1 ORDER BY g.name",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(BookDetails {
            book,
            author,
            genres,
        }))
    }

    async fn find_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT b.id, b.title, \
                    COALESCE(a.family_name || ' ' || a.first_name, '') AS author_name \
             FROM books b \
             JOIN book_genres bg ON bg.book_id = b.id \
             LEFT JOIN authors a ON a.id = b.author_id \
             WHERE bg.genre_id = $1 \
             ORDER BY b.title",
        )
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_author(&self, author_id: Uuid) -> AppResult<Vec<BookSummary>> {
        let rows = sqlx::query_as::<_, BookSummary>(
            "SELECT b.id, b.title, \
                    COALESCE(a.family_name || ' ' || a.first_name, '') AS author_name \
             FROM books b \
             LEFT JOIN authors a ON a.id = b.author_id \
             WHERE b.author_id = $1 \
             ORDER BY b.title",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, draft: BookDraft) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author_id, summary, isbn) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, title, author_id, summary, isbn",
        )
        .bind(&draft.title)
        .bind(draft.author_id)
        .bind(&draft.summary)
        .bind(&draft.isbn)
        .fetch_one(&self.pool)
        .await?;

        self.sync_genres(book.id, &draft.genre_ids).await?;

        Ok(book)
    }

    async fn update(&self, id: Uuid, draft: BookDraft) -> AppResult<()> {
        sqlx::query(
            "UPDATE books SET title = $1, author_id = $2, summary = $3, isbn = $4 \
             WHERE id = $5",
        )
        .bind(&draft.title)
        .bind(draft.author_id)
        .bind(&draft.summary)
        .bind(&draft.isbn)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.sync_genres(id, &draft.genre_ids).await?;

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
