//! Book instances (physical copies) repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{BookInstance, BookInstanceDetails, BookInstanceDraft, BookRef},
};

use super::BookInstanceStore;

/// Flat row for instance queries with the book title joined in
#[derive(FromRow)]
struct InstanceRow {
    id: Uuid,
    book_id: Uuid,
    imprint: String,
    status: String,
    due_back: Option<NaiveDate>,
    book_title: String,
}

impl From<InstanceRow> for BookInstanceDetails {
    fn from(row: InstanceRow) -> Self {
        BookInstanceDetails {
            book: BookRef {
                id: row.book_id,
                title: row.book_title,
            },
            instance: BookInstance {
                id: row.id,
                book_id: row.book_id,
                imprint: row.imprint,
                status: row.status,
                due_back: row.due_back,
            },
        }
    }
}

const INSTANCE_SELECT: &str =
    "SELECT bi.id, bi.book_id, bi.imprint, bi.status, bi.due_back, \
            COALESCE(b.title, '') AS book_title \
     FROM book_instances bi \
     LEFT JOIN books b ON b.id = bi.book_id";

#[derive(Clone)]
pub struct BookInstancesRepository {
    pool: Pool<Postgres>,
}

impl BookInstancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookInstanceStore for BookInstancesRepository {
    async fn list(&self) -> AppResult<Vec<BookInstanceDetails>> {
        let rows = sqlx::query_as::<_, InstanceRow>(&format!(
            "{} ORDER BY b.title, bi.imprint",
            INSTANCE_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BookInstanceDetails>> {
        let row = sqlx::query_as::<_, InstanceRow>(&format!("{} WHERE bi.id = $1", INSTANCE_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query_as::<_, BookInstance>(
            "SELECT id, book_id, imprint, status, due_back \
             FROM book_instances WHERE book_id = $1 ORDER BY imprint",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn distinct_statuses(&self) -> AppResult<Vec<String>> {
        let statuses: Vec<String> =
            sqlx::query_scalar("SELECT DISTINCT status FROM book_instances ORDER BY status")
                .fetch_all(&self.pool)
                .await?;
        Ok(statuses)
    }

    async fn insert(&self, draft: BookInstanceDraft) -> AppResult<BookInstance> {
        let instance = sqlx::query_as::<_, BookInstance>(
            "INSERT INTO book_instances (book_id, imprint, status, due_back) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, book_id, imprint, status, due_back",
        )
        .bind(draft.book_id)
        .bind(&draft.imprint)
        .bind(&draft.status)
        .bind(draft.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(instance)
    }

    async fn update(&self, id: Uuid, draft: BookInstanceDraft) -> AppResult<()> {
        sqlx::query(
            "UPDATE book_instances SET book_id = $1, imprint = $2, status = $3, due_back = $4 \
             WHERE id = $5",
        )
        .bind(draft.book_id)
        .bind(&draft.imprint)
        .bind(&draft.status)
        .bind(draft.due_back)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_status(&self, status: &str) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
                .bind(status)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
