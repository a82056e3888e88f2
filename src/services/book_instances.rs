//! BookInstance (copy) CRUD workflow

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::{parse_entity_id, BookInstanceForm},
    models::{BookInstanceDetails, BookRef},
    repository::{BookInstanceStore, BookStore},
    views::Outcome,
};

#[derive(Clone)]
pub struct BookInstanceService {
    instances: Arc<dyn BookInstanceStore>,
    books: Arc<dyn BookStore>,
}

impl BookInstanceService {
    pub fn new(instances: Arc<dyn BookInstanceStore>, books: Arc<dyn BookStore>) -> Self {
        Self { instances, books }
    }

    /// List all copies with their book titles
    pub async fn list(&self) -> AppResult<Outcome> {
        let instances = self.instances.list().await?;
        Ok(Outcome::render(
            "bookinstance_list",
            json!({
                "title": "Book Instance List",
                "bookinstance_list": instances
                    .iter()
                    .map(BookInstanceDetails::view)
                    .collect::<Vec<_>>(),
            }),
        ))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome> {
        let details = self
            .instances
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;

        Ok(Outcome::render(
            "bookinstance_detail",
            json!({
                "title": format!("Copy: {}", details.book.title),
                "bookinstance": details.view(),
            }),
        ))
    }

    /// Form choices: every book title plus the status strings already in use
    async fn form_choices(&self) -> AppResult<(Vec<BookRef>, Vec<String>)> {
        let (books, statuses) =
            tokio::try_join!(self.books.list_refs(), self.instances.distinct_statuses())?;
        Ok((books, statuses))
    }

    pub async fn create_get(&self) -> AppResult<Outcome> {
        let (books, statuses) = self.form_choices().await?;
        Ok(Outcome::render(
            "bookinstance_form",
            json!({
                "title": "Create BookInstance",
                "book_list": books.iter().map(BookRef::view).collect::<Vec<_>>(),
                "statuses": statuses,
            }),
        ))
    }

    pub async fn create_post(&self, form: BookInstanceForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            let (books, statuses) = self.form_choices().await?;
            return Ok(Outcome::render(
                "bookinstance_form",
                json!({
                    "title": "Create BookInstance",
                    "book_list": books.iter().map(BookRef::view).collect::<Vec<_>>(),
                    "selected_book": form.book,
                    "errors": errors,
                    "bookinstance": form.echo(),
                    "statuses": statuses,
                }),
            ));
        }

        let book_id = parse_entity_id(&form.book)?;
        let instance = self.instances.insert(form.to_draft(book_id)).await?;
        tracing::info!("Created book instance {}", instance.id);
        Ok(Outcome::redirect(instance.url()))
    }

    pub async fn update_get(&self, id: Uuid) -> AppResult<Outcome> {
        let (books, instance, statuses) = tokio::try_join!(
            self.books.list_refs(),
            self.instances.find_by_id(id),
            self.instances.distinct_statuses(),
        )?;

        let instance =
            instance.ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;

        Ok(Outcome::render(
            "bookinstance_form",
            json!({
                "title": "Updating Book Instance",
                "book_list": books.iter().map(BookRef::view).collect::<Vec<_>>(),
                "bookinstance": instance.view(),
                "statuses": statuses,
            }),
        ))
    }

    pub async fn update_post(&self, id: Uuid, form: BookInstanceForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            let (books, statuses) = self.form_choices().await?;
            return Ok(Outcome::render(
                "bookinstance_form",
                json!({
                    "title": "Updating BookInstance",
                    "book_list": books.iter().map(BookRef::view).collect::<Vec<_>>(),
                    "selected_book": form.book,
                    "errors": errors,
                    "bookinstance": form.echo(),
                    "statuses": statuses,
                }),
            ));
        }

        let book_id = parse_entity_id(&form.book)?;
        self.instances.update(id, form.to_draft(book_id)).await?;
        Ok(Outcome::redirect(format!("/catalog/bookinstance/{}", id)))
    }

    /// Delete confirmation page. A missing record is a soft no-op.
    pub async fn delete_get(&self, id: Uuid) -> AppResult<Outcome> {
        let Some(details) = self.instances.find_by_id(id).await? else {
            return Ok(Outcome::redirect("/catalog/bookinstances"));
        };

        Ok(Outcome::render(
            "bookinstance_delete",
            json!({
                "title": "Delete Book Instance",
                "bookinstance": details.view(),
            }),
        ))
    }

    /// Copies have no dependents; deletion is unconditional.
    pub async fn delete_post(&self, id: Uuid) -> AppResult<Outcome> {
        self.instances.delete(id).await?;
        tracing::info!("Deleted book instance {}", id);
        Ok(Outcome::redirect("/catalog/bookinstances"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookInstance;
    use crate::repository::{MockBookInstanceStore, MockBookStore};

    fn service(
        instances: MockBookInstanceStore,
        books: MockBookStore,
    ) -> BookInstanceService {
        BookInstanceService::new(Arc::new(instances), Arc::new(books))
    }

    #[tokio::test]
    async fn test_create_valid_instance_persists_and_redirects() {
        let book_id = Uuid::new_v4();
        let created = BookInstance {
            id: Uuid::new_v4(),
            book_id,
            imprint: "First Edition".to_string(),
            status: "Available".to_string(),
            due_back: None,
        };
        let url = created.url();

        let mut instances = MockBookInstanceStore::new();
        instances
            .expect_insert()
            .withf(move |draft| {
                draft.book_id == book_id
                    && draft.imprint == "First Edition"
                    && draft.status == "Available"
                    && draft.due_back.is_none()
            })
            .returning(move |_| Ok(created.clone()));

        let outcome = service(instances, MockBookStore::new())
            .create_post(BookInstanceForm {
                book: book_id.to_string(),
                imprint: "First Edition".to_string(),
                status: "Available".to_string(),
                due_back: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Redirect(url));
    }

    #[tokio::test]
    async fn test_create_with_missing_fields_rerenders_with_choices() {
        let mut instances = MockBookInstanceStore::new();
        let mut books = MockBookStore::new();
        books.expect_list_refs().returning(|| {
            Ok(vec![BookRef {
                id: Uuid::new_v4(),
                title: "The Name of the Wind".to_string(),
            }])
        });
        instances
            .expect_distinct_statuses()
            .returning(|| Ok(vec!["Available".to_string(), "On loan".to_string()]));
        // No insert expectation: nothing must be persisted.

        let outcome = service(instances, books)
            .create_post(BookInstanceForm::default())
            .await
            .unwrap();

        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "bookinstance_form");
                let errors = data["errors"].as_array().unwrap();
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0]["field"], "book");
                assert_eq!(errors[1]["field"], "imprint");
                assert_eq!(data["book_list"].as_array().unwrap().len(), 1);
                assert_eq!(data["statuses"].as_array().unwrap().len(), 2);
                assert_eq!(data["bookinstance"]["imprint"], "");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detail_missing_copy_is_not_found() {
        let mut instances = MockBookInstanceStore::new();
        instances.expect_find_by_id().returning(|_| Ok(None));

        let err = service(instances, MockBookStore::new())
            .detail(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Book copy not found"));
    }

    #[tokio::test]
    async fn test_delete_post_is_unconditional() {
        let id = Uuid::new_v4();
        let mut instances = MockBookInstanceStore::new();
        instances
            .expect_delete()
            .withf(move |got| *got == id)
            .returning(|_| Ok(()));

        let outcome = service(instances, MockBookStore::new())
            .delete_post(id)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            Outcome::Redirect("/catalog/bookinstances".to_string())
        );
    }
}
