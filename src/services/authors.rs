//! Author CRUD workflow

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::AuthorForm,
    models::{Author, BookSummary},
    repository::{AuthorStore, BookStore},
    views::Outcome,
};

#[derive(Clone)]
pub struct AuthorService {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self { authors, books }
    }

    /// List all authors, sorted by family name
    pub async fn list(&self) -> AppResult<Outcome> {
        let authors = self.authors.list().await?;
        Ok(Outcome::render(
            "author_list",
            json!({
                "title": "Author List",
                "author_list": authors.iter().map(Author::view).collect::<Vec<_>>(),
            }),
        ))
    }

    /// Author detail page with their books
    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome> {
        let (author, author_books) =
            tokio::try_join!(self.authors.find_by_id(id), self.books.find_by_author(id))?;

        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        Ok(Outcome::render(
            "author_detail",
            json!({
                "title": "Author Detail",
                "author": author.view(),
                "author_books": author_books.iter().map(BookSummary::view).collect::<Vec<_>>(),
            }),
        ))
    }

    pub async fn create_get(&self) -> AppResult<Outcome> {
        Ok(Outcome::render(
            "author_form",
            json!({ "title": "Create Author" }),
        ))
    }

    pub async fn create_post(&self, form: AuthorForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            return Ok(Outcome::render(
                "author_form",
                json!({
                    "title": "Create Author",
                    "author": form.echo(),
                    "errors": errors,
                }),
            ));
        }

        let author = self.authors.insert(form.to_draft()).await?;
        tracing::info!("Created author {} ({})", author.name(), author.id);
        Ok(Outcome::redirect(author.url()))
    }

    pub async fn update_get(&self, id: Uuid) -> AppResult<Outcome> {
        let author = self
            .authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        Ok(Outcome::render(
            "author_form",
            json!({
                "title": "Update Author",
                "author": author.view(),
            }),
        ))
    }

    pub async fn update_post(&self, id: Uuid, form: AuthorForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            return Ok(Outcome::render(
                "author_form",
                json!({
                    "title": "Update Author",
                    "author": form.echo(),
                    "errors": errors,
                }),
            ));
        }

        self.authors.update(id, form.to_draft()).await?;
        Ok(Outcome::redirect(format!("/catalog/author/{}", id)))
    }

    /// Delete confirmation page. A missing record is a soft no-op.
    pub async fn delete_get(&self, id: Uuid) -> AppResult<Outcome> {
        let (author, author_books) =
            tokio::try_join!(self.authors.find_by_id(id), self.books.find_by_author(id))?;

        let Some(author) = author else {
            return Ok(Outcome::redirect("/catalog/authors"));
        };

        Ok(Outcome::render(
            "author_delete",
            json!({
                "title": "Delete Author",
                "author": author.view(),
                "author_books": author_books.iter().map(BookSummary::view).collect::<Vec<_>>(),
            }),
        ))
    }

    /// Delete an author, refused while any book still references them.
    pub async fn delete_post(&self, id: Uuid) -> AppResult<Outcome> {
        let (author, author_books) =
            tokio::try_join!(self.authors.find_by_id(id), self.books.find_by_author(id))?;

        if !author_books.is_empty() {
            return Ok(Outcome::render(
                "author_delete",
                json!({
                    "title": "Delete Author",
                    "author": author.as_ref().map(Author::view),
                    "author_books": author_books.iter().map(BookSummary::view).collect::<Vec<_>>(),
                }),
            ));
        }

        self.authors.delete(id).await?;
        tracing::info!("Deleted author {}", id);
        Ok(Outcome::redirect("/catalog/authors"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockAuthorStore, MockBookStore};

    fn author() -> Author {
        Author {
            id: Uuid::new_v4(),
            first_name: "Ursula".to_string(),
            family_name: "Le Guin".to_string(),
            date_of_birth: None,
            date_of_death: None,
        }
    }

    fn service(authors: MockAuthorStore, books: MockBookStore) -> AuthorService {
        AuthorService::new(Arc::new(authors), Arc::new(books))
    }

    #[tokio::test]
    async fn test_create_with_empty_names_rerenders_with_errors() {
        let outcome = service(MockAuthorStore::new(), MockBookStore::new())
            .create_post(AuthorForm::default())
            .await
            .unwrap();

        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "author_form");
                let errors = data["errors"].as_array().unwrap();
                assert_eq!(errors.len(), 2);
                assert_eq!(data["author"]["first_name"], "");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_valid_author_redirects_to_detail() {
        let created = author();
        let url = created.url();

        let mut authors = MockAuthorStore::new();
        authors
            .expect_insert()
            .withf(|draft| draft.family_name == "Le Guin" && draft.date_of_birth.is_none())
            .returning(move |_| Ok(created.clone()));

        let outcome = service(authors, MockBookStore::new())
            .create_post(AuthorForm {
                first_name: "Ursula".to_string(),
                family_name: "Le Guin".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Redirect(url));
    }

    #[tokio::test]
    async fn test_delete_with_dependent_books_is_refused() {
        let target = author();
        let id = target.id;

        let mut authors = MockAuthorStore::new();
        let mut books = MockBookStore::new();
        authors
            .expect_find_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        books.expect_find_by_author().returning(|_| {
            Ok(vec![BookSummary {
                id: Uuid::new_v4(),
                title: "The Dispossessed".to_string(),
                author_name: "Le Guin Ursula".to_string(),
            }])
        });
        // No delete expectation: the author must survive.

        let outcome = service(authors, books).delete_post(id).await.unwrap();
        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "author_delete");
                assert_eq!(data["author_books"].as_array().unwrap().len(), 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_get_missing_author_redirects_to_list() {
        let mut authors = MockAuthorStore::new();
        let mut books = MockBookStore::new();
        authors.expect_find_by_id().returning(|_| Ok(None));
        books.expect_find_by_author().returning(|_| Ok(vec![]));

        let outcome = service(authors, books)
            .delete_get(Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Redirect("/catalog/authors".to_string()));
    }
}
