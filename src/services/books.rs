//! Book CRUD workflow and the catalog home page

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::BookForm,
    models::{Author, BookInstance, BookSummary, Genre},
    repository::{AuthorStore, BookInstanceStore, BookStore, GenreStore},
    views::Outcome,
};

#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
    genres: Arc<dyn GenreStore>,
    instances: Arc<dyn BookInstanceStore>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookStore>,
        authors: Arc<dyn AuthorStore>,
        genres: Arc<dyn GenreStore>,
        instances: Arc<dyn BookInstanceStore>,
    ) -> Self {
        Self {
            books,
            authors,
            genres,
            instances,
        }
    }

    /// Catalog home page: record counts across all collections
    pub async fn index(&self) -> AppResult<Outcome> {
        let (book_count, instance_count, available_count, author_count, genre_count) = tokio::try_join!(
            self.books.count(),
            self.instances.count(),
            self.instances.count_by_status("Available"),
            self.authors.count(),
            self.genres.count(),
        )?;

        Ok(Outcome::render(
            "index",
            json!({
                "title": "Local Library Home",
                "data": {
                    "book_count": book_count,
                    "book_instance_count": instance_count,
                    "book_instance_available_count": available_count,
                    "author_count": author_count,
                    "genre_count": genre_count,
                },
            }),
        ))
    }

    /// List all books with author names, sorted by title
    pub async fn list(&self) -> AppResult<Outcome> {
        let books = self.books.list().await?;
        Ok(Outcome::render(
            "book_list",
            json!({
                "title": "Book List",
                "book_list": books.iter().map(BookSummary::view).collect::<Vec<_>>(),
            }),
        ))
    }

    /// Book detail page with its copies
    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome> {
        let (details, book_instances) =
            tokio::try_join!(self.books.find_by_id(id), self.instances.find_by_book(id))?;

        let details = details.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        Ok(Outcome::render(
            "book_detail",
            json!({
                "title": details.book.title.clone(),
                "book": details.view(),
                "book_instances": book_instances
                    .iter()
                    .map(BookInstance::view)
                    .collect::<Vec<_>>(),
            }),
        ))
    }

    /// Form choices: every author and genre
    async fn form_choices(&self) -> AppResult<(Vec<Author>, Vec<Genre>)> {
        let (authors, genres) = tokio::try_join!(self.authors.list(), self.genres.list())?;
        Ok((authors, genres))
    }

    pub async fn create_get(&self) -> AppResult<Outcome> {
        let (authors, genres) = self.form_choices().await?;
        Ok(Outcome::render(
            "book_form",
            json!({
                "title": "Create Book",
                "authors": authors.iter().map(Author::view).collect::<Vec<_>>(),
                "genres": genres.iter().map(Genre::view).collect::<Vec<_>>(),
            }),
        ))
    }

    pub async fn create_post(&self, form: BookForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            let (authors, genres) = self.form_choices().await?;
            return Ok(Outcome::render(
                "book_form",
                json!({
                    "title": "Create Book",
                    "authors": authors.iter().map(Author::view).collect::<Vec<_>>(),
                    "genres": genres.iter().map(Genre::view).collect::<Vec<_>>(),
                    "book": form.echo(),
                    "selected_genres": form.genre,
                    "errors": errors,
                }),
            ));
        }

        let book = self.books.insert(form.to_draft()?).await?;
        tracing::info!("Created book {} ({})", book.title, book.id);
        Ok(Outcome::redirect(book.url()))
    }

    pub async fn update_get(&self, id: Uuid) -> AppResult<Outcome> {
        let (details, authors, genres) = tokio::try_join!(
            self.books.find_by_id(id),
            self.authors.list(),
            self.genres.list(),
        )?;

        let details = details.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        let selected: Vec<Uuid> = details.genres.iter().map(|g| g.id).collect();

        Ok(Outcome::render(
            "book_form",
            json!({
                "title": "Update Book",
                "authors": authors.iter().map(Author::view).collect::<Vec<_>>(),
                "genres": genres.iter().map(Genre::view).collect::<Vec<_>>(),
                "book": details.view(),
                "selected_genres": selected,
            }),
        ))
    }

    pub async fn update_post(&self, id: Uuid, form: BookForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            let (authors, genres) = self.form_choices().await?;
            return Ok(Outcome::render(
                "book_form",
                json!({
                    "title": "Update Book",
                    "authors": authors.iter().map(Author::view).collect::<Vec<_>>(),
                    "genres": genres.iter().map(Genre::view).collect::<Vec<_>>(),
                    "book": form.echo(),
                    "selected_genres": form.genre,
                    "errors": errors,
                }),
            ));
        }

        self.books.update(id, form.to_draft()?).await?;
        Ok(Outcome::redirect(format!("/catalog/book/{}", id)))
    }

    /// Delete confirmation page. A missing record is a soft no-op.
    pub async fn delete_get(&self, id: Uuid) -> AppResult<Outcome> {
        let (details, book_instances) =
            tokio::try_join!(self.books.find_by_id(id), self.instances.find_by_book(id))?;

        let Some(details) = details else {
            return Ok(Outcome::redirect("/catalog/books"));
        };

        Ok(Outcome::render(
            "book_delete",
            json!({
                "title": "Delete Book",
                "book": details.view(),
                "book_instances": book_instances
                    .iter()
                    .map(BookInstance::view)
                    .collect::<Vec<_>>(),
            }),
        ))
    }

    /// Delete a book, refused while any copy of it still exists.
    pub async fn delete_post(&self, id: Uuid) -> AppResult<Outcome> {
        let (details, book_instances) =
            tokio::try_join!(self.books.find_by_id(id), self.instances.find_by_book(id))?;

        if !book_instances.is_empty() {
            return Ok(Outcome::render(
                "book_delete",
                json!({
                    "title": "Delete Book",
                    "book": details.map(|d| d.view()),
                    "book_instances": book_instances
                        .iter()
                        .map(BookInstance::view)
                        .collect::<Vec<_>>(),
                }),
            ));
        }

        self.books.delete(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(Outcome::redirect("/catalog/books"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Book, BookDetails};
    use crate::repository::{
        MockAuthorStore, MockBookInstanceStore, MockBookStore, MockGenreStore,
    };

    fn service(
        books: MockBookStore,
        authors: MockAuthorStore,
        genres: MockGenreStore,
        instances: MockBookInstanceStore,
    ) -> BookService {
        BookService::new(
            Arc::new(books),
            Arc::new(authors),
            Arc::new(genres),
            Arc::new(instances),
        )
    }

    fn details(id: Uuid) -> BookDetails {
        BookDetails {
            book: Book {
                id,
                title: "The Tombs of Atuan".to_string(),
                author_id: Uuid::new_v4(),
                summary: "Tenar serves the Nameless Ones.".to_string(),
                isbn: "9780689845369".to_string(),
            },
            author: None,
            genres: vec![],
        }
    }

    #[tokio::test]
    async fn test_index_joins_all_counts() {
        let mut books = MockBookStore::new();
        let mut authors = MockAuthorStore::new();
        let mut genres = MockGenreStore::new();
        let mut instances = MockBookInstanceStore::new();
        books.expect_count().returning(|| Ok(4));
        instances.expect_count().returning(|| Ok(7));
        instances
            .expect_count_by_status()
            .withf(|s| s == "Available")
            .returning(|_| Ok(3));
        authors.expect_count().returning(|| Ok(2));
        genres.expect_count().returning(|| Ok(5));

        let outcome = service(books, authors, genres, instances)
            .index()
            .await
            .unwrap();
        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "index");
                assert_eq!(data["data"]["book_count"], 4);
                assert_eq!(data["data"]["book_instance_available_count"], 3);
                assert_eq!(data["data"]["genre_count"], 5);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_with_copies_is_refused() {
        let id = Uuid::new_v4();
        let mut books = MockBookStore::new();
        let mut instances = MockBookInstanceStore::new();
        books
            .expect_find_by_id()
            .returning(move |got| Ok(Some(details(got))));
        instances.expect_find_by_book().returning(move |book_id| {
            Ok(vec![BookInstance {
                id: Uuid::new_v4(),
                book_id,
                imprint: "First Edition".to_string(),
                status: "On loan".to_string(),
                due_back: None,
            }])
        });
        // No delete expectation: the book must survive.

        let outcome = service(
            books,
            MockAuthorStore::new(),
            MockGenreStore::new(),
            instances,
        )
        .delete_post(id)
        .await
        .unwrap();

        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "book_delete");
                assert_eq!(data["book_instances"].as_array().unwrap().len(), 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_invalid_book_refetches_choices() {
        let mut authors = MockAuthorStore::new();
        let mut genres = MockGenreStore::new();
        authors.expect_list().returning(|| Ok(vec![]));
        genres.expect_list().returning(|| {
            Ok(vec![Genre {
                id: Uuid::new_v4(),
                name: "Fantasy".to_string(),
            }])
        });

        let outcome = service(
            MockBookStore::new(),
            authors,
            genres,
            MockBookInstanceStore::new(),
        )
        .create_post(BookForm::default())
        .await
        .unwrap();

        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "book_form");
                assert_eq!(data["errors"].as_array().unwrap().len(), 4);
                assert_eq!(data["genres"].as_array().unwrap().len(), 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
