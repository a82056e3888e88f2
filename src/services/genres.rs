//! Genre CRUD workflow

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    forms::GenreForm,
    models::{BookSummary, Genre},
    repository::{BookStore, GenreStore},
    views::Outcome,
};

#[derive(Clone)]
pub struct GenreService {
    genres: Arc<dyn GenreStore>,
    books: Arc<dyn BookStore>,
}

impl GenreService {
    pub fn new(genres: Arc<dyn GenreStore>, books: Arc<dyn BookStore>) -> Self {
        Self { genres, books }
    }

    /// List all genres, sorted by name
    pub async fn list(&self) -> AppResult<Outcome> {
        let genres = self.genres.list().await?;
        Ok(Outcome::render(
            "genre_list",
            json!({
                "title": "Genre List",
                "genre_list": genres.iter().map(Genre::view).collect::<Vec<_>>(),
            }),
        ))
    }

    /// Genre detail page with the books referencing it
    pub async fn detail(&self, id: Uuid) -> AppResult<Outcome> {
        let (genre, genre_books) =
            tokio::try_join!(self.genres.find_by_id(id), self.books.find_by_genre(id))?;

        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        Ok(Outcome::render(
            "genre_detail",
            json!({
                "title": "Genre Detail",
                "genre": genre.view(),
                "genre_books": genre_books.iter().map(BookSummary::view).collect::<Vec<_>>(),
            }),
        ))
    }

    pub async fn create_get(&self) -> AppResult<Outcome> {
        Ok(Outcome::render(
            "genre_form",
            json!({ "title": "Create Genre" }),
        ))
    }

    /// Create a genre. A name collision redirects to the existing record
    /// instead of inserting a duplicate.
    pub async fn create_post(&self, form: GenreForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            return Ok(Outcome::render(
                "genre_form",
                json!({
                    "title": "Create Genre",
                    "genre": form.echo(),
                    "errors": errors,
                }),
            ));
        }

        let draft = form.to_draft();
        if let Some(existing) = self.genres.find_by_name(&draft.name).await? {
            return Ok(Outcome::redirect(existing.url()));
        }

        let genre = self.genres.insert(draft).await?;
        tracing::info!("Created genre {} ({})", genre.name, genre.id);
        Ok(Outcome::redirect(genre.url()))
    }

    pub async fn update_get(&self, id: Uuid) -> AppResult<Outcome> {
        let genre = self
            .genres
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        Ok(Outcome::render(
            "genre_form",
            json!({
                "title": "Updating Genre",
                "genre": genre.view(),
            }),
        ))
    }

    pub async fn update_post(&self, id: Uuid, form: GenreForm) -> AppResult<Outcome> {
        let form = form.trimmed();
        let errors = form.field_errors();

        if !errors.is_empty() {
            return Ok(Outcome::render(
                "genre_form",
                json!({
                    "title": "Create Genre",
                    "genre": form.echo(),
                    "errors": errors,
                }),
            ));
        }

        let draft = form.to_draft();
        // TODO: exclude the record being updated from the duplicate check;
        // renaming a genre to its own current name redirects instead of
        // updating. Pending confirmation of the intended behavior.
        if let Some(existing) = self.genres.find_by_name(&draft.name).await? {
            return Ok(Outcome::redirect(existing.url()));
        }

        self.genres.update(id, draft).await?;
        Ok(Outcome::redirect(format!("/catalog/genre/{}", id)))
    }

    /// Delete confirmation page. A missing record is a soft no-op.
    pub async fn delete_get(&self, id: Uuid) -> AppResult<Outcome> {
        let (genre, genre_books) =
            tokio::try_join!(self.genres.find_by_id(id), self.books.find_by_genre(id))?;

        let Some(genre) = genre else {
            return Ok(Outcome::redirect("/catalog/genres"));
        };

        Ok(Outcome::render(
            "genre_delete",
            json!({
                "title": "Delete Genre",
                "genre": genre.view(),
                "genre_books": genre_books.iter().map(BookSummary::view).collect::<Vec<_>>(),
            }),
        ))
    }

    /// Delete a genre, refused while any book still references it.
    pub async fn delete_post(&self, id: Uuid) -> AppResult<Outcome> {
        let (genre, genre_books) =
            tokio::try_join!(self.genres.find_by_id(id), self.books.find_by_genre(id))?;

        if !genre_books.is_empty() {
            return Ok(Outcome::render(
                "genre_delete",
                json!({
                    "title": "Delete Genre",
                    "genre": genre.as_ref().map(Genre::view),
                    "genre_books": genre_books.iter().map(BookSummary::view).collect::<Vec<_>>(),
                }),
            ));
        }

        self.genres.delete(id).await?;
        tracing::info!("Deleted genre {}", id);
        Ok(Outcome::redirect("/catalog/genres"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockBookStore, MockGenreStore};

    fn genre(name: &str) -> Genre {
        Genre {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn service(genres: MockGenreStore, books: MockBookStore) -> GenreService {
        GenreService::new(Arc::new(genres), Arc::new(books))
    }

    #[tokio::test]
    async fn test_create_valid_genre_inserts_and_redirects() {
        let mut genres = MockGenreStore::new();
        let created = genre("Fantasy");
        let url = created.url();

        genres
            .expect_find_by_name()
            .withf(|name| name == "Fantasy")
            .returning(|_| Ok(None));
        genres
            .expect_insert()
            .withf(|draft| draft.name == "Fantasy")
            .returning(move |_| Ok(created.clone()));

        let outcome = service(genres, MockBookStore::new())
            .create_post(GenreForm {
                name: "Fantasy".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Redirect(url));
    }

    #[tokio::test]
    async fn test_create_duplicate_genre_redirects_to_existing() {
        let mut genres = MockGenreStore::new();
        let existing = genre("Fantasy");
        let url = existing.url();

        genres
            .expect_find_by_name()
            .withf(|name| name == "Fantasy")
            .returning(move |_| Ok(Some(existing.clone())));
        // No insert expectation: a second create must not persist anything.

        let outcome = service(genres, MockBookStore::new())
            .create_post(GenreForm {
                name: "Fantasy".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Redirect(url));
    }

    #[tokio::test]
    async fn test_create_invalid_genre_rerenders_form() {
        let outcome = service(MockGenreStore::new(), MockBookStore::new())
            .create_post(GenreForm {
                name: "Sf".to_string(),
            })
            .await
            .unwrap();

        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "genre_form");
                assert_eq!(data["genre"]["name"], "Sf");
                assert_eq!(data["errors"].as_array().unwrap().len(), 1);
                assert_eq!(data["errors"][0]["field"], "name");
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detail_missing_genre_is_not_found() {
        let mut genres = MockGenreStore::new();
        let mut books = MockBookStore::new();
        genres.expect_find_by_id().returning(|_| Ok(None));
        books.expect_find_by_genre().returning(|_| Ok(vec![]));

        let err = service(genres, books)
            .detail(Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Genre not found"));
    }

    #[tokio::test]
    async fn test_delete_with_dependent_books_rerenders_confirmation() {
        let target = genre("Fantasy");
        let id = target.id;

        let mut genres = MockGenreStore::new();
        let mut books = MockBookStore::new();
        genres
            .expect_find_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        books.expect_find_by_genre().returning(|_| {
            Ok(vec![BookSummary {
                id: Uuid::new_v4(),
                title: "The Fifth Season".to_string(),
                author_name: "Jemisin N.K.".to_string(),
            }])
        });
        // No delete expectation: the genre must survive.

        let outcome = service(genres, books).delete_post(id).await.unwrap();
        match outcome {
            Outcome::Render { view, data } => {
                assert_eq!(view, "genre_delete");
                assert_eq!(data["genre_books"].as_array().unwrap().len(), 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_without_dependents_deletes_and_redirects() {
        let target = genre("Fantasy");
        let id = target.id;

        let mut genres = MockGenreStore::new();
        let mut books = MockBookStore::new();
        genres
            .expect_find_by_id()
            .returning(move |_| Ok(Some(target.clone())));
        books.expect_find_by_genre().returning(|_| Ok(vec![]));
        genres
            .expect_delete()
            .withf(move |got| *got == id)
            .returning(|_| Ok(()));

        let outcome = service(genres, books).delete_post(id).await.unwrap();
        assert_eq!(outcome, Outcome::Redirect("/catalog/genres".to_string()));
    }

    #[tokio::test]
    async fn test_update_duplicate_name_redirects_without_updating() {
        let existing = genre("Fantasy");
        let url = existing.url();

        let mut genres = MockGenreStore::new();
        genres
            .expect_find_by_name()
            .returning(move |_| Ok(Some(existing.clone())));
        // No update expectation.

        let outcome = service(genres, MockBookStore::new())
            .update_post(
                Uuid::new_v4(),
                GenreForm {
                    name: "Fantasy".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Redirect(url));
    }
}
