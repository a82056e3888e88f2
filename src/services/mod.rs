//! Record controllers: one service per entity, each implementing the shared
//! list / detail / create / update / delete workflow over the store traits.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod genres;

use std::sync::Arc;

use crate::repository::{
    AuthorStore, BookInstanceStore, BookStore, GenreStore, Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorService,
    pub genres: genres::GenreService,
    pub books: books::BookService,
    pub book_instances: book_instances::BookInstanceService,
}

impl Services {
    /// Create all services backed by the given repository
    pub fn new(repository: Repository) -> Self {
        let authors: Arc<dyn AuthorStore> = Arc::new(repository.authors.clone());
        let genres: Arc<dyn GenreStore> = Arc::new(repository.genres.clone());
        let books: Arc<dyn BookStore> = Arc::new(repository.books.clone());
        let instances: Arc<dyn BookInstanceStore> = Arc::new(repository.book_instances.clone());

        Self {
            authors: authors::AuthorService::new(authors.clone(), books.clone()),
            genres: genres::GenreService::new(genres.clone(), books.clone()),
            books: books::BookService::new(
                books.clone(),
                authors,
                genres,
                instances.clone(),
            ),
            book_instances: book_instances::BookInstanceService::new(instances, books),
        }
    }
}
