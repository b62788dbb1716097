//! CatalogStore trait definition.
//!
//! This trait abstracts catalog persistence so the rest of the crate works
//! with the JSON file backend, the SQLite backend, or the in-memory backend
//! transparently.

use crate::catalog::Book;
use anyhow::Result;
use thiserror::Error;

/// Errors raised by catalog storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt catalog data: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Trait for catalog storage backends.
pub trait CatalogStore: Send + Sync {
    /// Load the full ordered sequence of books.
    ///
    /// A backend whose underlying storage has never been written loads the
    /// empty catalog; any other failure propagates.
    fn load_books(&self) -> Result<Vec<Book>>;

    /// Persist a newly added book at the end of the sequence.
    fn insert_book(&self, book: &Book) -> Result<()>;

    /// Remove every stored book whose title is exactly equal to `title`.
    /// Returns the number of removed records; zero matches is not an error.
    fn remove_books_by_title(&self, title: &str) -> Result<usize>;
}
