use super::trait_def::CatalogStore;
use crate::catalog::Book;
use anyhow::Result;
use std::sync::Mutex;

/// In-memory catalog store.
///
/// Used by tests and for running without persistence; contents are lost
/// when the process exits.
#[derive(Default)]
pub struct MemoryCatalogStore {
    books: Mutex<Vec<Book>>,
}

impl MemoryCatalogStore {
    pub fn new() -> MemoryCatalogStore {
        MemoryCatalogStore::default()
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load_books(&self) -> Result<Vec<Book>> {
        Ok(self.books.lock().unwrap().clone())
    }

    fn insert_book(&self, book: &Book) -> Result<()> {
        self.books.lock().unwrap().push(book.clone());
        Ok(())
    }

    fn remove_books_by_title(&self, title: &str) -> Result<usize> {
        let mut books = self.books.lock().unwrap();
        let count_before = books.len();
        books.retain(|book| book.title != title);
        Ok(count_before - books.len())
    }
}
