use super::trait_def::{CatalogStore, StoreError};
use crate::catalog::Book;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::info;

/// JSON file backed catalog store.
///
/// The whole collection lives in one flat file as a JSON array of books. It
/// is loaded in full at startup and the file is rewritten in full after
/// every mutation; there is no incremental update.
pub struct JsonFileCatalogStore {
    file_path: PathBuf,
    books: Mutex<Vec<Book>>,
}

impl JsonFileCatalogStore {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Result<JsonFileCatalogStore> {
        let file_path = file_path.as_ref().to_path_buf();
        let books = Self::load_from_file(&file_path)
            .with_context(|| format!("Failed to open catalog file {:?}", file_path))?;
        info!(
            "Opened JSON catalog at {:?}: {} books",
            file_path,
            books.len()
        );
        Ok(JsonFileCatalogStore {
            file_path,
            books: Mutex::new(books),
        })
    }

    fn load_from_file(file_path: &Path) -> Result<Vec<Book>, StoreError> {
        let mut file = match File::open(file_path) {
            Ok(file) => file,
            // A catalog that was never saved is just empty.
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut content = String::new();
        file.read_to_string(&mut content)?;

        serde_json::from_str(&content).map_err(|err| StoreError::Corrupt(err.to_string()))
    }

    fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        let json_string = serde_json::to_string_pretty(books)
            .map_err(|err| StoreError::Corrupt(err.to_string()))?;
        let mut file = File::create(&self.file_path)?;
        file.write_all(json_string.as_bytes())?;
        Ok(())
    }
}

impl CatalogStore for JsonFileCatalogStore {
    fn load_books(&self) -> Result<Vec<Book>> {
        Ok(self.books.lock().unwrap().clone())
    }

    fn insert_book(&self, book: &Book) -> Result<()> {
        let mut books = self.books.lock().unwrap();
        books.push(book.clone());
        self.save(&books)?;
        Ok(())
    }

    fn remove_books_by_title(&self, title: &str) -> Result<usize> {
        let mut books = self.books.lock().unwrap();
        let count_before = books.len();
        books.retain(|book| book.title != title);
        let removed = count_before - books.len();
        if removed > 0 {
            self.save(&books)?;
        }
        Ok(removed)
    }
}
