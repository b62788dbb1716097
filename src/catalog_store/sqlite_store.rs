//! SQLite-backed catalog store implementation.

use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::catalog::Book;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// SQLite-backed catalog store.
///
/// One row per book; rows are returned ordered by the auto-incrementing
/// primary key, which preserves insertion order.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

fn create_or_validate_schema(conn: &Connection) -> Result<()> {
    let latest_schema = &CATALOG_VERSIONED_SCHEMAS[CATALOG_VERSIONED_SCHEMAS.len() - 1];

    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if table_count == 0 {
        // Brand new database
        info!(
            "Creating catalog db schema at version {}",
            latest_schema.version
        );
        latest_schema.create(conn)?;
        return Ok(());
    }

    latest_schema
        .validate(conn)
        .context("Catalog database does not match the expected schema")
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<SqliteCatalogStore> {
        let conn = Connection::open_with_flags(
            db_path.as_ref(),
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .context("Failed to open catalog database")?;

        create_or_validate_schema(&conn)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        let book_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM books", [], |r| r.get(0))
            .unwrap_or(0);
        info!("Opened SQLite catalog: {} books", book_count);

        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn load_books(&self) -> Result<Vec<Book>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "SELECT title, author, publication_year, genre, read_status FROM books ORDER BY id",
        )?;
        let books = stmt
            .query_map([], |row| {
                Ok(Book {
                    title: row.get(0)?,
                    author: row.get(1)?,
                    publication_year: row.get(2)?,
                    genre: row.get(3)?,
                    read_status: row.get::<_, i32>(4)? != 0,
                })
            })?
            .collect::<Result<Vec<Book>, _>>()?;
        Ok(books)
    }

    fn insert_book(&self, book: &Book) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached(
            "INSERT INTO books (title, author, publication_year, genre, read_status)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        stmt.execute(params![
            book.title,
            book.author,
            book.publication_year,
            book.genre,
            book.read_status as i32
        ])?;
        Ok(())
    }

    fn remove_books_by_title(&self, title: &str) -> Result<usize> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare_cached("DELETE FROM books WHERE title = ?1")?;
        Ok(stmt.execute(params![title])?)
    }
}
