//! SQLite schema for the book catalog database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

/// Books table. `id` is the auto-incrementing integer primary key assigned
/// at insertion time; it stays internal to this backend and is never exposed
/// through the catalog operations.
const BOOKS_TABLE: Table = Table {
    name: "books",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("author", &SqlType::Text, non_null = true),
        sqlite_column!("publication_year", &SqlType::Integer, non_null = true),
        sqlite_column!("genre", &SqlType::Text, non_null = true),
        sqlite_column!("read_status", &SqlType::Integer, non_null = true),
    ],
    // Removal and title search both scan by title
    indices: &[("idx_books_title", "title")],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[BOOKS_TABLE],
}];
