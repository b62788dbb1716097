mod file_store;
mod memory_store;
mod schema;
mod sqlite_store;
mod trait_def;

pub use file_store::JsonFileCatalogStore;
pub use memory_store::MemoryCatalogStore;
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use sqlite_store::SqliteCatalogStore;
pub use trait_def::{CatalogStore, StoreError};
