use serde::{Deserialize, Serialize};

/// One entry of the catalog: a single book's metadata and read state.
///
/// The serde field names are the persisted layout of the JSON file backend
/// and the wire format of the HTTP surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: String,
    pub read_status: bool,
}

/// Field a search query runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchField {
    /// Case-insensitive substring match on the title.
    Title,
    /// Case-insensitive substring match on the author.
    Author,
    /// Case-insensitive exact match on the genre.
    Genre,
}

impl SearchField {
    /// Parse the wire representation. Unknown values are `None`, which
    /// callers surface as an empty result rather than an error.
    pub fn parse(s: &str) -> Option<SearchField> {
        match s {
            "title" => Some(SearchField::Title),
            "author" => Some(SearchField::Author),
            "genre" => Some(SearchField::Genre),
            _ => None,
        }
    }
}
