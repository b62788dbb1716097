use super::{Book, SearchField};
use crate::catalog_store::CatalogStore;
use anyhow::Result;
use rand::seq::IndexedRandom;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Aggregate counts derived from scanning the full catalog.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CatalogStatistics {
    pub total_books: usize,
    /// Share of read books in percent, rounded to one decimal.
    /// Defined as `0.0` for an empty catalog.
    pub percent_read: f64,
}

/// The managed collection of book records and its operations.
///
/// Holds the ordered sequence in memory and flushes every mutation through
/// the storage backend before updating the sequence, so memory and storage
/// never diverge on a failed write.
pub struct Catalog {
    books: Vec<Book>,
    store: Box<dyn CatalogStore>,
}

impl Catalog {
    /// Load the catalog from a storage backend. Backends report a
    /// never-saved catalog as empty; any other storage error is fatal here.
    pub fn open(store: Box<dyn CatalogStore>) -> Result<Catalog> {
        let books = store.load_books()?;
        Ok(Catalog { books, store })
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a book to the end of the sequence. No validation happens at
    /// this layer; the calling surface rejects empty titles/authors.
    pub fn add(&mut self, book: Book) -> Result<()> {
        self.store.insert_book(&book)?;
        self.books.push(book);
        Ok(())
    }

    /// Remove every book whose title is exactly equal to `title`,
    /// case-sensitive. Returns the number of removed records; zero matches
    /// is not an error.
    pub fn remove_by_title(&mut self, title: &str) -> Result<usize> {
        let removed = self.store.remove_books_by_title(title)?;
        self.books.retain(|book| book.title != title);
        Ok(removed)
    }

    /// Search with the wire representation of the field name. Unknown
    /// fields yield an empty result rather than an error.
    pub fn search(&self, field: &str, query: &str) -> Vec<Book> {
        match SearchField::parse(field) {
            Some(field) => self.search_by(field, query),
            None => Vec::new(),
        }
    }

    /// Matches are returned in catalog order.
    pub fn search_by(&self, field: SearchField, query: &str) -> Vec<Book> {
        let query = query.to_lowercase();
        self.books
            .iter()
            .filter(|book| match field {
                SearchField::Title => book.title.to_lowercase().contains(&query),
                SearchField::Author => book.author.to_lowercase().contains(&query),
                SearchField::Genre => book.genre.to_lowercase() == query,
            })
            .cloned()
            .collect()
    }

    /// The full ordered sequence, unfiltered.
    pub fn list_all(&self) -> &[Book] {
        &self.books
    }

    pub fn statistics(&self) -> CatalogStatistics {
        let total_books = self.books.len();
        let read_books = self.books.iter().filter(|book| book.read_status).count();
        let percent_read = if total_books > 0 {
            (read_books as f64 / total_books as f64 * 1000.0).round() / 10.0
        } else {
            0.0
        };
        CatalogStatistics {
            total_books,
            percent_read,
        }
    }

    /// Count of books per genre, over all distinct genres present.
    /// Key order is unspecified.
    pub fn genre_distribution(&self) -> HashMap<String, usize> {
        let mut distribution = HashMap::new();
        for book in &self.books {
            *distribution.entry(book.genre.clone()).or_insert(0) += 1;
        }
        distribution
    }

    /// Count of books per publication year, sorted by year.
    pub fn publication_timeline(&self) -> BTreeMap<i32, usize> {
        let mut timeline = BTreeMap::new();
        for book in &self.books {
            *timeline.entry(book.publication_year).or_insert(0) += 1;
        }
        timeline
    }

    /// Pick one unread book uniformly at random. `None` when every book has
    /// been read; callers surface that as "no recommendation available".
    pub fn recommend(&self) -> Option<&Book> {
        let unread: Vec<&Book> = self
            .books
            .iter()
            .filter(|book| !book.read_status)
            .collect();
        unread.choose(&mut rand::rng()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::MemoryCatalogStore;

    fn book(title: &str, author: &str, year: i32, genre: &str, read: bool) -> Book {
        Book {
            title: title.to_owned(),
            author: author.to_owned(),
            publication_year: year,
            genre: genre.to_owned(),
            read_status: read,
        }
    }

    fn empty_catalog() -> Catalog {
        Catalog::open(Box::new(MemoryCatalogStore::new())).unwrap()
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = empty_catalog();
        catalog
            .add(book("Dune", "Frank Herbert", 1965, "Sci-Fi", true))
            .unwrap();
        catalog
            .add(book("The Hobbit", "J.R.R. Tolkien", 1937, "Fantasy", false))
            .unwrap();
        catalog
            .add(book("Neuromancer", "William Gibson", 1984, "Sci-Fi", true))
            .unwrap();
        catalog
    }

    #[test]
    fn list_all_preserves_insertion_order() {
        let catalog = sample_catalog();
        let titles: Vec<&str> = catalog
            .list_all()
            .iter()
            .map(|book| book.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Dune", "The Hobbit", "Neuromancer"]);
        assert_eq!(catalog.list_all().len(), catalog.statistics().total_books);
    }

    #[test]
    fn remove_by_title_removes_all_exact_matches() {
        let mut catalog = sample_catalog();
        catalog
            .add(book("Dune", "Frank Herbert", 1965, "Sci-Fi", false))
            .unwrap();

        let removed = catalog.remove_by_title("Dune").unwrap();

        assert_eq!(removed, 2);
        assert!(catalog.search("title", "Dune").is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn remove_by_title_is_case_sensitive_and_exact() {
        let mut catalog = sample_catalog();

        assert_eq!(catalog.remove_by_title("dune").unwrap(), 0);
        assert_eq!(catalog.remove_by_title("Dun").unwrap(), 0);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn search_title_is_case_insensitive_substring() {
        let catalog = sample_catalog();

        let matches = catalog.search("title", "hobbit");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "The Hobbit");
    }

    #[test]
    fn search_author_matches_tolkien_by_fragment() {
        let catalog = sample_catalog();

        let matches = catalog.search("author", "tolk");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].author, "J.R.R. Tolkien");
    }

    #[test]
    fn search_genre_is_exact_match() {
        let catalog = sample_catalog();

        assert_eq!(catalog.search("genre", "sci-fi").len(), 2);
        // Substring is not enough for genre
        assert!(catalog.search("genre", "sci").is_empty());
    }

    #[test]
    fn search_unknown_field_yields_empty_result() {
        let catalog = sample_catalog();

        assert!(catalog.search("isbn", "Dune").is_empty());
    }

    #[test]
    fn search_preserves_catalog_order() {
        let catalog = sample_catalog();

        let titles: Vec<String> = catalog
            .search("genre", "Sci-Fi")
            .into_iter()
            .map(|book| book.title)
            .collect();
        assert_eq!(titles, vec!["Dune", "Neuromancer"]);
    }

    #[test]
    fn statistics_on_empty_catalog() {
        let stats = empty_catalog().statistics();
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.percent_read, 0.0);
    }

    #[test]
    fn statistics_rounds_percent_to_one_decimal() {
        let stats = sample_catalog().statistics();
        assert_eq!(stats.total_books, 3);
        assert_eq!(stats.percent_read, 66.7);
    }

    #[test]
    fn genre_distribution_counts_distinct_genres() {
        let mut catalog = empty_catalog();
        for genre in ["Sci-Fi", "Sci-Fi", "Mystery"] {
            catalog
                .add(book("Some Book", "Someone", 2000, genre, false))
                .unwrap();
        }

        let distribution = catalog.genre_distribution();
        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution["Sci-Fi"], 2);
        assert_eq!(distribution["Mystery"], 1);
    }

    #[test]
    fn publication_timeline_counts_per_year() {
        let catalog = sample_catalog();

        let timeline = catalog.publication_timeline();
        assert_eq!(timeline[&1937], 1);
        assert_eq!(timeline[&1965], 1);
        assert_eq!(timeline[&1984], 1);

        let years: Vec<i32> = timeline.keys().copied().collect();
        assert_eq!(years, vec![1937, 1965, 1984]);
    }

    #[test]
    fn recommend_never_returns_a_read_book() {
        let catalog = sample_catalog();

        for _ in 0..50 {
            let recommended = catalog.recommend().unwrap();
            assert!(!recommended.read_status);
            assert_eq!(recommended.title, "The Hobbit");
        }
    }

    #[test]
    fn recommend_on_fully_read_catalog_is_none() {
        let mut catalog = empty_catalog();
        catalog
            .add(book("Dune", "Frank Herbert", 1965, "Sci-Fi", true))
            .unwrap();

        assert!(catalog.recommend().is_none());
        assert!(empty_catalog().recommend().is_none());
    }
}
