//! HTTP client for end-to-end tests
//!
//! A high-level client wrapping reqwest with one method per endpoint.
//! When API routes or request formats change, update only this file.

use reqwest::Response;
use serde_json::json;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 5;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn list_books(&self) -> Response {
        self.client
            .get(format!("{}/v1/books", self.base_url))
            .send()
            .await
            .expect("list books request failed")
    }

    pub async fn add_book(
        &self,
        title: &str,
        author: &str,
        publication_year: i32,
        genre: &str,
        read_status: bool,
    ) -> Response {
        self.client
            .post(format!("{}/v1/books", self.base_url))
            .json(&json!({
                "title": title,
                "author": author,
                "publication_year": publication_year,
                "genre": genre,
                "read_status": read_status,
            }))
            .send()
            .await
            .expect("add book request failed")
    }

    pub async fn remove_book(&self, title: &str) -> Response {
        self.client
            .delete(format!("{}/v1/books/{}", self.base_url, title))
            .send()
            .await
            .expect("remove book request failed")
    }

    pub async fn search_books(&self, field: &str, query: &str) -> Response {
        self.client
            .get(format!("{}/v1/books/search", self.base_url))
            .query(&[("field", field), ("q", query)])
            .send()
            .await
            .expect("search request failed")
    }

    pub async fn get_statistics(&self) -> Response {
        self.client
            .get(format!("{}/v1/stats", self.base_url))
            .send()
            .await
            .expect("statistics request failed")
    }

    pub async fn get_genre_distribution(&self) -> Response {
        self.client
            .get(format!("{}/v1/stats/genres", self.base_url))
            .send()
            .await
            .expect("genre distribution request failed")
    }

    pub async fn get_publication_timeline(&self) -> Response {
        self.client
            .get(format!("{}/v1/stats/timeline", self.base_url))
            .send()
            .await
            .expect("publication timeline request failed")
    }

    pub async fn get_recommendation(&self) -> Response {
        self.client
            .get(format!("{}/v1/recommendation", self.base_url))
            .send()
            .await
            .expect("recommendation request failed")
    }
}
