//! Common test infrastructure
//!
//! This module provides everything the end-to-end tests need: a test server
//! spawned on a random port over an isolated temp-dir catalog, and a thin
//! HTTP client wrapping reqwest with one method per endpoint.

mod client;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use server::TestServer;
