//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, ROCK_1_NAME, BAND_A};
//!
//! #[tokio::test]
//! async fn test_content_recommendations() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.recommend("content", ROCK_1_NAME, BAND_A, 3).await;
//!     assert_eq!(response.status(), 200);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::TestClient;
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{create_test_data_dir, test_config};
#[allow(unused_imports)]
pub use server::TestServer;
