//! HTTP client for end-to-end tests
//!
//! This module provides a thin wrapper around reqwest with one method per
//! recommender endpoint.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use std::time::Duration;

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

    pub async fn home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    /// GET /v1/recommendations/{strategy}?song=..&artist=..&k=..
    pub async fn recommend(&self, strategy: &str, song: &str, artist: &str, k: usize) -> Response {
        let k = k.to_string();
        self.client
            .get(format!("{}/v1/recommendations/{}", self.base_url, strategy))
            .query(&[("song", song), ("artist", artist), ("k", k.as_str())])
            .send()
            .await
            .expect("Recommendation request failed")
    }

    /// Same as `recommend` but lets the server pick `k`.
    pub async fn recommend_default_k(&self, strategy: &str, song: &str, artist: &str) -> Response {
        self.client
            .get(format!("{}/v1/recommendations/{}", self.base_url, strategy))
            .query(&[("song", song), ("artist", artist)])
            .send()
            .await
            .expect("Recommendation request failed")
    }
}
