//! Song recommendations.
//!
//! Two independent strategies answer the same question, "which songs are
//! similar to this (name, artist)?":
//!
//! - [`content::recommend`] ranks catalog rows by cosine similarity of their
//!   precomputed feature vectors.
//! - [`collaborative::recommend`] ranks tracks by cosine similarity of their
//!   rows in the tracks x users play count matrix.
//!
//! Both return up to `k + 1` records. The first one is always the queried
//! song itself ("now playing"), the rest are its neighbours by descending
//! similarity.

mod assemble;
pub mod collaborative;
pub mod content;
mod error;

pub use assemble::assemble;
pub use error::RecommendError;

use crate::catalog::Song;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Content,
    Collaborative,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Content => "content",
            Strategy::Collaborative => "collaborative",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommended song and its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSong {
    #[serde(flatten)]
    pub song: Song,
    pub similarity: f64,
}
