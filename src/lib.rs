//! Pezzottify Recommender Library
//!
//! Song recommendations from a cleaned catalog with precomputed feature
//! vectors (content based) and from a listening history (collaborative).
//! The library holds the offline build pipeline, the two recommenders and
//! the HTTP API; the `recommender` binary wires them to a command line.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod interactions;
pub mod pipeline;
pub mod recommend;
pub mod server;
pub mod similarity;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, Song, SongKey};
pub use dataset::{CollaborativeDataset, ContentDataset, DatasetError, Datasets};
pub use recommend::{RecommendError, ScoredSong, Strategy};
pub use server::{run_server, RequestsLoggingLevel};
