//! Loaded, validated datasets.
//!
//! Each recommender works on an explicit handle built once at startup and
//! shared read-only afterwards. Handles are only constructible through the
//! checks below, so a recommender never sees a feature matrix that disagrees
//! with its catalog or a track id array that disagrees with its matrix.

pub mod artifacts;
mod error;

pub use error::DatasetError;

use crate::catalog::{load_catalog, Catalog};
use crate::config::AppConfig;
use crate::interactions::InteractionMatrix;
use crate::recommend::{self, RecommendError, ScoredSong, Strategy};
use anyhow::{bail, Context, Result};
use sprs::CsMat;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Catalog plus the feature matrix whose row `i` describes catalog row `i`.
#[derive(Debug, Clone)]
pub struct ContentDataset {
    catalog: Catalog,
    features: CsMat<f64>,
}

impl ContentDataset {
    pub fn new(catalog: Catalog, features: CsMat<f64>) -> Result<Self, DatasetError> {
        if features.rows() != catalog.len() {
            return Err(DatasetError::RowCountMismatch {
                matrix_rows: features.rows(),
                catalog_rows: catalog.len(),
            });
        }
        let features = if features.is_csr() {
            features
        } else {
            features.to_csr()
        };
        Ok(ContentDataset { catalog, features })
    }

    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        catalog_path: P,
        features_path: Q,
    ) -> Result<Self, DatasetError> {
        let catalog = load_catalog(catalog_path)?;
        let features = artifacts::read_matrix(features_path)?;
        info!(
            "Loaded {}x{} feature matrix with {} stored values",
            features.rows(),
            features.cols(),
            features.nnz()
        );
        Self::new(catalog, features)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn features(&self) -> &CsMat<f64> {
        &self.features
    }
}

/// Interaction matrix plus the catalog filtered down to its tracks.
#[derive(Debug, Clone)]
pub struct CollaborativeDataset {
    catalog: Catalog,
    interactions: InteractionMatrix,
}

impl CollaborativeDataset {
    /// Catalog rows whose track is not in the matrix are kept; asking for one
    /// of them fails with [`RecommendError::TrackNotIndexed`].
    pub fn new(catalog: Catalog, interactions: InteractionMatrix) -> Self {
        CollaborativeDataset {
            catalog,
            interactions,
        }
    }

    pub fn load<P, Q, R>(
        catalog_path: P,
        matrix_path: Q,
        track_ids_path: R,
    ) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        R: AsRef<Path>,
    {
        let catalog = load_catalog(catalog_path)?;
        let matrix = artifacts::read_matrix(matrix_path)?;
        let track_ids = artifacts::read_track_ids(track_ids_path)?;
        let interactions = InteractionMatrix::new(matrix, track_ids)?;
        info!(
            "Loaded {}x{} interaction matrix with {} cells",
            interactions.rows(),
            interactions.users(),
            interactions.nnz()
        );

        let unindexed = catalog
            .songs()
            .iter()
            .filter(|song| interactions.row_of(&song.track_id).is_none())
            .count();
        if unindexed > 0 {
            warn!(
                "{} filtered catalog rows have no interaction matrix row",
                unindexed
            );
        }
        Ok(Self::new(catalog, interactions))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn interactions(&self) -> &InteractionMatrix {
        &self.interactions
    }
}

/// Every dataset available in the data directory.
#[derive(Debug, Default)]
pub struct Datasets {
    pub content: Option<ContentDataset>,
    pub collaborative: Option<CollaborativeDataset>,
}

impl Datasets {
    /// Loads whatever the data directory holds.
    pub fn load(config: &AppConfig) -> Result<Self> {
        Self::load_strategies(config, &[Strategy::Content, Strategy::Collaborative])
    }

    /// Loads the datasets of the given strategies only.
    ///
    /// A strategy whose artifacts are all absent is skipped. A strategy with
    /// only some of its artifacts present is an error, as is any artifact
    /// that fails to load or validate.
    pub fn load_strategies(config: &AppConfig, strategies: &[Strategy]) -> Result<Self> {
        let mut datasets = Datasets::default();

        if strategies.contains(&Strategy::Content) {
            let paths = [config.catalog_path(), config.features_path()];
            if present(Strategy::Content, &paths)? {
                datasets.content = Some(
                    ContentDataset::load(&paths[0], &paths[1])
                        .context("Failed to load content dataset")?,
                );
            }
        }

        if strategies.contains(&Strategy::Collaborative) {
            let paths = [
                config.filtered_catalog_path(),
                config.interaction_matrix_path(),
                config.track_ids_path(),
            ];
            if present(Strategy::Collaborative, &paths)? {
                datasets.collaborative = Some(
                    CollaborativeDataset::load(&paths[0], &paths[1], &paths[2])
                        .context("Failed to load collaborative dataset")?,
                );
            }
        }

        if datasets.strategies().is_empty() {
            warn!("No dataset found in {:?}", config.data_dir);
        }
        Ok(datasets)
    }

    pub fn strategies(&self) -> Vec<Strategy> {
        let mut strategies = Vec::new();
        if self.content.is_some() {
            strategies.push(Strategy::Content);
        }
        if self.collaborative.is_some() {
            strategies.push(Strategy::Collaborative);
        }
        strategies
    }

    pub fn recommend(
        &self,
        strategy: Strategy,
        song_name: &str,
        artist_name: &str,
        k: usize,
    ) -> Result<Vec<ScoredSong>, RecommendError> {
        match strategy {
            Strategy::Content => {
                let dataset = self
                    .content
                    .as_ref()
                    .ok_or(RecommendError::Unavailable(strategy))?;
                recommend::content::recommend(dataset, song_name, artist_name, k)
            }
            Strategy::Collaborative => {
                let dataset = self
                    .collaborative
                    .as_ref()
                    .ok_or(RecommendError::Unavailable(strategy))?;
                recommend::collaborative::recommend(dataset, song_name, artist_name, k)
            }
        }
    }
}

fn present(strategy: Strategy, paths: &[PathBuf]) -> Result<bool> {
    let missing: Vec<&PathBuf> = paths.iter().filter(|p| !p.is_file()).collect();
    if missing.is_empty() {
        return Ok(true);
    }
    if missing.len() == paths.len() {
        info!("No {} dataset, skipping", strategy);
        return Ok(false);
    }
    bail!(
        "Incomplete {} dataset, missing files: {:?}",
        strategy,
        missing
    )
}
