//! Offline build job.
//!
//! Reads the raw listening history and the cleaned catalog, builds the
//! interaction matrix, filters the catalog down to the tracks that were
//! listened to and persists everything the collaborative recommender loads
//! at startup.

use crate::catalog::{load_catalog, save_catalog};
use crate::config::AppConfig;
use crate::dataset::artifacts;
use crate::interactions::{build_interaction_matrix_with_shards, load_listening_history};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Summary of a build, written next to the artifacts it describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildManifest {
    pub built_at: DateTime<Utc>,
    pub events: usize,
    pub tracks: usize,
    pub users: usize,
    pub stored_cells: usize,
    pub total_playcount: f64,
    pub filtered_catalog_rows: usize,
}

impl BuildManifest {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        artifacts::read_json(path)
            .with_context(|| format!("Failed to read build manifest {:?}", path))
    }
}

pub fn run_build(config: &AppConfig) -> Result<BuildManifest> {
    let start = Instant::now();

    let events = load_listening_history(config.listening_history_path())
        .context("Failed to load listening history")?;
    let catalog = load_catalog(config.catalog_path()).context("Failed to load catalog")?;

    let interactions = build_interaction_matrix_with_shards(&events, config.build_shards);
    let filtered = catalog.filter_by_track_ids(interactions.track_ids().iter().map(String::as_str));

    let missing_metadata = interactions
        .track_ids()
        .iter()
        .filter(|id| filtered.find_by_track_id(id).is_none())
        .count();
    if missing_metadata > 0 {
        warn!(
            "{} listened tracks have no catalog record and won't be recommended",
            missing_metadata
        );
    }
    info!(
        "Filtered catalog from {} to {} songs",
        catalog.len(),
        filtered.len()
    );

    let matrix_path = config.interaction_matrix_path();
    artifacts::write_matrix(&matrix_path, interactions.matrix())
        .context("Failed to write interaction matrix")?;
    artifacts::write_track_ids(config.track_ids_path(), interactions.track_ids())
        .context("Failed to write track ids")?;
    save_catalog(&filtered, config.filtered_catalog_path())
        .context("Failed to write filtered catalog")?;

    let manifest = BuildManifest {
        built_at: Utc::now(),
        events: events.len(),
        tracks: interactions.rows(),
        users: interactions.users(),
        stored_cells: interactions.nnz(),
        total_playcount: interactions.total_playcount(),
        filtered_catalog_rows: filtered.len(),
    };
    artifacts::write_json(config.build_manifest_path(), &manifest)
        .context("Failed to write build manifest")?;

    if let Ok(metadata) = std::fs::metadata(&matrix_path) {
        info!(
            "Interaction matrix written to {:?} ({:#})",
            matrix_path,
            byte_unit::Byte::from(metadata.len())
        );
    }
    info!("Build completed in {}ms", start.elapsed().as_millis());
    Ok(manifest)
}
