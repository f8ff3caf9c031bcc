//! Catalog table loading and storing.

use super::{Catalog, Song};
use crate::dataset::artifacts::require_columns;
use crate::dataset::DatasetError;
use std::path::Path;
use tracing::info;

const CATALOG_COLUMNS: [&str; 3] = ["track_id", "name", "artist"];

/// Loads a catalog CSV table.
///
/// The header must carry `track_id`, `name` and `artist`; `spotify_preview_url`
/// is optional and any other column is ignored.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| DatasetError::csv(path, e))?
        .clone();
    require_columns(path, &headers, &CATALOG_COLUMNS)?;

    let songs = reader
        .deserialize::<Song>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DatasetError::csv(path, e))?;

    let catalog = Catalog::new(songs);
    info!(
        "Loaded catalog {} with {} songs",
        path.display(),
        catalog.len()
    );
    Ok(catalog)
}

pub fn save_catalog<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<(), DatasetError> {
    let path = path.as_ref();
    // Header written explicitly so an empty catalog still carries its schema.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;
    writer
        .write_record(CATALOG_COLUMNS.iter().chain(["spotify_preview_url"].iter()))
        .map_err(|e| DatasetError::csv(path, e))?;
    for song in catalog.songs() {
        writer
            .serialize(song)
            .map_err(|e| DatasetError::csv(path, e))?;
    }
    writer.flush().map_err(|e| DatasetError::io(path, e))?;
    Ok(())
}
