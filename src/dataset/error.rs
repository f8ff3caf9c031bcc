use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, writing or validating persisted artifacts.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("JSON error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Matrix Market error in {}: {source}", path.display())]
    MatrixMarket {
        path: PathBuf,
        #[source]
        source: sprs::io::IoError,
    },

    #[error("{} is missing required columns: {}", path.display(), missing.join(", "))]
    MissingColumns { path: PathBuf, missing: Vec<String> },

    #[error("feature matrix has {matrix_rows} rows but the catalog has {catalog_rows}")]
    RowCountMismatch {
        matrix_rows: usize,
        catalog_rows: usize,
    },

    #[error("track id array has {track_ids} entries but the interaction matrix has {matrix_rows} rows")]
    TrackIdsMismatch { track_ids: usize, matrix_rows: usize },
}

impl DatasetError {
    /// True for artifacts that loaded fine but disagree with each other.
    pub fn is_inconsistency(&self) -> bool {
        matches!(
            self,
            DatasetError::RowCountMismatch { .. } | DatasetError::TrackIdsMismatch { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        DatasetError::Csv {
            path: path.into(),
            source,
        }
    }
}
