use crate::dataset::DatasetError;
use sprs::CsMat;
use std::collections::HashMap;

/// Sparse tracks x users play count matrix plus the track ids labelling its rows.
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    matrix: CsMat<f64>,
    track_ids: Vec<String>,
    rows_by_track_id: HashMap<String, usize>,
}

impl InteractionMatrix {
    /// Pairs a matrix with its row labels, failing if their lengths disagree.
    pub fn new(matrix: CsMat<f64>, track_ids: Vec<String>) -> Result<Self, DatasetError> {
        if track_ids.len() != matrix.rows() {
            return Err(DatasetError::TrackIdsMismatch {
                track_ids: track_ids.len(),
                matrix_rows: matrix.rows(),
            });
        }
        let matrix = if matrix.is_csr() {
            matrix
        } else {
            matrix.to_csr()
        };
        Ok(Self::from_parts(matrix, track_ids))
    }

    pub fn empty() -> Self {
        Self::from_parts(CsMat::zero((0, 0)), Vec::new())
    }

    /// Caller guarantees a CSR matrix with one row per track id.
    pub(super) fn from_parts(matrix: CsMat<f64>, track_ids: Vec<String>) -> Self {
        let mut rows_by_track_id = HashMap::with_capacity(track_ids.len());
        for (row, track_id) in track_ids.iter().enumerate() {
            rows_by_track_id.entry(track_id.clone()).or_insert(row);
        }
        InteractionMatrix {
            matrix,
            track_ids,
            rows_by_track_id,
        }
    }

    pub fn matrix(&self) -> &CsMat<f64> {
        &self.matrix
    }

    pub fn track_ids(&self) -> &[String] {
        &self.track_ids
    }

    /// Number of tracks (matrix rows).
    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of users (matrix columns).
    pub fn users(&self) -> usize {
        self.matrix.cols()
    }

    /// Number of stored cells.
    pub fn nnz(&self) -> usize {
        self.matrix.nnz()
    }

    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    pub fn row_of(&self, track_id: &str) -> Option<usize> {
        self.rows_by_track_id.get(track_id).copied()
    }

    pub fn track_id(&self, row: usize) -> Option<&str> {
        self.track_ids.get(row).map(String::as_str)
    }

    pub fn playcount(&self, row: usize, user: usize) -> f64 {
        if row >= self.rows() || user >= self.users() {
            return 0.0;
        }
        self.matrix.get(row, user).copied().unwrap_or(0.0)
    }

    pub fn total_playcount(&self) -> f64 {
        self.matrix.data().iter().sum()
    }
}
