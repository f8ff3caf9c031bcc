//! Reading and writing persisted artifacts.
//!
//! Matrices are stored in Matrix Market coordinate format, the track id array
//! and the build manifest as JSON.

use super::DatasetError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sprs::CsMat;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn read_matrix<P: AsRef<Path>>(path: P) -> Result<CsMat<f64>, DatasetError> {
    let path = path.as_ref();
    let triplets = sprs::io::read_matrix_market::<f64, usize, _>(path).map_err(|source| {
        DatasetError::MatrixMarket {
            path: path.to_path_buf(),
            source,
        }
    })?;
    Ok(triplets.to_csr())
}

pub fn write_matrix<P: AsRef<Path>>(path: P, matrix: &CsMat<f64>) -> Result<(), DatasetError> {
    let path = path.as_ref();
    sprs::io::write_matrix_market(path, matrix).map_err(|e| DatasetError::io(path, e))
}

pub fn read_track_ids<P: AsRef<Path>>(path: P) -> Result<Vec<String>, DatasetError> {
    read_json(path)
}

pub fn write_track_ids<P: AsRef<Path>>(path: P, track_ids: &[String]) -> Result<(), DatasetError> {
    write_json(path, &track_ids)
}

pub fn read_json<T, P>(path: P) -> Result<T, DatasetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json<T, P>(path: P, value: &T) -> Result<(), DatasetError>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(|e| DatasetError::io(path, e))
}

/// Fails with the required columns absent from `headers`, in `required` order.
pub(crate) fn require_columns(
    path: &Path,
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<(), DatasetError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|h| h.trim() == **column))
        .map(|column| column.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns {
            path: path.to_path_buf(),
            missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprs::TriMat;
    use tempfile::TempDir;

    #[test]
    fn matrix_survives_a_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("interaction_matrix.mtx");
        let mut triplets = TriMat::new((3, 4));
        triplets.add_triplet(0, 1, 8.0);
        triplets.add_triplet(2, 3, 1.5);
        triplets.add_triplet(2, 0, 2.0);
        let matrix = triplets.to_csr();

        write_matrix(&path, &matrix).unwrap();
        let loaded = read_matrix(&path).unwrap();
        assert_eq!(loaded.shape(), (3, 4));
        assert_eq!(loaded.get(0, 1), Some(&8.0));
        assert_eq!(loaded.get(2, 3), Some(&1.5));
        assert_eq!(loaded.get(2, 0), Some(&2.0));
        assert_eq!(loaded.nnz(), 3);
    }

    #[test]
    fn reads_hand_written_matrix_market() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("transformed_data.mtx");
        std::fs::write(
            &path,
            "%%MatrixMarket matrix coordinate real general\n2 3 2\n1 1 0.5\n2 3 4.0\n",
        )
        .unwrap();

        let matrix = read_matrix(&path).unwrap();
        assert!(matrix.is_csr());
        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(matrix.get(1, 2), Some(&4.0));
    }

    #[test]
    fn garbage_matrix_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.mtx");
        std::fs::write(&path, "this is not a matrix\n").unwrap();

        assert!(matches!(
            read_matrix(&path),
            Err(DatasetError::MatrixMarket { .. })
        ));
    }

    #[test]
    fn track_ids_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("track_ids.json");
        let ids = vec!["TRA".to_string(), "TRB".to_string()];

        write_track_ids(&path, &ids).unwrap();
        assert_eq!(read_track_ids(&path).unwrap(), ids);
    }

    #[test]
    fn missing_track_ids_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            read_track_ids(dir.path().join("track_ids.json")),
            Err(DatasetError::Io { .. })
        ));
    }

    #[test]
    fn require_columns_reports_missing_in_order() {
        let headers = csv::StringRecord::from(vec!["artist", " track_id "]);
        let err = require_columns(Path::new("x.csv"), &headers, &["track_id", "name", "artist"])
            .unwrap_err();
        match err {
            DatasetError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["name".to_string()])
            }
            other => panic!("Unexpected error {:?}", other),
        }
    }
}
