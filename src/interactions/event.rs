use crate::dataset::artifacts::require_columns;
use crate::dataset::DatasetError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const HISTORY_COLUMNS: [&str; 3] = ["track_id", "user_id", "playcount"];

/// One row of the raw listening history.
///
/// The same (user, track) pair may appear in several events; their play
/// counts are summed when the interaction matrix is built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningEvent {
    pub track_id: String,
    pub user_id: String,
    pub playcount: u64,
}

impl ListeningEvent {
    pub fn new(user_id: impl Into<String>, track_id: impl Into<String>, playcount: u64) -> Self {
        ListeningEvent {
            track_id: track_id.into(),
            user_id: user_id.into(),
            playcount,
        }
    }
}

pub fn load_listening_history<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<ListeningEvent>, DatasetError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| DatasetError::csv(path, e))?;
    let headers = reader
        .headers()
        .map_err(|e| DatasetError::csv(path, e))?
        .clone();
    require_columns(path, &headers, &HISTORY_COLUMNS)?;

    let events = reader
        .deserialize::<ListeningEvent>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| DatasetError::csv(path, e))?;
    info!(
        "Read {} listening events from {}",
        events.len(),
        path.display()
    );
    Ok(events)
}
