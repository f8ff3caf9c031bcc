use super::Strategy;
use thiserror::Error;

/// Why a recommendation request could not be answered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// No catalog row matches the queried identity.
    #[error("couldn't find '{name}' by '{artist}' in the catalog")]
    SongNotFound { name: String, artist: String },

    /// The song is in the catalog but its track id labels no interaction matrix row.
    #[error("track id '{0}' is not indexed in the interaction matrix")]
    TrackNotIndexed(String),

    /// The artifacts for this strategy were not loaded.
    #[error("{0} dataset is not loaded")]
    Unavailable(Strategy),
}

impl RecommendError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecommendError::SongNotFound { .. } | RecommendError::TrackNotIndexed(_)
        )
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            RecommendError::SongNotFound { .. } => "song_not_found",
            RecommendError::TrackNotIndexed(_) => "track_not_indexed",
            RecommendError::Unavailable(_) => "dataset_unavailable",
        }
    }

    pub(crate) fn song_not_found(name: &str, artist: &str) -> Self {
        RecommendError::SongNotFound {
            name: name.to_string(),
            artist: artist.to_string(),
        }
    }
}
