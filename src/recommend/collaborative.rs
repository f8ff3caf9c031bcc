//! Collaborative recommendations over the tracks x users interaction matrix.

use super::{assemble, RecommendError, ScoredSong};
use crate::catalog::SongKey;
use crate::dataset::CollaborativeDataset;
use crate::similarity::{cosine_similarities, rank_rows};
use tracing::debug;

/// Up to `k + 1` songs listened to by the same users as the query, the query first.
///
/// The query resolves against the filtered catalog, then through its track id
/// to an interaction matrix row. Ranked rows are joined back to the filtered
/// catalog by track id; rows without a catalog record are skipped.
///
/// A query row with no recorded plays scores 0 against every row, which leaves
/// the neighbours in plain row order. That is expected, not an error.
pub fn recommend(
    dataset: &CollaborativeDataset,
    song_name: &str,
    artist_name: &str,
    k: usize,
) -> Result<Vec<ScoredSong>, RecommendError> {
    let catalog = dataset.catalog();
    let interactions = dataset.interactions();

    let key = SongKey::new(song_name, artist_name);
    let track_id = catalog
        .find(&key)
        .and_then(|row| catalog.get(row))
        .map(|song| song.track_id.as_str())
        .ok_or_else(|| RecommendError::song_not_found(&key.name, &key.artist))?;

    let row = interactions
        .row_of(track_id)
        .ok_or_else(|| RecommendError::TrackNotIndexed(track_id.to_string()))?;
    let query = interactions
        .matrix()
        .outer_view(row)
        .ok_or_else(|| RecommendError::TrackNotIndexed(track_id.to_string()))?;

    let scores = cosine_similarities(interactions.matrix(), query);
    let ranked = rank_rows(&scores, row);
    debug!(
        "Ranked {} interaction rows for {} (track {}, row {})",
        ranked.len(),
        key,
        track_id,
        row
    );

    Ok(assemble(ranked, &scores, k.saturating_add(1), |r| {
        interactions
            .track_id(r)
            .and_then(|id| catalog.song_by_track_id(id))
    }))
}
