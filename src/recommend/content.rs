//! Content based recommendations over precomputed song feature vectors.

use super::{assemble, RecommendError, ScoredSong};
use crate::catalog::SongKey;
use crate::dataset::ContentDataset;
use crate::similarity::{cosine_similarities, rank_rows};
use tracing::debug;

/// Up to `k + 1` songs most similar to the query, the query itself first.
///
/// The query resolves to the first catalog row with the same case-folded name
/// and artist. Feature matrix rows map 1:1 to catalog rows.
pub fn recommend(
    dataset: &ContentDataset,
    song_name: &str,
    artist_name: &str,
    k: usize,
) -> Result<Vec<ScoredSong>, RecommendError> {
    let catalog = dataset.catalog();
    let features = dataset.features();

    let key = SongKey::new(song_name, artist_name);
    let row = catalog
        .find(&key)
        .ok_or_else(|| RecommendError::song_not_found(&key.name, &key.artist))?;
    let query = features
        .outer_view(row)
        .ok_or_else(|| RecommendError::song_not_found(&key.name, &key.artist))?;

    let scores = cosine_similarities(features, query);
    let ranked = rank_rows(&scores, row);
    debug!(
        "Ranked {} feature rows for {} (row {})",
        ranked.len(),
        key,
        row
    );

    Ok(assemble(ranked, &scores, k.saturating_add(1), |r| {
        catalog.get(r)
    }))
}
