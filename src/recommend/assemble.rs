use super::ScoredSong;
use crate::catalog::{Song, SongKey};
use std::collections::HashSet;
use tracing::debug;

/// Turns ranked row indices into at most `limit` song records.
///
/// Rows are visited in rank order. `resolve` maps a row to its catalog record;
/// rows it can't resolve are skipped, and so are rows whose track id or
/// `(name, artist)` identity was already emitted (first occurrence in rank
/// order wins). The walk stops once `limit` records are collected.
pub fn assemble<'a, I, F>(ranked_rows: I, scores: &[f64], limit: usize, resolve: F) -> Vec<ScoredSong>
where
    I: IntoIterator<Item = usize>,
    F: Fn(usize) -> Option<&'a Song>,
{
    let ranked_rows = ranked_rows.into_iter();
    // `limit` comes from the caller and may be far larger than the ranking.
    let capacity = limit.min(ranked_rows.size_hint().0);
    let mut seen_ids: HashSet<&'a str> = HashSet::with_capacity(capacity);
    let mut seen_keys: HashSet<SongKey> = HashSet::with_capacity(capacity);
    let mut songs = Vec::with_capacity(capacity);

    for row in ranked_rows {
        if songs.len() >= limit {
            break;
        }
        let Some(song) = resolve(row) else {
            debug!("Row {} has no catalog record, skipping", row);
            continue;
        };
        if !seen_ids.insert(song.track_id.as_str()) {
            debug!("Track {} already ranked, skipping row {}", song.track_id, row);
            continue;
        }
        let key = song.key();
        if seen_keys.contains(&key) {
            debug!("Song {} already ranked, skipping row {}", key, row);
            continue;
        }
        seen_keys.insert(key);
        songs.push(ScoredSong {
            song: song.clone(),
            similarity: scores.get(row).copied().unwrap_or(0.0),
        });
    }
    songs
}
