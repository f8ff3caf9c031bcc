use super::{Song, SongKey};
use std::collections::{HashMap, HashSet};

/// In-memory catalog table with identity and track id lookups.
///
/// Row order is the order the songs were given in and is never changed after
/// construction, so a row index stays valid for the catalog's lifetime. When
/// several rows share an identity or a track id, lookups resolve to the first
/// of them.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
    rows_by_key: HashMap<SongKey, usize>,
    rows_by_track_id: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(mut songs: Vec<Song>) -> Catalog {
        let mut rows_by_key = HashMap::with_capacity(songs.len());
        let mut rows_by_track_id = HashMap::with_capacity(songs.len());
        for (row, song) in songs.iter_mut().enumerate() {
            song.normalize();
            rows_by_key.entry(song.key()).or_insert(row);
            rows_by_track_id
                .entry(song.track_id.clone())
                .or_insert(row);
        }
        Catalog {
            songs,
            rows_by_key,
            rows_by_track_id,
        }
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, row: usize) -> Option<&Song> {
        self.songs.get(row)
    }

    /// Row of the first song matching `key`.
    pub fn find(&self, key: &SongKey) -> Option<usize> {
        self.rows_by_key.get(key).copied()
    }

    pub fn contains(&self, song_name: &str, artist_name: &str) -> bool {
        self.find(&SongKey::new(song_name, artist_name)).is_some()
    }

    pub fn find_by_track_id(&self, track_id: &str) -> Option<usize> {
        self.rows_by_track_id.get(track_id).copied()
    }

    pub fn song_by_track_id(&self, track_id: &str) -> Option<&Song> {
        self.find_by_track_id(track_id).and_then(|row| self.get(row))
    }

    /// Rows whose track id is in `track_ids`, sorted by track id.
    ///
    /// The sort is stable: rows sharing a track id keep their relative order.
    pub fn filter_by_track_ids<'a, I>(&self, track_ids: I) -> Catalog
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted: HashSet<&str> = track_ids.into_iter().collect();
        let mut songs: Vec<Song> = self
            .songs
            .iter()
            .filter(|song| wanted.contains(song.track_id.as_str()))
            .cloned()
            .collect();
        songs.sort_by(|a, b| a.track_id.cmp(&b.track_id));
        Catalog::new(songs)
    }
}
