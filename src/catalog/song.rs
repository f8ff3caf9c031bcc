use serde::{Deserialize, Serialize};

/// A catalog row as stored in the cleaned and filtered catalog tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub track_id: String,
    pub name: String,
    pub artist: String,
    #[serde(default)]
    pub spotify_preview_url: Option<String>,
}

impl Song {
    pub fn new<T, N, A>(track_id: T, name: N, artist: A) -> Self
    where
        T: Into<String>,
        N: AsRef<str>,
        A: AsRef<str>,
    {
        Song {
            track_id: track_id.into(),
            name: fold(name.as_ref()),
            artist: fold(artist.as_ref()),
            spotify_preview_url: None,
        }
    }

    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.spotify_preview_url = Some(url.into());
        self
    }

    pub fn key(&self) -> SongKey {
        SongKey::new(&self.name, &self.artist)
    }

    /// Case-folds identity fields and drops blank preview urls.
    pub(crate) fn normalize(&mut self) {
        self.name = fold(&self.name);
        self.artist = fold(&self.artist);
        if self
            .spotify_preview_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.spotify_preview_url = None;
        }
    }
}

/// Song identity: case-folded, whitespace-trimmed name and artist.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SongKey {
    pub name: String,
    pub artist: String,
}

impl SongKey {
    pub fn new(name: &str, artist: &str) -> Self {
        SongKey {
            name: fold(name),
            artist: fold(artist),
        }
    }
}

impl std::fmt::Display for SongKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' by '{}'", self.name, self.artist)
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}
