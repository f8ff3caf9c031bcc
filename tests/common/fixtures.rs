//! Test fixture creation for the data directory
//!
//! The content side (cleaned catalog + feature matrix) is written as it would
//! come out of the offline cleaning step. The collaborative artifacts are not
//! written here; tests produce them by running the build pipeline.

use super::constants::*;
use anyhow::Result;
use pezzottify_recommender::config::{AppConfig, CliConfig};
use std::fs;
use tempfile::TempDir;

fn catalog_csv() -> String {
    let rows = [
        (ROCK_1_ID, ROCK_1_NAME, BAND_A, "https://p.scdn.co/rock1", 2004),
        (BALLAD_ID, BALLAD_NAME, BALLAD_ARTIST, "", 1999),
        (ROCK_2_ID, ROCK_2_NAME, BAND_A, "https://p.scdn.co/rock2", 2006),
        (AMBIENT_ID, AMBIENT_NAME, AMBIENT_ARTIST, "", 2015),
        (RIFF_ID, RIFF_NAME, RIFF_ARTIST, "https://p.scdn.co/riff", 1989),
        (SILENT_ID, SILENT_NAME, SILENT_ARTIST, "", 2020),
        // Same song twice, as it happens in scraped catalogs.
        (ROCK_2_ID, ROCK_2_NAME, BAND_A, "https://p.scdn.co/rock2", 2006),
    ];
    let mut csv = String::from("track_id,name,artist,spotify_preview_url,year\n");
    for (id, name, artist, preview, year) in rows {
        // Identity matching is case insensitive, store it shouty.
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            id,
            name.to_uppercase(),
            artist,
            preview,
            year
        ));
    }
    csv
}

/// Feature rows are aligned with `catalog_csv` rows. Row 5 is all zeros.
const FEATURES_MTX: &str = "%%MatrixMarket matrix coordinate real general
7 3 11
1 1 1.0
1 3 0.1
2 2 1.0
3 1 0.9
3 3 0.2
4 2 0.2
4 3 1.0
5 1 0.8
5 2 0.1
7 1 0.9
7 3 0.2
";

const HISTORY_CSV: &str = "track_id,user_id,playcount
TR_ROCK1,u1,6
TR_ROCK1,u1,4
TR_ROCK1,u2,5
TR_ROCK2,u1,8
TR_ROCK2,u2,4
TR_RIFF,u1,2
TR_RIFF,u3,6
TR_AMBIENT,u3,7
TR_AMBIENT,u3,0
TR_UNKNOWN,u4,3
";

/// Creates a data directory holding the cleaned catalog, the feature matrix
/// and the raw listening history, with default file names.
pub fn create_test_data_dir() -> Result<TempDir> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("cleaned_data.csv"), catalog_csv())?;
    fs::write(dir.path().join("transformed_data.mtx"), FEATURES_MTX)?;
    fs::write(dir.path().join("User_Listening_History.csv"), HISTORY_CSV)?;
    Ok(dir)
}

pub fn test_config(dir: &TempDir) -> AppConfig {
    let cli = CliConfig {
        data_dir: Some(dir.path().to_path_buf()),
        build_shards: Some(3),
        ..Default::default()
    };
    AppConfig::resolve(&cli, None).expect("Failed to resolve test config")
}
