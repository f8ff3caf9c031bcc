//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When fixture data changes, update only this file.
#![allow(dead_code)]

// ============================================================================
// Catalog
// ============================================================================

pub const ROCK_1_ID: &str = "TR_ROCK1";
pub const ROCK_1_NAME: &str = "Rock Anthem";

pub const ROCK_2_ID: &str = "TR_ROCK2";
pub const ROCK_2_NAME: &str = "Rock Anthem II";

pub const BAND_A: &str = "Band A";

pub const BALLAD_ID: &str = "TR_BALLAD";
pub const BALLAD_NAME: &str = "Soft Ballad";
pub const BALLAD_ARTIST: &str = "Singer B";

pub const AMBIENT_ID: &str = "TR_AMBIENT";
pub const AMBIENT_NAME: &str = "Ambient Drift";
pub const AMBIENT_ARTIST: &str = "Producer C";

pub const RIFF_ID: &str = "TR_RIFF";
pub const RIFF_NAME: &str = "Heavy Riff";
pub const RIFF_ARTIST: &str = "Band D";

/// Catalog song whose feature vector is all zeros.
pub const SILENT_ID: &str = "TR_SILENT";
pub const SILENT_NAME: &str = "Silence";
pub const SILENT_ARTIST: &str = "Nobody";

/// Listened to but absent from the catalog.
pub const UNKNOWN_ID: &str = "TR_UNKNOWN";

/// Catalog rows, including the duplicated Rock Anthem II row.
pub const CATALOG_ROWS: usize = 7;

// ============================================================================
// Listening history
// ============================================================================

pub const HISTORY_EVENTS: usize = 10;
pub const HISTORY_TRACKS: usize = 5;
pub const HISTORY_USERS: usize = 4;
pub const HISTORY_TOTAL_PLAYCOUNT: f64 = 45.0;

// ============================================================================
// Infrastructure
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
