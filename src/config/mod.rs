mod file_config;

pub use file_config::{ArtifactFilesConfig, FileConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_K: usize = 10;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub data_dir: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub default_k: Option<usize>,
    pub build_shards: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub default_k: usize,
    pub build_shards: usize,
    pub files: ArtifactFiles,
}

/// Artifact file names, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFiles {
    pub catalog: String,
    pub features: String,
    pub listening_history: String,
    pub interaction_matrix: String,
    pub track_ids: String,
    pub filtered_catalog: String,
    pub build_manifest: String,
}

impl Default for ArtifactFiles {
    fn default() -> Self {
        Self {
            catalog: "cleaned_data.csv".to_string(),
            features: "transformed_data.mtx".to_string(),
            listening_history: "User_Listening_History.csv".to_string(),
            interaction_matrix: "interaction_matrix.mtx".to_string(),
            track_ids: "track_ids.json".to_string(),
            filtered_catalog: "collab_filtered_data.csv".to_string(),
            build_manifest: "build_manifest.json".to_string(),
        }
    }
}

impl ArtifactFiles {
    fn merge(file: ArtifactFilesConfig) -> Self {
        let defaults = Self::default();
        Self {
            catalog: file.catalog.unwrap_or(defaults.catalog),
            features: file.features.unwrap_or(defaults.features),
            listening_history: file
                .listening_history
                .unwrap_or(defaults.listening_history),
            interaction_matrix: file
                .interaction_matrix
                .unwrap_or(defaults.interaction_matrix),
            track_ids: file.track_ids.unwrap_or(defaults.track_ids),
            filtered_catalog: file.filtered_catalog.unwrap_or(defaults.filtered_catalog),
            build_manifest: file.build_manifest.unwrap_or(defaults.build_manifest),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("data_dir must be specified via --data-dir or in config file")
            })?;

        if !data_dir.exists() {
            bail!("Data directory does not exist: {:?}", data_dir);
        }
        if !data_dir.is_dir() {
            bail!("data_dir is not a directory: {:?}", data_dir);
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let default_k = file.default_k.or(cli.default_k).unwrap_or(DEFAULT_K);

        let build_shards = file
            .build_shards
            .or(cli.build_shards)
            .unwrap_or_else(rayon::current_num_threads);
        if build_shards == 0 {
            bail!("build_shards must be at least 1");
        }

        let files = ArtifactFiles::merge(file.files.unwrap_or_default());

        Ok(Self {
            data_dir,
            port,
            metrics_port,
            logging_level,
            default_k,
            build_shards,
            files,
        })
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.catalog)
    }

    pub fn features_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.features)
    }

    pub fn listening_history_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.listening_history)
    }

    pub fn interaction_matrix_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.interaction_matrix)
    }

    pub fn track_ids_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.track_ids)
    }

    pub fn filtered_catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.filtered_catalog)
    }

    pub fn build_manifest_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.build_manifest)
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
