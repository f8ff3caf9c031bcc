use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub data_dir: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub default_k: Option<usize>,
    pub build_shards: Option<usize>,

    // Artifact file names, relative to data_dir
    pub files: Option<ArtifactFilesConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct ArtifactFilesConfig {
    pub catalog: Option<String>,
    pub features: Option<String>,
    pub listening_history: Option<String>,
    pub interaction_matrix: Option<String>,
    pub track_ids: Option<String>,
    pub filtered_catalog: Option<String>,
    pub build_manifest: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
