use axum::extract::FromRef;

use crate::dataset::Datasets;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

/// Read-only after startup.
pub type GuardedDatasets = Arc<Datasets>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub datasets: GuardedDatasets,
}

impl ServerState {
    pub fn new(config: ServerConfig, datasets: GuardedDatasets) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            datasets,
        }
    }
}

impl FromRef<ServerState> for GuardedDatasets {
    fn from_ref(input: &ServerState) -> Self {
        input.datasets.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
