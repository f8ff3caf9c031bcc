pub mod config;
mod http_layers;
pub mod metrics;
mod recommend_routes;
#[allow(clippy::module_inception)]
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use recommend_routes::{ErrorBody, RecommendationQuery, RecommendationsResponse};
use recommend_routes::recommend_routes;
pub use server::{make_app, make_metrics_app, run_server};
