//! JSON recommendation endpoints.

use super::metrics::record_recommendation;
use super::state::{GuardedDatasets, ServerState};
use super::ServerConfig;
use crate::recommend::{RecommendError, ScoredSong, Strategy};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error};

#[derive(Deserialize, Debug)]
pub struct RecommendationQuery {
    pub song: Option<String>,
    pub artist: Option<String>,
    pub k: Option<usize>,
}

#[derive(Serialize, Debug)]
pub struct RecommendationsResponse {
    pub strategy: Strategy,
    pub now_playing: ScoredSong,
    pub recommendations: Vec<ScoredSong>,
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

pub enum ApiError {
    BadRequest(String),
    Recommend(RecommendError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "invalid_request", message),
            ApiError::Recommend(err) => {
                let status = match err {
                    RecommendError::SongNotFound { .. } | RecommendError::TrackNotIndexed(_) => {
                        StatusCode::NOT_FOUND
                    }
                    RecommendError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, err.code(), err.to_string())
            }
            ApiError::Internal(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };
        (status, Json(ErrorBody { code, message })).into_response()
    }
}

fn required_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!(
            "query parameter '{}' is required",
            name
        ))),
    }
}

async fn get_recommendations(
    State(datasets): State<GuardedDatasets>,
    State(config): State<ServerConfig>,
    Path(strategy): Path<Strategy>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let song = required_param(query.song, "song")?;
    let artist = required_param(query.artist, "artist")?;
    let k = query.k.unwrap_or(config.default_k);

    let start = Instant::now();
    // Scoring walks the whole matrix, keep it off the async workers.
    let result = tokio::task::spawn_blocking(move || {
        datasets.recommend(strategy, &song, &artist, k)
    })
    .await
    .map_err(|e| {
        error!("Recommendation task failed: {}", e);
        ApiError::Internal("recommendation task failed".to_string())
    })?;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(err) => err.code(),
    };
    record_recommendation(strategy, outcome, start.elapsed());

    let mut songs = result.map_err(ApiError::Recommend)?.into_iter();
    let now_playing = songs
        .next()
        .ok_or_else(|| ApiError::Internal("empty recommendation result".to_string()))?;
    let recommendations: Vec<ScoredSong> = songs.collect();
    debug!(
        "{} recommendations for '{}' by '{}'",
        recommendations.len(),
        now_playing.song.name,
        now_playing.song.artist
    );

    Ok(Json(RecommendationsResponse {
        strategy,
        now_playing,
        recommendations,
    }))
}

pub fn recommend_routes(state: ServerState) -> Router {
    Router::new()
        .route("/{strategy}", get(get_recommendations))
        .with_state(state)
}
