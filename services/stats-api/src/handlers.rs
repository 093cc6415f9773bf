//! Route table and request orchestration.
//!
//! Dispatch is purely path-based: `/` answers a fixed liveness marker,
//! `/basic-stats` and `/cloud-stats` drive the fetch → extract → cache →
//! respond sequence against their endpoint pair, and everything else is a
//! fixed 400.

use std::sync::Arc;

use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::error;

use meteoblue::{extract_current, StatsResult, WeatherDataset};

use crate::state::AppState;

const ROOT_BODY: &str = "🐈‍⬛";
const UNKNOWN_ROUTE_BODY: &str = "Oopsies.";
const DEFAULT_MODE: &str = "current";

/// Query parameters accepted by the stats routes.
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    /// `current` (the default) returns one extracted slot; any other value
    /// passes the full dataset through.
    pub mode: Option<String>,
}

/// Success body: the computed result wrapped in `data`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub data: StatsResult,
}

/// Error body for upstream failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// GET / - liveness marker.
pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, ROOT_BODY)
}

/// Fallback for unknown paths. Makes no outbound calls.
pub async fn unknown_route_handler() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, UNKNOWN_ROUTE_BODY)
}

/// GET /basic-stats
pub async fn basic_stats_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Response {
    process_stats(
        &state,
        query,
        &state.config.basic_endpoint,
        &state.config.basic_cache_endpoint,
    )
    .await
}

/// GET /cloud-stats
pub async fn cloud_stats_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Response {
    process_stats(
        &state,
        query,
        &state.config.cloud_endpoint,
        &state.config.cloud_cache_endpoint,
    )
    .await
}

/// Fetch the dataset, extract the current slot when asked for, publish to
/// the cache sink, and respond.
///
/// The cache publish is awaited but its outcome never reaches the caller;
/// a fetch failure becomes a controlled 502.
pub async fn process_stats(
    state: &AppState,
    query: StatsQuery,
    data_endpoint: &str,
    cache_endpoint: &str,
) -> Response {
    let mode = query.mode.unwrap_or_else(|| DEFAULT_MODE.to_string());

    let dataset: WeatherDataset = match state.meteo.fetch(data_endpoint).await {
        Ok(dataset) => dataset,
        Err(e) => {
            error!(endpoint = %data_endpoint, error = %e, "Upstream fetch failed");
            let body = ErrorBody {
                error: format!("upstream fetch failed: {}", e),
            };
            return (StatusCode::BAD_GATEWAY, Json(body)).into_response();
        }
    };

    let result = if mode == DEFAULT_MODE {
        StatsResult::Current(extract_current(&dataset))
    } else {
        StatsResult::Full(dataset)
    };

    state
        .meteo
        .publish_cache(data_endpoint, cache_endpoint, &mode, &result)
        .await;

    (StatusCode::OK, Json(StatsResponse { data: result })).into_response()
}

/// Build the service router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/basic-stats", get(basic_stats_handler))
        .route("/cloud-stats", get(cloud_stats_handler))
        .fallback(unknown_route_handler)
        .layer(Extension(state))
}
