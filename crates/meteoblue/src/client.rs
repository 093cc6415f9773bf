//! Outbound HTTP: package fetches and best-effort cache uploads.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::types::CachePayload;

/// Fixed parameter set sent with every package request.
///
/// Built once from configuration at startup; never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct FetchParams {
    pub lat: f64,
    pub lon: f64,
    pub apikey: String,
    pub format: String,
    pub asl: f64,
    pub tz: String,
    pub name: String,
    pub history_days: u32,
    pub forecast_days: u32,
}

/// HTTP client for the weather provider and the cache sink.
///
/// Holds one pooled `reqwest::Client`; cheap to share behind an `Arc`.
pub struct MeteoClient {
    client: Client,
    params: FetchParams,
}

impl MeteoClient {
    /// Create a client with the given parameter set and request timeout.
    pub fn new(params: FetchParams, request_timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client, params })
    }

    /// Fetch one hourly package from `endpoint`. Single attempt, no retry.
    ///
    /// The decoded body is returned as-is; shape assumptions are the
    /// caller's responsibility. Any failure propagates unchanged.
    #[instrument(skip(self))]
    pub async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, FetchError> {
        let response = self.client.get(endpoint).query(&self.params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: endpoint.to_string(),
            });
        }

        Ok(response.json().await?)
    }

    /// Upload a computed result to the cache sink, best-effort.
    ///
    /// Failures (connect error, timeout, non-2xx) are logged as a warning
    /// and swallowed; this must never fail the caller. The attempt is
    /// awaited, so the warning lands before the caller responds.
    pub async fn publish_cache<T: Serialize>(
        &self,
        endpoint: &str,
        cache_endpoint: &str,
        mode: &str,
        data: &T,
    ) {
        debug!(
            cache_endpoint = %cache_endpoint,
            endpoint = %endpoint,
            mode = %mode,
            "Uploading stats to cache"
        );

        let payload = CachePayload {
            endpoint,
            params: mode,
            data,
        };

        let outcome = self
            .client
            .post(cache_endpoint)
            .json(&payload)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        if let Err(e) = outcome {
            warn!("Cache upload error: {}", e);
        }
    }
}
