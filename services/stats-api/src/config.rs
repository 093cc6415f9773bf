//! Service configuration.
//!
//! All recognized options have a hardcoded default; the environment is read
//! exactly once at startup and the result is injected into the handlers.

use std::time::Duration;

use meteoblue::FetchParams;
use tracing::warn;

const DEFAULT_BASIC_ENDPOINT: &str = "https://my.meteoblue.com/packages/basic-1h";
const DEFAULT_CLOUD_ENDPOINT: &str = "https://my.meteoblue.com/packages/clouds-1h";
const DEFAULT_BASIC_CACHE_ENDPOINT: &str =
    "https://us-west1-skyviewer.cloudfunctions.net/redis-client/basic-weather-stats";
const DEFAULT_CLOUD_CACHE_ENDPOINT: &str =
    "https://us-west1-skyviewer.cloudfunctions.net/redis-client/cloud-weather-stats";

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Meteoblue basic-1h package endpoint.
    pub basic_endpoint: String,

    /// Meteoblue clouds-1h package endpoint.
    pub cloud_endpoint: String,

    /// Cache sink for basic stats.
    pub basic_cache_endpoint: String,

    /// Cache sink for cloud stats.
    pub cloud_cache_endpoint: String,

    /// Query parameters sent with every package request.
    pub fetch: FetchParams,

    /// Timeout applied to each outbound request.
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a keyed lookup.
    ///
    /// Absent keys take their hardcoded default; malformed numeric values
    /// fall back to the default with a warning rather than aborting.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fetch = FetchParams {
            lat: parse_or(&lookup, "LAT", 47.5584),
            lon: parse_or(&lookup, "LON", 7.5733),
            apikey: lookup("METEOBLUE_API_KEY").unwrap_or_default(),
            format: lookup("FORMAT").unwrap_or_else(|| "json".to_string()),
            asl: parse_or(&lookup, "ASL", 279.0),
            tz: lookup("TZ").unwrap_or_else(|| "Europe/Zurich".to_string()),
            name: lookup("NAME").unwrap_or_else(|| "Basel".to_string()),
            history_days: parse_or(&lookup, "HISTORY_DAYS", 1),
            forecast_days: parse_or(&lookup, "FORECAST_DAYS", 1),
        };

        Self {
            basic_endpoint: lookup("METEOBLUE_BASIC_API")
                .unwrap_or_else(|| DEFAULT_BASIC_ENDPOINT.to_string()),
            cloud_endpoint: lookup("METEOBLUE_CLOUD_API")
                .unwrap_or_else(|| DEFAULT_CLOUD_ENDPOINT.to_string()),
            basic_cache_endpoint: lookup("BASIC_CACHE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_BASIC_CACHE_ENDPOINT.to_string()),
            cloud_cache_endpoint: lookup("CLOUD_CACHE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_CLOUD_CACHE_ENDPOINT.to_string()),
            fetch,
            request_timeout: Duration::from_secs(parse_or(
                &lookup,
                "REQUEST_TIMEOUT_SECS",
                30u64,
            )),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key = %key, value = %raw, "Malformed value, using default");
            default
        }
    }
}
