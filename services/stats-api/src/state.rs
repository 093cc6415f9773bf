//! Shared application state.

use anyhow::Result;
use meteoblue::MeteoClient;

use crate::config::AppConfig;

/// Read-only state shared by all requests: the configuration and one
/// pooled HTTP client. Nothing here is mutated after startup.
pub struct AppState {
    pub config: AppConfig,
    pub meteo: MeteoClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let meteo = MeteoClient::new(config.fetch.clone(), config.request_timeout)?;
        Ok(Self { config, meteo })
    }
}
