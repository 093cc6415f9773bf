//! Client and data model for the Meteoblue package API.
//!
//! Fetches hourly weather packages, extracts the "current" time slot from
//! a time-indexed dataset, and uploads computed results to a remote cache
//! sink (best-effort).

pub mod client;
pub mod error;
pub mod extract;
pub mod types;

pub use client::{FetchParams, MeteoClient};
pub use error::FetchError;
pub use extract::{extract_current, extract_current_at};
pub use types::{CachePayload, CurrentSlot, HourlySeries, StatsResult, WeatherDataset};
