//! Wire types for Meteoblue hourly packages and computed results.
//!
//! The provider response is kept as close to the wire as possible: known
//! structure is typed, everything else rides along in flattened maps so the
//! full-history mode passes payloads through losslessly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One hourly package response from the weather provider.
///
/// Field arrays under `data_1h` are index-aligned with its `time` axis;
/// the format does not guarantee equal lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherDataset {
    /// Provider metadata (model run, location, generation time, ...).
    pub metadata: Map<String, Value>,

    /// Unit string per field name.
    pub units: BTreeMap<String, String>,

    /// The hourly time series.
    #[serde(rename = "data_1h")]
    pub series: HourlySeries,

    /// Any top-level keys this service does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A time-indexed set of parallel field arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    /// Ordered hour-granularity timestamps.
    pub time: Vec<String>,

    /// Parallel arrays keyed by field name (temperature, windspeed, ...).
    /// Which fields exist depends on the package; the service is agnostic.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A single hour's worth of scalar values extracted from a dataset.
///
/// Every field present has a value at exactly the chosen index of its
/// source array; fields whose array was too short are absent, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentSlot {
    /// The timestamp of the chosen slot.
    pub time: String,

    /// Units map, copied verbatim from the dataset.
    pub units: BTreeMap<String, String>,

    /// Scalar value per field.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// What a stats route computes: the full dataset or one extracted slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatsResult {
    Current(CurrentSlot),
    Full(WeatherDataset),
}

/// Body of the cache sink POST. Write-once, fire-and-forget.
///
/// `params` carries the request mode verbatim so cached entries can be
/// keyed by how they were computed.
#[derive(Debug, Serialize)]
pub struct CachePayload<'a, T: Serialize> {
    pub endpoint: &'a str,
    pub params: &'a str,
    pub data: &'a T,
}
