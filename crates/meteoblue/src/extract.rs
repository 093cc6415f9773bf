//! Current-slot extraction from an hourly time series.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::types::{CurrentSlot, WeatherDataset};

/// Parse one entry of an hourly `time` axis.
///
/// The provider emits zone-local wall times without an offset
/// (`2024-01-15 14:00`); RFC 3339 is accepted as well. Naive times are
/// interpreted as UTC so the comparison stays independent of the host
/// timezone.
pub fn parse_slot_time(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%dT%H:%M:%S",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ndt| Utc.from_utc_datetime(&ndt))
}

/// Extract the slot for the nearest present-or-future hour, relative to
/// the wall clock at call time.
pub fn extract_current(dataset: &WeatherDataset) -> CurrentSlot {
    extract_current_at(dataset, Utc::now())
}

/// Extract the slot for the nearest present-or-future hour relative to `now`.
///
/// Selects the first index whose timestamp parses to an instant `>= now`;
/// when `now` is past the end of the series, falls back to the last slot.
/// Unparseable timestamps never match. Fields whose array is too short to
/// cover the chosen index are omitted from the result; non-array values
/// are skipped entirely.
pub fn extract_current_at(dataset: &WeatherDataset, now: DateTime<Utc>) -> CurrentSlot {
    let times = &dataset.series.time;

    let target = times
        .iter()
        .position(|t| parse_slot_time(t).is_some_and(|dt| dt >= now));

    let Some(index) = target.or_else(|| times.len().checked_sub(1)) else {
        // Empty time axis: nothing to project.
        return CurrentSlot {
            time: String::new(),
            units: dataset.units.clone(),
            fields: Map::new(),
        };
    };

    let mut fields = Map::new();
    for (key, values) in &dataset.series.fields {
        if let Value::Array(values) = values {
            if values.len() > index {
                fields.insert(key.clone(), values[index].clone());
            }
        }
    }

    CurrentSlot {
        time: times[index].clone(),
        units: dataset.units.clone(),
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WeatherDataset;
    use serde_json::json;

    fn dataset(value: Value) -> WeatherDataset {
        serde_json::from_value(value).unwrap()
    }

    fn three_hour_dataset() -> WeatherDataset {
        dataset(json!({
            "metadata": {"name": "Basel"},
            "units": {"temperature": "C"},
            "data_1h": {
                "time": ["2025-12-01 01:00", "2025-12-01 02:00", "2025-12-01 03:00"],
                "temperature": [10, 12, 15]
            }
        }))
    }

    fn at(s: &str) -> DateTime<Utc> {
        parse_slot_time(s).unwrap()
    }

    #[test]
    fn selects_nearest_future_hour() {
        let slot = extract_current_at(&three_hour_dataset(), at("2025-12-01 01:30"));

        assert_eq!(slot.time, "2025-12-01 02:00");
        assert_eq!(slot.fields["temperature"], 12);
        assert_eq!(slot.units["temperature"], "C");
    }

    #[test]
    fn exact_hour_matches_itself() {
        let slot = extract_current_at(&three_hour_dataset(), at("2025-12-01 02:00"));
        assert_eq!(slot.time, "2025-12-01 02:00");
    }

    #[test]
    fn falls_back_to_last_slot_when_past_the_end() {
        let slot = extract_current_at(&three_hour_dataset(), at("2026-01-01 00:00"));

        assert_eq!(slot.time, "2025-12-01 03:00");
        assert_eq!(slot.fields["temperature"], 15);
    }

    #[test]
    fn selects_first_slot_when_before_the_start() {
        let slot = extract_current_at(&three_hour_dataset(), at("2025-11-30 00:00"));

        assert_eq!(slot.time, "2025-12-01 01:00");
        assert_eq!(slot.fields["temperature"], 10);
    }

    #[test]
    fn short_arrays_still_project_valid_indices() {
        let data = dataset(json!({
            "metadata": {},
            "units": {},
            "data_1h": {
                "time": ["2025-12-01 01:00", "2025-12-01 02:00", "2025-12-01 03:00"],
                "temperature": [10, 20]
            }
        }));

        let slot = extract_current_at(&data, at("2025-12-01 01:30"));
        assert_eq!(slot.fields["temperature"], 20);
    }

    #[test]
    fn too_short_arrays_are_omitted_not_null() {
        let data = dataset(json!({
            "metadata": {},
            "units": {},
            "data_1h": {
                "time": ["2025-12-01 01:00", "2025-12-01 02:00", "2025-12-01 03:00"],
                "temperature": [10, 20],
                "windspeed": [3.5, 4.0, 4.5]
            }
        }));

        let slot = extract_current_at(&data, at("2025-12-01 02:30"));
        assert!(!slot.fields.contains_key("temperature"));
        assert_eq!(slot.fields["windspeed"], 4.5);
    }

    #[test]
    fn non_array_values_are_skipped() {
        let data = dataset(json!({
            "metadata": {},
            "units": {},
            "data_1h": {
                "time": ["2025-12-01 01:00"],
                "temperature": null,
                "windspeed": "not-a-series",
                "uvindex": [3]
            }
        }));

        let slot = extract_current_at(&data, at("2025-12-01 00:00"));
        assert!(!slot.fields.contains_key("temperature"));
        assert!(!slot.fields.contains_key("windspeed"));
        assert_eq!(slot.fields["uvindex"], 3);
    }

    #[test]
    fn unparseable_timestamps_never_match() {
        let data = dataset(json!({
            "metadata": {},
            "units": {},
            "data_1h": {
                "time": ["garbage", "2025-12-01 02:00"],
                "temperature": [10, 12]
            }
        }));

        let slot = extract_current_at(&data, at("2025-12-01 00:00"));
        assert_eq!(slot.time, "2025-12-01 02:00");
        assert_eq!(slot.fields["temperature"], 12);
    }

    #[test]
    fn empty_time_axis_yields_empty_slot() {
        let data = dataset(json!({
            "metadata": {},
            "units": {"temperature": "C"},
            "data_1h": {
                "time": [],
                "temperature": [10]
            }
        }));

        let slot = extract_current_at(&data, at("2025-12-01 00:00"));
        assert_eq!(slot.time, "");
        assert!(slot.fields.is_empty());
        assert_eq!(slot.units["temperature"], "C");
    }

    #[test]
    fn input_is_never_mutated() {
        let data = three_hour_dataset();
        let before = data.clone();

        let _ = extract_current_at(&data, at("2025-12-01 01:30"));
        assert_eq!(data, before);
    }

    #[test]
    fn rfc3339_times_parse_too() {
        let slot = extract_current_at(
            &dataset(json!({
                "metadata": {},
                "units": {},
                "data_1h": {
                    "time": ["2025-12-01T01:00:00Z", "2025-12-01T02:00:00Z"],
                    "temperature": [10, 12]
                }
            })),
            at("2025-12-01 01:30"),
        );

        assert_eq!(slot.time, "2025-12-01T02:00:00Z");
    }
}
