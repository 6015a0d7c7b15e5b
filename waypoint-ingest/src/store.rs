//! In-memory trip store and file loading.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;

use waypoint_core::{Trip, TripDay, TripSource};

use crate::parsers::{parse_itinerary_csv, parse_trip_json};

/// Load a trip from a `.json` export or an itinerary `.csv`.
///
/// CSV files carry no trip metadata, so the file stem is used as id and name.
pub fn load_trip(path: impl AsRef<Path>) -> Result<Trip> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            parse_trip_json(&text).with_context(|| format!("parsing {}", path.display()))
        }
        "csv" => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("trip")
                .to_string();
            let mut trip = Trip::new(stem.clone(), stem);
            trip.days = parse_itinerary_csv(path)?;
            Ok(trip)
        }
        other => bail!(
            "unsupported trip file {} (extension '{}'; expected .json or .csv)",
            path.display(),
            other
        ),
    }
}

#[derive(Debug, Clone, Default)]
pub struct TripStore {
    trips: HashMap<String, Trip>,
}

impl TripStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace by trip id.
    pub fn insert(&mut self, trip: Trip) {
        self.trips.insert(trip.id.clone(), trip);
    }

    pub fn get(&self, trip_id: &str) -> Option<&Trip> {
        self.trips.get(trip_id)
    }

    pub fn get_mut(&mut self, trip_id: &str) -> Option<&mut Trip> {
        self.trips.get_mut(trip_id)
    }

    pub fn remove(&mut self, trip_id: &str) -> Option<Trip> {
        self.trips.remove(trip_id)
    }
}

impl TripSource for TripStore {
    fn days(&self, trip_id: &str) -> Option<Vec<TripDay>> {
        self.get(trip_id).map(|t| t.days.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_as_trip_source() {
        let mut store = TripStore::new();
        let mut trip = Trip::new("rome", "Rome");
        trip.add_day(None);
        store.insert(trip);

        assert_eq!(store.days("rome").map(|d| d.len()), Some(1));
        assert!(store.days("paris").is_none());

        store.get_mut("rome").unwrap().add_day(None);
        assert_eq!(store.days("rome").map(|d| d.len()), Some(2));

        assert!(store.remove("rome").is_some());
        assert!(store.days("rome").is_none());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_trip("trip.xlsx").unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }
}
