//! Fit advisor: wires the destination catalog and trip data source to the scorer.
//!
//! Real adapters (hosted backend, files) live outside this crate; these traits are
//! the only thing the scorer needs from them.

use crate::fit::{analyze_fit, FitAnalysis};
use crate::trip::TripDay;

/// Resolves a destination id to its free-text category.
pub trait DestinationLookup {
    fn category_of(&self, destination_id: &str) -> Option<String>;
}

/// Provides the current days of a trip.
pub trait TripSource {
    fn days(&self, trip_id: &str) -> Option<Vec<TripDay>>;
}

#[derive(Debug, Clone)]
pub struct FitAdvisor<L: DestinationLookup, S: TripSource> {
    lookup: L,
    source: S,
}

impl<L: DestinationLookup, S: TripSource> FitAdvisor<L, S> {
    pub fn new(lookup: L, source: S) -> Self {
        Self { lookup, source }
    }

    /// Recommend a day of `trip_id` for `destination_id`.
    ///
    /// Unknown trip (or a trip with no days) gives `None`. A destination without a
    /// known category is scored generically.
    pub fn advise(&self, trip_id: &str, destination_id: &str) -> Option<FitAnalysis> {
        let days = self.source.days(trip_id)?;
        let category = self.lookup.category_of(destination_id).unwrap_or_default();
        if category.is_empty() {
            tracing::debug!(destination_id, "no category; using generic scoring");
        }
        analyze_fit(&category, &days)
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
