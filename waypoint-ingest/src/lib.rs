//! waypoint-ingest: trip, destination and visit-history sources (CSV/JSON exports) and
//! in-memory stores backing the core lookup traits.

pub mod catalog;
pub mod parsers;
pub mod store;
pub mod types;

pub use catalog::Catalog;
pub use parsers::{
    parse_itinerary_csv, parse_itinerary_reader, parse_loose_time, parse_trip_json, parse_visits_csv,
    parse_visits_reader,
};
pub use store::{load_trip, TripStore};
pub use types::{Destination, ItineraryRow};
