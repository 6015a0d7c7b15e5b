pub mod itinerary_csv;
pub mod loose_time;
pub mod trip_json;
pub mod visits_csv;

pub use itinerary_csv::{parse_itinerary_csv, parse_itinerary_reader, MAX_TRIP_DAYS};
pub use loose_time::parse_loose_time;
pub use trip_json::parse_trip_json;
pub use visits_csv::{parse_visits_csv, parse_visits_reader};
