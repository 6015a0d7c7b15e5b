//! Trip JSON export parser.
//!
//! Shape (camelCase, as exported by the backend):
//!   { "id": "rome", "name": "Rome", "days": [
//!       { "dayNumber": 1, "date": "2026-05-01", "items": [
//!           { "destination": { "id": "roscioli", "name": "Roscioli" },
//!             "timeSlot": "12:30", "category": "restaurant" } ] } ] }

use anyhow::{bail, Context, Result};

use waypoint_core::Trip;

/// Parse and validate a trip export. Days come back sorted by day number.
pub fn parse_trip_json(text: &str) -> Result<Trip> {
    let mut trip: Trip = serde_json::from_str(text).context("parse trip json")?;

    trip.days.sort_by_key(|d| d.day_number);
    for (i, day) in trip.days.iter().enumerate() {
        let expected = i as u32 + 1;
        if day.day_number != expected {
            bail!(
                "trip {}: expected day {} but found day {}",
                trip.id,
                expected,
                day.day_number
            );
        }
    }

    tracing::debug!(trip = %trip.id, days = trip.days.len(), items = trip.item_count(), "parsed trip json");
    Ok(trip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::TimeSlot;

    #[test]
    fn test_parse_export() {
        let json = r#"{
          "id": "rome", "name": "Rome",
          "days": [
            { "dayNumber": 2, "items": [] },
            { "dayNumber": 1, "date": "2026-05-01", "items": [
              { "destination": { "id": "roscioli", "name": "Roscioli" },
                "timeSlot": "12:30", "category": "restaurant" },
              { "destination": { "id": "pantheon", "name": "Pantheon" } }
            ] }
          ]
        }"#;
        let trip = parse_trip_json(json).unwrap();
        assert_eq!(trip.days.len(), 2);
        assert_eq!(trip.days[0].day_number, 1);
        assert_eq!(trip.days[0].items[0].time_slot, TimeSlot::from_hm(12, 30));
        assert_eq!(trip.days[0].items[1].category, "");
        assert!(trip.days[0].items[1].time_slot.is_none());
    }

    #[test]
    fn test_gap_in_days_rejected() {
        let json = r#"{ "id": "x", "name": "X", "days": [ { "dayNumber": 1 }, { "dayNumber": 3 } ] }"#;
        let err = parse_trip_json(json).unwrap_err();
        assert!(err.to_string().contains("expected day 2"));
    }

    #[test]
    fn test_bad_time_slot_rejected() {
        let json = r#"{ "id": "x", "name": "X", "days": [ { "dayNumber": 1, "items": [
            { "destination": { "id": "a", "name": "A" }, "timeSlot": "late" } ] } ] }"#;
        assert!(parse_trip_json(json).is_err());
    }
}
