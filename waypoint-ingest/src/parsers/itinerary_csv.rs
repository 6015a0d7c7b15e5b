//! Itinerary CSV export parser.
//!
//! Expected header (extra columns are ignored):
//!   day,date,time,destination_id,name,category
//!   1,2026-05-01,9am,cafe-sant-eustachio,Sant'Eustachio,cafe
//!   1,,12:30,roscioli,Roscioli,restaurant
//!   3,2026-05-03,,borghese,Galleria Borghese,museum
//!
//! Day numbers with no rows in between become empty days. Day numbers above
//! `MAX_TRIP_DAYS` are rejected.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;

use waypoint_core::{DestinationRef, ScheduledItem, TripDay};

use super::loose_time::parse_loose_time;
use crate::types::ItineraryRow;

pub const MAX_TRIP_DAYS: u32 = 365;

pub fn parse_itinerary_csv(path: impl AsRef<Path>) -> Result<Vec<TripDay>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_itinerary_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn parse_itinerary_reader(reader: impl Read) -> Result<Vec<TripDay>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut days: Vec<TripDay> = Vec::new();

    for (i, result) in rdr.deserialize::<ItineraryRow>().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let row = result.with_context(|| format!("line {line}: malformed row"))?;

        if row.destination_id.is_empty() {
            tracing::warn!(line, "skipping row without destination_id");
            continue;
        }
        if row.day == 0 {
            bail!("line {line}: day numbers start at 1");
        }
        if row.day > MAX_TRIP_DAYS {
            bail!("line {line}: day {} exceeds the {MAX_TRIP_DAYS}-day limit", row.day);
        }

        let time_slot = match row.time.as_deref() {
            Some(t) if !t.is_empty() => {
                Some(parse_loose_time(t).with_context(|| format!("line {line}: bad time"))?)
            }
            _ => None,
        };
        let date = match row.date.as_deref() {
            Some(d) if !d.is_empty() => Some(
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .with_context(|| format!("line {line}: bad date '{d}'"))?,
            ),
            _ => None,
        };

        while days.len() < row.day as usize {
            days.push(TripDay::new(days.len() as u32 + 1));
        }
        let day = &mut days[row.day as usize - 1];
        if day.date.is_none() {
            day.date = date;
        }

        let name = if row.name.is_empty() {
            row.destination_id.clone()
        } else {
            row.name
        };
        day.items.push(ScheduledItem {
            destination: DestinationRef::new(row.destination_id, name),
            time_slot,
            category: row.category,
        });
    }

    tracing::debug!(days = days.len(), "parsed itinerary csv");
    Ok(days)
}
