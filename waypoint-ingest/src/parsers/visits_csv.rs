//! Visit history CSV export, the input of the co-visitation graph.
//!
//! Expected header:
//!   user_id,destination_id,visited_at
//!   u1,pasteis,2026-06-01 08:30
//!   u1,jeronimos,2026-06-01T10:05:00
//!
//! `visited_at` accepts `YYYY-MM-DD HH:MM[:SS]`, the same with a `T`, or RFC 3339
//! (converted to UTC).

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use waypoint_core::Visit;

#[derive(Debug, Deserialize)]
struct VisitRow {
    user_id: String,
    destination_id: String,
    visited_at: String,
}

pub fn parse_visits_csv(path: impl AsRef<Path>) -> Result<Vec<Visit>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_visits_reader(file).with_context(|| format!("parsing {}", path.as_ref().display()))
}

pub fn parse_visits_reader(reader: impl Read) -> Result<Vec<Visit>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut visits = Vec::new();
    for (i, result) in rdr.deserialize::<VisitRow>().enumerate() {
        let line = i + 2;
        let row = result.with_context(|| format!("line {line}: malformed row"))?;
        if row.user_id.is_empty() || row.destination_id.is_empty() {
            tracing::warn!(line, "skipping visit without user_id or destination_id");
            continue;
        }
        let visited_at = parse_visited_at(&row.visited_at)
            .with_context(|| format!("line {line}: bad visited_at '{}'", row.visited_at))?;
        visits.push(Visit {
            user_id: row.user_id,
            destination_id: row.destination_id,
            visited_at,
        });
    }

    tracing::debug!(visits = visits.len(), "parsed visit history");
    Ok(visits)
}

fn parse_visited_at(s: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    bail!("unrecognized timestamp")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_visits() {
        let csv = "\
user_id,destination_id,visited_at
u1,pasteis,2026-06-01 08:30
u1,jeronimos,2026-06-01T10:05:00
u2,belem-tower,2026-06-01T09:00:00+02:00
,orphan,2026-06-01 12:00
";
        let visits = parse_visits_reader(csv.as_bytes()).unwrap();
        assert_eq!(visits.len(), 3);
        let day = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(visits[0].visited_at, day.and_hms_opt(8, 30, 0).unwrap());
        assert_eq!(visits[1].visited_at, day.and_hms_opt(10, 5, 0).unwrap());
        assert_eq!(visits[2].visited_at, day.and_hms_opt(7, 0, 0).unwrap());
        assert_eq!(visits[2].user_id, "u2");
    }

    #[test]
    fn test_bad_timestamp_names_line() {
        let csv = "user_id,destination_id,visited_at\nu1,a,2026-06-01 08:30\nu1,b,yesterday\n";
        let err = parse_visits_reader(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("line 3"), "{err:#}");
    }
}
