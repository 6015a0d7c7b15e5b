//! Loose time-of-day parsing for hand-edited itineraries.
//!
//! Accepted: "18:30", "9:05", "9am", "6:30 pm", "12 PM", "7".

use anyhow::{bail, Result};
use regex::Regex;

use waypoint_core::TimeSlot;

pub fn parse_loose_time(s: &str) -> Result<TimeSlot> {
    let time_re = Regex::new(concat!(
        r"(?i)^\s*(?P<hour>\d{1,2})",
        r"(?::(?P<minute>\d{2}))?\s*",
        r"(?P<meridiem>am|pm|a\.m\.|p\.m\.)?\s*$"
    ))?;

    let Some(caps) = time_re.captures(s) else {
        bail!("unrecognized time '{s}'");
    };

    let mut hour: u32 = caps["hour"].parse()?;
    let minute: u32 = match caps.name("minute") {
        Some(m) => m.as_str().parse()?,
        None => 0,
    };

    if let Some(meridiem) = caps.name("meridiem") {
        if hour == 0 || hour > 12 {
            bail!("hour {hour} out of range for 12-hour time '{s}'");
        }
        let pm = meridiem.as_str().to_lowercase().starts_with('p');
        hour = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, true) => h + 12,
            (h, false) => h,
        };
    }

    match TimeSlot::from_hm(hour, minute) {
        Some(slot) => Ok(slot),
        None => bail!("time out of range '{s}'"),
    }
}
