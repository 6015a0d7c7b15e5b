//! Trip model: days, scheduled items and the add/remove/reorder operations on them.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::TimeSlot;

/// Reference to a destination in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationRef {
    pub id: String,
    pub name: String,
}

impl DestinationRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A destination placed on a day. Only the time slot changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    pub destination: DestinationRef,
    #[serde(default)]
    pub time_slot: Option<TimeSlot>,
    #[serde(default)]
    pub category: String,
}

impl ScheduledItem {
    pub fn new(destination: DestinationRef, category: impl Into<String>) -> Self {
        Self {
            destination,
            time_slot: None,
            category: category.into(),
        }
    }

    pub fn at(mut self, slot: TimeSlot) -> Self {
        self.time_slot = Some(slot);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDay {
    /// 1-based.
    pub day_number: u32,
    #[serde(default)]
    pub items: Vec<ScheduledItem>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl TripDay {
    pub fn new(day_number: u32) -> Self {
        Self {
            day_number,
            items: Vec::new(),
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_item(mut self, item: ScheduledItem) -> Self {
        self.items.push(item);
        self
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut ScheduledItem> {
        let len = self.items.len();
        let day = self.day_number;
        self.items
            .get_mut(index)
            .with_context(|| format!("day {day} has no item {index} ({len} items)"))
    }
}

/// A trip owns its days. Day numbers stay contiguous from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub days: Vec<TripDay>,
}

impl Trip {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            days: Vec::new(),
        }
    }

    pub fn day(&self, day_number: u32) -> Option<&TripDay> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    fn day_mut(&mut self, day_number: u32) -> Result<&mut TripDay> {
        let trip = self.id.clone();
        self.days
            .iter_mut()
            .find(|d| d.day_number == day_number)
            .with_context(|| format!("trip {trip} has no day {day_number}"))
    }

    /// Append a new day and return its number.
    pub fn add_day(&mut self, date: Option<NaiveDate>) -> u32 {
        let day_number = self.days.len() as u32 + 1;
        self.days.push(TripDay {
            day_number,
            items: Vec::new(),
            date,
        });
        day_number
    }

    /// Remove a day and renumber the ones after it.
    pub fn remove_day(&mut self, day_number: u32) -> Result<TripDay> {
        let Some(pos) = self.days.iter().position(|d| d.day_number == day_number) else {
            bail!("trip {} has no day {}", self.id, day_number);
        };
        let removed = self.days.remove(pos);
        for (i, d) in self.days.iter_mut().enumerate() {
            d.day_number = i as u32 + 1;
        }
        Ok(removed)
    }

    pub fn add_item(&mut self, day_number: u32, item: ScheduledItem) -> Result<()> {
        self.day_mut(day_number)?.items.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, day_number: u32, index: usize) -> Result<ScheduledItem> {
        let day = self.day_mut(day_number)?;
        if index >= day.items.len() {
            bail!(
                "day {} has no item {} ({} items)",
                day_number,
                index,
                day.items.len()
            );
        }
        Ok(day.items.remove(index))
    }

    /// Move an item within a day; `to` is the final index of the moved item.
    pub fn move_item(&mut self, day_number: u32, from: usize, to: usize) -> Result<()> {
        let day = self.day_mut(day_number)?;
        let len = day.items.len();
        if from >= len || to >= len {
            bail!("day {day_number}: cannot move item {from} to {to} ({len} items)");
        }
        let item = day.items.remove(from);
        day.items.insert(to, item);
        Ok(())
    }

    pub fn set_time_slot(
        &mut self,
        day_number: u32,
        index: usize,
        slot: Option<TimeSlot>,
    ) -> Result<()> {
        self.day_mut(day_number)?.item_mut(index)?.time_slot = slot;
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.days.iter().map(|d| d.items.len()).sum()
    }
}
