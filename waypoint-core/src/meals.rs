//! Per-day profile used by the fit rules: density, meal coverage, morning load.

use std::collections::HashSet;

use crate::category::{self, CategoryKind, CategoryKinds};
use crate::trip::TripDay;

const LUNCH_START: u32 = 11 * 60;
const LUNCH_END: u32 = 14 * 60;
const DINNER_START: u32 = 18 * 60;
const NOON: u32 = 12 * 60;

/// Which meals a day already covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealCoverage {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
}

impl MealCoverage {
    pub fn of(day: &TripDay) -> Self {
        let mut cov = MealCoverage::default();
        for item in &day.items {
            let kinds = CategoryKinds::classify(&item.category);
            let minutes = item.time_slot.map(|s| s.minutes());

            if kinds.contains(CategoryKind::Breakfast) {
                cov.breakfast = true;
            }
            if category::has_keyword(&item.category, &["lunch"]) {
                cov.lunch = true;
            }
            if category::has_keyword(&item.category, &["dinner"]) {
                cov.dinner = true;
            }

            if !kinds.is_food() {
                continue;
            }
            // Untimed food items say nothing about which meal they cover.
            match minutes {
                Some(m) if m < LUNCH_START => cov.breakfast = true,
                Some(m) if m < LUNCH_END => cov.lunch = true,
                Some(m) if m >= DINNER_START => cov.dinner = true,
                _ => {}
            }
        }
        cov
    }
}

/// Everything the rules need to know about one day, computed once per day.
#[derive(Debug, Clone)]
pub struct DayProfile {
    pub day_number: u32,
    pub item_count: usize,
    pub meals: MealCoverage,
    /// No item scheduled before noon.
    pub morning_free: bool,
    /// Normalized categories already on the day.
    pub categories: HashSet<String>,
}

impl DayProfile {
    pub fn of(day: &TripDay) -> Self {
        let morning_free = !day
            .items
            .iter()
            .filter_map(|i| i.time_slot)
            .any(|s| s.minutes() < NOON);

        Self {
            day_number: day.day_number,
            item_count: day.items.len(),
            meals: MealCoverage::of(day),
            morning_free,
            categories: day
                .items
                .iter()
                .map(|i| category::normalize(&i.category))
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn has_category(&self, normalized: &str) -> bool {
        self.categories.contains(normalized)
    }
}
