use chrono::{Duration, TimeZone, Utc};
use waypoint_core::{
    analyze_fit, score_days, BackOutcome, DestinationRef, DrawerContext, DrawerMode, DrawerState,
    FitTier, ScheduledItem, TimeSlot, Trip, DEFAULT_RULES,
};

const CATEGORIES: &[&str] = &[
    "", "restaurant", "cafe", "bar", "museum", "art gallery", "park", "shopping", "%%%",
    "Wine Bar & Bistro", "beach",
];

fn item(category: &str, hour: Option<u32>) -> ScheduledItem {
    let mut it = ScheduledItem::new(DestinationRef::new(category, category), category);
    it.time_slot = hour.and_then(|h| TimeSlot::from_hm(h, 0));
    it
}

/// A small grid of trips: varying day counts, densities, times and categories.
fn sample_trips() -> Vec<Trip> {
    let mut trips = Vec::new();
    for n_days in 1..=4u32 {
        for density in [0usize, 1, 3, 5, 7, 9] {
            let mut trip = Trip::new(format!("t{n_days}-{density}"), "sample");
            for d in 1..=n_days {
                trip.add_day(None);
                for i in 0..density.saturating_sub(d as usize) {
                    let cat = CATEGORIES[(i + d as usize) % CATEGORIES.len()];
                    let hour = [None, Some(8), Some(12), Some(15), Some(19), Some(22)][i % 6];
                    trip.add_item(d, item(cat, hour)).unwrap();
                }
            }
            trips.push(trip);
        }
    }
    trips
}

#[test]
fn best_day_is_an_input_day_and_score_is_bounded() {
    for trip in sample_trips() {
        for cat in CATEGORIES {
            let fit = analyze_fit(cat, &trip.days).expect("non-empty trip");
            assert!(
                trip.days.iter().any(|d| d.day_number == fit.best_day),
                "{} / {cat}: best day {} not in trip",
                trip.id,
                fit.best_day
            );
            assert!(fit.score <= 100);
            assert_eq!(fit.category, FitTier::from_score(fit.score));
        }
    }
}

#[test]
fn best_day_has_the_first_maximum_raw_score() {
    for trip in sample_trips() {
        for cat in CATEGORIES {
            let scores = score_days(cat, &trip.days, DEFAULT_RULES);
            let max = scores.iter().map(|s| s.raw).max().unwrap();
            let first = scores.iter().find(|s| s.raw == max).unwrap();
            let fit = analyze_fit(cat, &trip.days).unwrap();
            assert_eq!(fit.best_day, first.day_number);
        }
    }
}

#[test]
fn analysis_is_idempotent() {
    for trip in sample_trips() {
        for cat in CATEGORIES {
            assert_eq!(analyze_fit(cat, &trip.days), analyze_fit(cat, &trip.days));
        }
    }
}

#[test]
fn restaurant_after_museum_fills_meal_gap() {
    let mut trip = Trip::new("rome", "Rome");
    let day = trip.add_day(None);
    trip.add_item(day, item("museum", Some(10))).unwrap();

    let fit = analyze_fit("restaurant", &trip.days).unwrap();
    assert_eq!(fit.reason, "Fills meal gap");
    assert!(matches!(fit.category, FitTier::Perfect | FitTier::Good));
}

#[test]
fn adding_the_suggestion_changes_the_next_recommendation() {
    let mut trip = Trip::new("rome", "Rome");
    trip.add_day(None);
    trip.add_day(None);

    let first = analyze_fit("restaurant", &trip.days).unwrap();
    assert_eq!(first.best_day, 1);
    let slot = first.time_slot.unwrap();
    trip.add_item(first.best_day, item("restaurant", None)).unwrap();
    trip.set_time_slot(first.best_day, 0, Some(slot)).unwrap();

    // Day 1 now has dinner and repeats the category; day 2 is the better pick.
    let second = analyze_fit("restaurant", &trip.days).unwrap();
    assert_eq!(second.best_day, 2);
}

#[test]
fn drawer_walkthrough() {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
    let mut drawer = DrawerState::new();

    drawer.open(DrawerMode::Destination, DrawerContext::new().with("destinationId", "colosseum"));
    drawer.navigate(DrawerMode::WhyThis, DrawerContext::new().with("destinationId", "colosseum"));
    drawer.navigate(DrawerMode::TripSelect, DrawerContext::new());
    assert_eq!(drawer.history().len(), 2);

    assert_eq!(drawer.back(now), BackOutcome::Restored(DrawerMode::WhyThis));
    assert_eq!(drawer.back(now), BackOutcome::Restored(DrawerMode::Destination));
    assert_eq!(
        drawer.context().get("destinationId"),
        Some(&serde_json::Value::from("colosseum"))
    );
    assert!(!drawer.can_go_back());

    assert_eq!(drawer.back(now), BackOutcome::Closed);
    assert!(!drawer.is_open());
    assert!(!drawer.can_go_back());
    assert!(drawer.settle(now + Duration::seconds(1)));
    assert!(drawer.context().is_empty());
}
