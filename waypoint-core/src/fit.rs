//! Trip-fit scorer: pick the best day to add a destination to.
//!
//! Scoring per day:
//! - base 50
//! - every applying rule of the chain adds its points (see `fit_rules`)
//! - candidates without a category only get density rules
//! - at most one meal rule counts per day
//!
//! The best day is the first one with the highest raw score. The reported score is
//! clamped to 0..=100 and mapped to a tier. Nothing here is cached; call it again
//! whenever the trip changes.

use serde::{Deserialize, Serialize};

use crate::fit_rules::{default_rules, Candidate, FitRule, RuleKind};
use crate::meals::DayProfile;
use crate::time::TimeSlot;
use crate::trip::TripDay;

pub const BASE_SCORE: i32 = 50;
pub const DEFAULT_REASON: &str = "Balanced day";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitTier {
    Perfect,
    Good,
    Possible,
    Conflict,
}

impl FitTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => FitTier::Perfect,
            s if s >= 65 => FitTier::Good,
            s if s < 40 => FitTier::Conflict,
            _ => FitTier::Possible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitAnalysis {
    pub score: u8,
    pub best_day: u32,
    pub reason: String,
    pub time_slot: Option<TimeSlot>,
    pub category: FitTier,
    /// Names of the rules that fired for `best_day`, in chain order.
    #[serde(default)]
    pub matched_rules: Vec<String>,
}

/// Unclamped evaluation of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayScore {
    pub day_number: u32,
    pub raw: i32,
    pub reason: Option<&'static str>,
    pub slot: Option<TimeSlot>,
    pub matched: Vec<&'static str>,
}

impl DayScore {
    pub fn clamped(&self) -> u8 {
        self.raw.clamp(0, 100) as u8
    }
}

/// Evaluate one day against the rule chain.
pub fn score_day(candidate: &Candidate, day: &TripDay, rules: &[FitRule]) -> DayScore {
    let profile = DayProfile::of(day);
    let mut out = DayScore {
        day_number: day.day_number,
        raw: BASE_SCORE,
        reason: None,
        slot: None,
        matched: Vec::new(),
    };

    let mut meal_filled = false;
    for rule in rules {
        if candidate.is_generic() && rule.kind != RuleKind::Density {
            continue;
        }
        if meal_filled && rule.kind == RuleKind::Meal {
            continue;
        }
        if !rule.applies(candidate, &profile) {
            continue;
        }
        meal_filled |= rule.kind == RuleKind::Meal;
        out.raw += rule.points;
        out.matched.push(rule.name);
        if out.reason.is_none() {
            out.reason = rule.reason;
        }
        if out.slot.is_none() {
            out.slot = rule.slot();
        }
    }

    tracing::trace!(
        day = out.day_number,
        raw = out.raw,
        rules = ?out.matched,
        "scored day"
    );
    out
}

/// Score every day, in input order.
pub fn score_days(category: &str, days: &[TripDay], rules: &[FitRule]) -> Vec<DayScore> {
    let candidate = Candidate::new(category);
    days.iter().map(|d| score_day(&candidate, d, rules)).collect()
}

/// Recommend a day for a destination of `category` using the default rules.
///
/// Returns `None` when the trip has no days.
pub fn analyze_fit(category: &str, days: &[TripDay]) -> Option<FitAnalysis> {
    analyze_fit_with(category, days, default_rules())
}

pub fn analyze_fit_with(category: &str, days: &[TripDay], rules: &[FitRule]) -> Option<FitAnalysis> {
    let mut best: Option<DayScore> = None;
    for scored in score_days(category, days, rules) {
        // Strictly greater, so ties keep the earlier day.
        if best.as_ref().map(|b| scored.raw > b.raw).unwrap_or(true) {
            best = Some(scored);
        }
    }

    let best = best?;
    let score = best.clamped();
    Some(FitAnalysis {
        score,
        best_day: best.day_number,
        reason: best.reason.unwrap_or(DEFAULT_REASON).to_string(),
        time_slot: best.slot,
        category: FitTier::from_score(score),
        matched_rules: best.matched.iter().map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::{DestinationRef, ScheduledItem};

    fn item(category: &str, at: Option<(u32, u32)>) -> ScheduledItem {
        let mut it = ScheduledItem::new(DestinationRef::new(category, category), category);
        it.time_slot = at.and_then(|(h, m)| TimeSlot::from_hm(h, m));
        it
    }

    fn day(n: u32, items: Vec<ScheduledItem>) -> TripDay {
        let mut d = TripDay::new(n);
        d.items = items;
        d
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(FitTier::from_score(100), FitTier::Perfect);
        assert_eq!(FitTier::from_score(80), FitTier::Perfect);
        assert_eq!(FitTier::from_score(79), FitTier::Good);
        assert_eq!(FitTier::from_score(65), FitTier::Good);
        assert_eq!(FitTier::from_score(64), FitTier::Possible);
        assert_eq!(FitTier::from_score(40), FitTier::Possible);
        assert_eq!(FitTier::from_score(39), FitTier::Conflict);
        assert_eq!(FitTier::from_score(0), FitTier::Conflict);
    }

    #[test]
    fn test_empty_trip_has_no_recommendation() {
        assert!(analyze_fit("restaurant", &[]).is_none());
        assert!(analyze_fit("", &[]).is_none());
    }

    #[test]
    fn test_restaurant_fills_meal_gap() {
        let days = vec![day(1, vec![item("museum", Some((10, 0)))])];
        let fit = analyze_fit("restaurant", &days).unwrap();
        assert_eq!(fit.best_day, 1);
        assert_eq!(fit.reason, "Fills meal gap");
        assert_eq!(fit.time_slot, TimeSlot::from_hm(19, 0));
        // 50 + 25 (meal) + 10 (variety) + 20 (density) clamps to 100.
        assert_eq!(fit.score, 100);
        assert_eq!(fit.category, FitTier::Perfect);
        assert_eq!(fit.matched_rules, vec!["meal_gap", "diversity", "light_day"]);
    }

    #[test]
    fn test_single_empty_day_generic() {
        let days = vec![day(1, vec![])];
        let fit = analyze_fit("", &days).unwrap();
        assert_eq!(fit.best_day, 1);
        assert_eq!(fit.score, 70);
        assert_eq!(fit.category, FitTier::Good);
        assert_eq!(fit.reason, "Light day with plenty of room");
        assert!(fit.time_slot.is_none());
    }

    #[test]
    fn test_generic_ignores_keyword_rules() {
        let days = vec![day(1, vec![item("museum", Some((10, 0)))])];
        let fit = analyze_fit("   ", &days).unwrap();
        assert_eq!(fit.matched_rules, vec!["light_day"]);
        assert_eq!(fit.score, 70);
    }

    #[test]
    fn test_unknown_category_only_gets_variety_and_density() {
        let days: Vec<TripDay> = (1..=2).map(|n| day(n, vec![])).collect();
        let fit = analyze_fit("zz-unknown-zz", &days).unwrap();
        assert_eq!(fit.score, 80);
        assert_eq!(fit.reason, "Adds variety to the day");
    }

    #[test]
    fn test_ties_keep_first_day() {
        let days = vec![day(1, vec![]), day(2, vec![]), day(3, vec![])];
        let fit = analyze_fit("park", &days).unwrap();
        assert_eq!(fit.best_day, 1);
    }

    #[test]
    fn test_ties_follow_input_order() {
        let days = vec![day(3, vec![]), day(1, vec![])];
        let fit = analyze_fit("park", &days).unwrap();
        assert_eq!(fit.best_day, 3);
    }

    #[test]
    fn test_bar_prefers_day_with_dinner() {
        let days = vec![
            day(1, vec![item("museum", Some((10, 0)))]),
            day(2, vec![item("restaurant", Some((19, 30)))]),
        ];
        let fit = analyze_fit("bar", &days).unwrap();
        assert_eq!(fit.best_day, 2);
        assert_eq!(fit.reason, "Perfect after dinner");
        assert_eq!(fit.time_slot, TimeSlot::from_hm(21, 0));
    }

    #[test]
    fn test_dinner_gap_and_lunch_gap() {
        let lunch_only = vec![day(1, vec![item("bistro", Some((12, 0)))])];
        let fit = analyze_fit("restaurant", &lunch_only).unwrap();
        assert_eq!(fit.reason, "Fills dinner gap");

        let dinner_only = vec![day(1, vec![item("trattoria", Some((20, 0)))])];
        let fit = analyze_fit("restaurant", &dinner_only).unwrap();
        assert_eq!(fit.reason, "Fills lunch gap");
        assert_eq!(fit.time_slot, TimeSlot::from_hm(12, 30));
    }

    #[test]
    fn test_crowded_day_is_avoided() {
        let busy: Vec<ScheduledItem> = (0..7).map(|i| item(&format!("spot{i}"), None)).collect();
        let days = vec![day(1, busy), day(2, vec![item("x", None); 5])];
        let fit = analyze_fit("museum", &days).unwrap();
        assert_eq!(fit.best_day, 2);
    }

    #[test]
    fn test_crowded_only_day_can_conflict() {
        let busy: Vec<ScheduledItem> = (0..8).map(|_| item("shopping", Some((9, 0)))).collect();
        let days = vec![day(1, busy)];
        let fit = analyze_fit("shopping", &days).unwrap();
        // 50 - 20, repeated category so no variety bonus.
        assert_eq!(fit.score, 30);
        assert_eq!(fit.category, FitTier::Conflict);
        assert_eq!(fit.reason, "Day is already packed");
    }

    #[test]
    fn test_balanced_day_default_reason() {
        let days = vec![day(1, vec![item("shopping", None); 5])];
        let fit = analyze_fit("shopping", &days).unwrap();
        assert_eq!(fit.score, 50);
        assert_eq!(fit.reason, DEFAULT_REASON);
        assert_eq!(fit.category, FitTier::Possible);
    }

    #[test]
    fn test_idempotent() {
        let days = vec![
            day(1, vec![item("cafe", Some((8, 30))), item("museum", Some((10, 0)))]),
            day(2, vec![]),
        ];
        let a = analyze_fit("Wine Bar", &days);
        let b = analyze_fit("Wine Bar", &days);
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_rule_chain() {
        fn always(_: &Candidate, _: &DayProfile) -> bool {
            true
        }
        let rules = [FitRule::new("flat", RuleKind::Category, -45, Some("Nope"), None, always)];
        let days = vec![day(1, vec![])];
        let fit = analyze_fit_with("park", &days, &rules).unwrap();
        assert_eq!(fit.score, 5);
        assert_eq!(fit.reason, "Nope");
        assert_eq!(fit.category, FitTier::Conflict);
    }

    #[test]
    fn test_negative_raw_clamps_to_zero() {
        fn always(_: &Candidate, _: &DayProfile) -> bool {
            true
        }
        let rules = [FitRule::new("sink", RuleKind::Density, -130, Some("Nope"), None, always)];
        let days = vec![day(1, vec![]), day(2, vec![])];
        let scores = score_days("park", &days, &rules);
        assert_eq!(scores[0].raw, -80);
        assert_eq!(scores[0].clamped(), 0);

        let fit = analyze_fit_with("park", &days, &rules).unwrap();
        assert_eq!(fit.score, 0);
        assert_eq!(fit.best_day, 1);
        assert_eq!(fit.category, FitTier::Conflict);
    }

    #[test]
    fn test_brunch_restaurant_gets_one_meal_bonus() {
        let days = vec![day(1, vec![item("museum", Some((10, 0)))])];
        let fit = analyze_fit("brunch restaurant", &days).unwrap();
        assert_eq!(fit.matched_rules, vec!["meal_gap", "diversity", "light_day"]);
        assert_eq!(fit.reason, "Fills meal gap");

        let scores = score_days("brunch restaurant", &days, default_rules());
        // 50 + 25 + 10 + 20, no second meal bonus.
        assert_eq!(scores[0].raw, 105);
    }

    #[test]
    fn test_serializes_camel_case() {
        let days = vec![day(1, vec![])];
        let fit = analyze_fit("park", &days).unwrap();
        let json = serde_json::to_value(&fit).unwrap();
        assert_eq!(json["bestDay"], 1);
        assert_eq!(json["timeSlot"], "15:00");
        assert_eq!(json["category"], "perfect");
    }
}
