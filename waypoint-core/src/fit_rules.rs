//! Ordered scoring rules for the trip-fit scorer.
//!
//! Each rule is a predicate over the candidate and a day profile plus a point delta,
//! an optional reason and an optional suggested slot. The chain is evaluated top to
//! bottom; every rule that applies adds its points (only the first meal rule counts),
//! and the first applying rule with a reason (or slot) supplies the day's reason (or slot).

use serde::{Deserialize, Serialize};

use crate::category::{self, CategoryKind, CategoryKinds};
use crate::meals::DayProfile;
use crate::time::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Meal,
    Category,
    Diversity,
    Density,
}

/// The destination being placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Trimmed + lower-cased; empty means "no category".
    pub category: String,
    pub kinds: CategoryKinds,
}

impl Candidate {
    pub fn new(category: &str) -> Self {
        let category = category::normalize(category);
        let kinds = CategoryKinds::classify(&category);
        Self { category, kinds }
    }

    /// No category: only density rules apply.
    pub fn is_generic(&self) -> bool {
        self.category.is_empty()
    }

    fn is(&self, kind: CategoryKind) -> bool {
        self.kinds.contains(kind)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FitRule {
    pub name: &'static str,
    pub kind: RuleKind,
    pub points: i32,
    pub reason: Option<&'static str>,
    slot_hm: Option<(u32, u32)>,
    predicate: fn(&Candidate, &DayProfile) -> bool,
}

impl FitRule {
    pub const fn new(
        name: &'static str,
        kind: RuleKind,
        points: i32,
        reason: Option<&'static str>,
        slot_hm: Option<(u32, u32)>,
        predicate: fn(&Candidate, &DayProfile) -> bool,
    ) -> Self {
        Self {
            name,
            kind,
            points,
            reason,
            slot_hm,
            predicate,
        }
    }

    pub fn applies(&self, candidate: &Candidate, day: &DayProfile) -> bool {
        (self.predicate)(candidate, day)
    }

    pub fn slot(&self) -> Option<TimeSlot> {
        self.slot_hm.and_then(|(h, m)| TimeSlot::from_hm(h, m))
    }
}

fn meal_gap(c: &Candidate, d: &DayProfile) -> bool {
    c.is(CategoryKind::Restaurant) && !d.meals.lunch && !d.meals.dinner
}

fn dinner_gap(c: &Candidate, d: &DayProfile) -> bool {
    c.is(CategoryKind::Restaurant) && d.meals.lunch && !d.meals.dinner
}

fn lunch_gap(c: &Candidate, d: &DayProfile) -> bool {
    c.is(CategoryKind::Restaurant) && d.meals.dinner && !d.meals.lunch
}

fn breakfast_gap(c: &Candidate, d: &DayProfile) -> bool {
    c.is(CategoryKind::Breakfast) && !d.meals.breakfast
}

fn bar_after_dinner(c: &Candidate, d: &DayProfile) -> bool {
    c.is(CategoryKind::Bar) && d.meals.dinner
}

fn museum_morning(c: &Candidate, d: &DayProfile) -> bool {
    c.is(CategoryKind::Museum) && d.morning_free
}

fn museum_light_day(c: &Candidate, d: &DayProfile) -> bool {
    c.is(CategoryKind::Museum) && !d.morning_free && d.item_count <= 2
}

fn park_afternoon(c: &Candidate, _d: &DayProfile) -> bool {
    c.is(CategoryKind::Park)
}

fn crowded(_c: &Candidate, d: &DayProfile) -> bool {
    d.item_count >= 7
}

fn diversity(c: &Candidate, d: &DayProfile) -> bool {
    !c.is_generic() && !d.has_category(&c.category)
}

fn light_day(_c: &Candidate, d: &DayProfile) -> bool {
    d.item_count < 3
}

fn room_left(_c: &Candidate, d: &DayProfile) -> bool {
    (3..5).contains(&d.item_count)
}

/// The default chain. Order matters for reason/slot selection only.
pub const DEFAULT_RULES: &[FitRule] = &[
    FitRule::new("meal_gap", RuleKind::Meal, 25, Some("Fills meal gap"), Some((19, 0)), meal_gap),
    FitRule::new("dinner_gap", RuleKind::Meal, 25, Some("Fills dinner gap"), Some((19, 0)), dinner_gap),
    FitRule::new("lunch_gap", RuleKind::Meal, 20, Some("Fills lunch gap"), Some((12, 30)), lunch_gap),
    FitRule::new("breakfast_gap", RuleKind::Meal, 20, Some("Perfect for breakfast"), Some((9, 0)), breakfast_gap),
    FitRule::new("bar_after_dinner", RuleKind::Category, 20, Some("Perfect after dinner"), Some((21, 0)), bar_after_dinner),
    FitRule::new("museum_morning", RuleKind::Category, 15, Some("Open morning for a visit"), Some((10, 0)), museum_morning),
    FitRule::new("museum_light_day", RuleKind::Category, 10, Some("Light day suits a visit"), None, museum_light_day),
    FitRule::new("park_afternoon", RuleKind::Category, 10, Some("Nice afternoon break"), Some((15, 0)), park_afternoon),
    FitRule::new("crowded", RuleKind::Density, -20, Some("Day is already packed"), None, crowded),
    FitRule::new("diversity", RuleKind::Diversity, 10, Some("Adds variety to the day"), None, diversity),
    FitRule::new("light_day", RuleKind::Density, 20, Some("Light day with plenty of room"), None, light_day),
    FitRule::new("room_left", RuleKind::Density, 10, Some("Room for a few more stops"), None, room_left),
];

pub fn default_rules() -> &'static [FitRule] {
    DEFAULT_RULES
}
