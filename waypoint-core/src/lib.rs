//! waypoint-core: trip model, trip-fit scoring, co-visitation suggestions and drawer
//! navigation state

pub mod advisor;
pub mod category;
pub mod drawer;
pub mod fit;
pub mod fit_rules;
pub mod meals;
pub mod request;
pub mod sequence;
pub mod time;
pub mod trip;

pub use advisor::{DestinationLookup, FitAdvisor, TripSource};
pub use category::{CategoryKind, CategoryKinds};
pub use drawer::{BackOutcome, DrawerContext, DrawerMode, DrawerState, NavEntry};
pub use fit::{analyze_fit, analyze_fit_with, score_days, DayScore, FitAnalysis, FitTier};
pub use fit_rules::{default_rules, Candidate, FitRule, RuleKind, DEFAULT_RULES};
pub use meals::{DayProfile, MealCoverage};
pub use request::{RequestToken, RequestTracker};
pub use sequence::{complete_day, CoVisitGraph, NextPlace, Visit};
pub use time::TimeSlot;
pub use trip::{DestinationRef, ScheduledItem, Trip, TripDay};
