//! Drawer navigation: which view is active inside the single drawer surface,
//! with a history stack for back-navigation.
//!
//! The state is an owned value; each host keeps its own instance.
//!
//! Transitions:
//! - `open`: fresh root, history cleared
//! - `navigate`: push current, show new (only transition that grows history)
//! - `back`: pop and restore, or close when history is empty
//! - `close`: hide and clear history; mode/context reset after `reset_delay`
//!   so an exit animation can still render the old content
//! - `update_context`: shallow merge into the current context

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::request::{RequestToken, RequestTracker};

pub const DEFAULT_RESET_DELAY_MS: i64 = 300;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawerMode {
    #[default]
    Destination,
    Trip,
    Similar,
    WhyThis,
    AddToTrip,
    TripSelect,
    Account,
    Settings,
    Share,
    Auth,
}

/// Opaque payload for the current mode (which destination, which trip, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawerContext(Map<String, Value>);

impl DrawerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Shallow merge: keys in `partial` overwrite existing ones.
    pub fn merge(&mut self, partial: DrawerContext) {
        self.0.extend(partial.0);
    }
}

impl From<Map<String, Value>> for DrawerContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavEntry {
    pub mode: DrawerMode,
    pub context: DrawerContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// A previous view was restored.
    Restored(DrawerMode),
    /// History was empty; the drawer closed.
    Closed,
}

#[derive(Debug, Clone)]
pub struct DrawerState {
    is_open: bool,
    current: NavEntry,
    history: Vec<NavEntry>,
    history_limit: Option<usize>,
    reset_delay: Duration,
    pending_reset: Option<DateTime<Utc>>,
    requests: RequestTracker,
}

impl Default for DrawerState {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawerState {
    pub fn new() -> Self {
        Self {
            is_open: false,
            current: NavEntry {
                mode: DrawerMode::default(),
                context: DrawerContext::default(),
            },
            history: Vec::new(),
            history_limit: None,
            reset_delay: Duration::milliseconds(DEFAULT_RESET_DELAY_MS),
            pending_reset: None,
            requests: RequestTracker::new(),
        }
    }

    /// Cap the history; the oldest entries are dropped first. `None` = unbounded.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    /// Negative delays count as zero.
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay.max(Duration::zero());
        self
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn mode(&self) -> DrawerMode {
        self.current.mode
    }

    pub fn context(&self) -> &DrawerContext {
        &self.current.context
    }

    pub fn current(&self) -> &NavEntry {
        &self.current
    }

    /// Oldest first.
    pub fn history(&self) -> &[NavEntry] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn open(&mut self, mode: DrawerMode, context: DrawerContext) {
        tracing::debug!(?mode, "drawer open");
        self.is_open = true;
        self.pending_reset = None;
        self.history.clear();
        self.current = NavEntry { mode, context };
        self.requests.invalidate();
    }

    pub fn navigate(&mut self, mode: DrawerMode, context: DrawerContext) {
        tracing::debug!(from = ?self.current.mode, to = ?mode, depth = self.history.len() + 1, "drawer navigate");
        // New content written after a close must survive the pending reset.
        self.pending_reset = None;
        let previous = std::mem::replace(&mut self.current, NavEntry { mode, context });
        self.history.push(previous);
        self.trim_history();
        self.requests.invalidate();
    }

    pub fn back(&mut self, now: DateTime<Utc>) -> BackOutcome {
        let Some(previous) = self.history.pop() else {
            self.close(now);
            return BackOutcome::Closed;
        };
        tracing::debug!(from = ?self.current.mode, to = ?previous.mode, "drawer back");
        let mode = previous.mode;
        self.current = previous;
        self.requests.invalidate();
        BackOutcome::Restored(mode)
    }

    pub fn close(&mut self, now: DateTime<Utc>) {
        tracing::debug!(mode = ?self.current.mode, "drawer close");
        self.is_open = false;
        self.history.clear();
        // A deadline past the representable range never fires.
        self.pending_reset = Some(
            now.checked_add_signed(self.reset_delay)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        );
        self.requests.invalidate();
    }

    /// Apply a pending close reset once its delay has elapsed. Returns true if the
    /// payload was reset.
    pub fn settle(&mut self, now: DateTime<Utc>) -> bool {
        match self.pending_reset {
            Some(at) if now >= at && !self.is_open => {
                self.pending_reset = None;
                self.current = NavEntry {
                    mode: DrawerMode::default(),
                    context: DrawerContext::default(),
                };
                true
            }
            _ => false,
        }
    }

    pub fn reset_pending(&self) -> bool {
        self.pending_reset.is_some()
    }

    pub fn update_context(&mut self, partial: DrawerContext) {
        self.current.context.merge(partial);
    }

    /// Start an async context load for the current view.
    pub fn begin_request(&mut self) -> RequestToken {
        self.requests.issue()
    }

    /// Merge a load's result if it is still wanted. Returns false for stale responses.
    pub fn apply_response(&mut self, token: RequestToken, partial: DrawerContext) -> bool {
        if !self.requests.complete(token) {
            tracing::debug!(token = token.id(), "dropping stale drawer response");
            return false;
        }
        self.update_context(partial);
        true
    }

    fn trim_history(&mut self) {
        if let Some(limit) = self.history_limit {
            if self.history.len() > limit {
                let excess = self.history.len() - limit;
                self.history.drain(..excess);
            }
        }
    }
}
