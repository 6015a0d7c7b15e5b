//! Replay a recorded drawer session (JSON list of steps) and report each state.
//!
//! [
//!   { "op": "open", "mode": "destination", "context": { "destinationId": "roscioli" } },
//!   { "op": "navigate", "mode": "similar" },
//!   { "op": "request", "name": "related" },
//!   { "op": "navigate", "mode": "why-this" },
//!   { "op": "respond", "name": "related", "context": { "items": 4 } },
//!   { "op": "back" },
//!   { "op": "close", "atMs": 1000 },
//!   { "op": "settle", "atMs": 1400 }
//! ]

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use waypoint_core::{BackOutcome, DrawerContext, DrawerMode, DrawerState, RequestToken};

use crate::config::DrawerSection;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Open {
        mode: DrawerMode,
        #[serde(default)]
        context: DrawerContext,
    },
    Navigate {
        mode: DrawerMode,
        #[serde(default)]
        context: DrawerContext,
    },
    Back {
        #[serde(default, rename = "atMs")]
        at_ms: i64,
    },
    Close {
        #[serde(default, rename = "atMs")]
        at_ms: i64,
    },
    Settle {
        #[serde(rename = "atMs")]
        at_ms: i64,
    },
    Update {
        context: DrawerContext,
    },
    /// Start an async load, remembered under `name`.
    Request { name: String },
    /// Deliver the result of a named load.
    Respond {
        name: String,
        #[serde(default)]
        context: DrawerContext,
    },
}

/// State after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub step: usize,
    pub op: String,
    pub is_open: bool,
    pub mode: DrawerMode,
    pub context: DrawerContext,
    pub can_go_back: bool,
    pub depth: usize,
    /// Set for `respond`: whether the response was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
}

pub fn load_steps(path: &Path) -> Result<Vec<Step>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

pub fn drawer_from_config(cfg: &DrawerSection) -> Result<DrawerState> {
    if cfg.reset_delay_ms < 0 {
        bail!("drawer.reset_delay_ms must not be negative (got {})", cfg.reset_delay_ms);
    }
    let delay = Duration::try_milliseconds(cfg.reset_delay_ms)
        .with_context(|| format!("drawer.reset_delay_ms {} is out of range", cfg.reset_delay_ms))?;
    Ok(DrawerState::new()
        .with_history_limit(cfg.history_limit)
        .with_reset_delay(delay))
}

/// Run `steps` against `drawer`. Times are milliseconds after `start`.
pub fn replay(drawer: &mut DrawerState, steps: &[Step], start: DateTime<Utc>) -> Result<Vec<Snapshot>> {
    let mut pending: HashMap<String, RequestToken> = HashMap::new();
    let mut out = Vec::with_capacity(steps.len());
    let at = |step: usize, ms: i64| -> Result<DateTime<Utc>> {
        Duration::try_milliseconds(ms)
            .and_then(|d| start.checked_add_signed(d))
            .with_context(|| format!("step {step}: atMs {ms} is out of range"))
    };

    for (i, step) in steps.iter().enumerate() {
        let mut applied = None;
        let op = match step {
            Step::Open { mode, context } => {
                drawer.open(*mode, context.clone());
                "open".to_string()
            }
            Step::Navigate { mode, context } => {
                drawer.navigate(*mode, context.clone());
                "navigate".to_string()
            }
            Step::Back { at_ms } => match drawer.back(at(i + 1, *at_ms)?) {
                BackOutcome::Restored(_) => "back".to_string(),
                BackOutcome::Closed => "back (closed)".to_string(),
            },
            Step::Close { at_ms } => {
                drawer.close(at(i + 1, *at_ms)?);
                "close".to_string()
            }
            Step::Settle { at_ms } => {
                if drawer.settle(at(i + 1, *at_ms)?) {
                    "settle (reset)".to_string()
                } else {
                    "settle".to_string()
                }
            }
            Step::Update { context } => {
                drawer.update_context(context.clone());
                "update".to_string()
            }
            Step::Request { name } => {
                pending.insert(name.clone(), drawer.begin_request());
                format!("request {name}")
            }
            Step::Respond { name, context } => {
                let token = pending
                    .remove(name)
                    .with_context(|| format!("step {}: no request named '{}'", i + 1, name))?;
                applied = Some(drawer.apply_response(token, context.clone()));
                format!("respond {name}")
            }
        };

        out.push(Snapshot {
            step: i + 1,
            op,
            is_open: drawer.is_open(),
            mode: drawer.mode(),
            context: drawer.context().clone(),
            can_go_back: drawer.can_go_back(),
            depth: drawer.history().len(),
            applied,
        });
    }

    Ok(out)
}
