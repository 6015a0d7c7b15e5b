use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$WAYPOINT_HOME`, or `~/.waypoint`.
pub fn waypoint_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("WAYPOINT_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".waypoint"))
}

pub fn ensure_waypoint_home() -> Result<PathBuf> {
    let dir = waypoint_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
