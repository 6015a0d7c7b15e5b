use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_waypoint_home, waypoint_home};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    pub drawer: DrawerSection,
    pub sequence: SequenceSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSection {
    /// Print JSON instead of text.
    pub json: bool,
    /// Print every day's score, not just the best one.
    pub all_days: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerSection {
    /// Max back-navigation depth; unset means unbounded.
    pub history_limit: Option<usize>,
    pub reset_delay_ms: i64,
}

impl Default for DrawerSection {
    fn default() -> Self {
        Self {
            history_limit: None,
            reset_delay_ms: waypoint_core::drawer::DEFAULT_RESET_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceSection {
    /// Co-visitation edges seen fewer times than this are ignored.
    pub min_weight: u32,
    pub suggestions: usize,
    pub max_places: usize,
}

impl Default for SequenceSection {
    fn default() -> Self {
        Self {
            min_weight: waypoint_core::sequence::DEFAULT_MIN_WEIGHT,
            suggestions: waypoint_core::sequence::DEFAULT_SUGGESTIONS,
            max_places: waypoint_core::sequence::DEFAULT_DAY_PLACES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing filter directive; `WAYPOINT_LOG` overrides it.
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(waypoint_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults.
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_waypoint_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("waypoint-config-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join("config.toml")
    }

    #[test]
    fn test_missing_file_is_default() {
        let p = scratch("missing");
        let _ = fs::remove_file(&p);
        assert_eq!(load_config_from(&p).unwrap(), Config::default());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let p = scratch("roundtrip");
        let mut cfg = Config::default();
        cfg.output.json = true;
        cfg.drawer.history_limit = Some(20);
        save_config_to(&cfg, &p).unwrap();
        assert_eq!(load_config_from(&p).unwrap(), cfg);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let p = scratch("partial");
        fs::write(&p, "[drawer]\nhistory_limit = 5\n").unwrap();
        let cfg = load_config_from(&p).unwrap();
        assert_eq!(cfg.drawer.history_limit, Some(5));
        assert_eq!(cfg.drawer.reset_delay_ms, 300);
        assert_eq!(cfg.log.filter, "warn");
        assert_eq!(cfg.sequence.min_weight, 2);
        assert_eq!(cfg.sequence.max_places, 5);
        assert!(!cfg.output.json);
    }

    #[test]
    fn test_bad_toml_is_error() {
        let p = scratch("bad");
        fs::write(&p, "[drawer\n").unwrap();
        assert!(load_config_from(&p).is_err());
    }
}
