//! Configuration management
//!
//! Settings live in `~/.shuttle/config.yaml`. Every field is optional; a
//! missing file is the same as an empty one. Environment variables override
//! file values:
//! - `SHUTTLE_COUNTDOWN` overrides `countdown_seconds`
//! - `SHUTTLE_DEFAULT_TARGET` overrides `default_target`

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::tools::Tool;

/// Seconds to pause before launching a tool when forwarding produced warnings.
pub const DEFAULT_COUNTDOWN_SECONDS: u64 = 3;

/// Keys accepted by `get`/`set`, besides `binaries.<tool>`.
pub const KEYS: &[&str] = &["default_target", "countdown_seconds"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tool to resume in when `--to` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_target: Option<Tool>,

    /// Pause before launching when forwarding produced warnings. 0 turns
    /// the pause off; the warnings are still printed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countdown_seconds: Option<u64>,

    /// Executable overrides keyed by tool name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub binaries: BTreeMap<String, String>,
}

impl Config {
    /// Loads the config file and applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Loads a config file without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config file, creating `~/.shuttle` if needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let yaml = serde_saphyr::to_string(self).context("Failed to serialize config")?;
        fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?
            .join(".shuttle");

        Ok(config_dir.join("config.yaml"))
    }

    /// Applies environment overrides. Unparseable values are ignored with a
    /// warning.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SHUTTLE_COUNTDOWN") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.countdown_seconds = Some(secs),
                Err(_) => tracing::warn!("Ignoring SHUTTLE_COUNTDOWN={raw}: not a number"),
            }
        }

        if let Some(raw) = lookup("SHUTTLE_DEFAULT_TARGET") {
            match raw.trim().parse::<Tool>() {
                Ok(tool) => self.default_target = Some(tool),
                Err(e) => tracing::warn!("Ignoring SHUTTLE_DEFAULT_TARGET: {e}"),
            }
        }
    }

    pub fn countdown(&self) -> u64 {
        self.countdown_seconds.unwrap_or(DEFAULT_COUNTDOWN_SECONDS)
    }

    /// The executable to launch for a tool.
    pub fn binary_for(&self, tool: Tool) -> String {
        self.binaries
            .get(tool.as_str())
            .cloned()
            .unwrap_or_else(|| tool.binary().to_string())
    }

    /// Reads a single setting. Returns `Ok(None)` for a valid key that is
    /// unset.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "default_target" => Ok(self.default_target.map(|t| t.to_string())),
            "countdown_seconds" => Ok(self.countdown_seconds.map(|s| s.to_string())),
            _ => {
                let tool = binary_key(key)?;
                Ok(self.binaries.get(tool.as_str()).cloned())
            }
        }
    }

    /// Validates and stores a single setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_target" => {
                let tool = value.parse::<Tool>().map_err(anyhow::Error::msg)?;
                self.default_target = Some(tool);
            }
            "countdown_seconds" => {
                let secs = value
                    .parse::<u64>()
                    .with_context(|| format!("countdown_seconds must be a whole number, got '{value}'"))?;
                self.countdown_seconds = Some(secs);
            }
            _ => {
                let tool = binary_key(key)?;
                if value.trim().is_empty() {
                    bail!("Binary path for {tool} cannot be empty");
                }
                self.binaries.insert(tool.to_string(), value.to_string());
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for name in self.binaries.keys() {
            name.parse::<Tool>()
                .map_err(|e| anyhow::anyhow!("Invalid key binaries.{name}: {e}"))?;
        }
        Ok(())
    }
}

fn binary_key(key: &str) -> Result<Tool> {
    let Some(name) = key.strip_prefix("binaries.") else {
        bail!(
            "Unknown config key '{key}' (expected one of: {}, binaries.<tool>)",
            KEYS.join(", ")
        );
    };
    name.parse::<Tool>().map_err(anyhow::Error::msg)
}
