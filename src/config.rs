// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Spendwise", "spendwise"));

pub const ENV_API: &str = "SPENDWISE_API";
pub const ENV_TIMEOUT: &str = "SPENDWISE_TIMEOUT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5000/api".to_string(),
            timeout_secs: 15,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config at {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config dir")?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config at {}", path.display()))
    }

    /// Overlay values from an environment lookup (`SPENDWISE_API`, `SPENDWISE_TIMEOUT`).
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api) = lookup(ENV_API).filter(|v| !v.trim().is_empty()) {
            self.api_base = api.trim().to_string();
        }
        if let Some(t) = lookup(ENV_TIMEOUT) {
            self.timeout_secs = t
                .trim()
                .parse()
                .with_context(|| format!("Invalid {} '{}'", ENV_TIMEOUT, t))?;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, api: Option<&str>, timeout_secs: Option<u64>) {
        if let Some(api) = api {
            self.api_base = api.to_string();
        }
        if let Some(t) = timeout_secs {
            self.timeout_secs = t;
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

/// Defaults, then the config file, then the environment.
pub fn load() -> Result<Config> {
    let mut cfg = Config::load_from(&config_path()?)?;
    cfg.apply_env(|k| std::env::var(k).ok())?;
    Ok(cfg)
}
