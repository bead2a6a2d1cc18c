// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-plugin ordering defaults loaded from TOML or JSON5 files.
//!
//! ```toml
//! [plugins.minifier]
//! stage = 100
//!
//! [plugins.banner]
//! before = ["minifier"]
//! ```

use crate::error::ConfigError;
use crate::hook::Tappable;
use crate::tap::TapOptions;
use crate::view::HookView;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default tap options keyed by plugin name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderingConfig {
    #[serde(default)]
    pub plugins: BTreeMap<String, TapOptions>,
}

impl OrderingConfig {
    /// Load from a file path. The format follows the extension:
    /// `.toml`, or `.json` / `.json5`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        // Check the extension first so unsupported files are never read.
        let parse: fn(&str) -> Result<Self, ConfigError> = match format.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") | Some("json5") => Self::from_json5_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = parse(&content)?;

        tracing::debug!(
            path = %path.display(),
            plugins = config.plugins.len(),
            "loaded ordering config"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse JSON5 (comments, trailing commas), falling back to strict JSON.
    pub fn from_json5_str(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content)
            .or_else(|_| serde_json::from_str(content))
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Merge several configs. Later entries replace earlier ones per plugin.
    pub fn merge(configs: impl IntoIterator<Item = Self>) -> Self {
        let mut merged = Self::default();
        for config in configs {
            merged.plugins.extend(config.plugins);
        }
        merged
    }

    /// Defaults for `plugin`. Plugins without an entry get empty defaults.
    pub fn defaults_for(&self, plugin: &str) -> TapOptions {
        match self.plugins.get(plugin) {
            Some(options) => options.clone(),
            None => {
                tracing::debug!(plugin, "no ordering defaults configured");
                TapOptions::default()
            }
        }
    }

    /// A view over `hook` that applies the defaults configured for `plugin`.
    pub fn view_for<H>(&self, hook: &H, plugin: &str) -> HookView<H>
    where
        H: Tappable + Clone,
    {
        HookView::new(hook.clone(), self.defaults_for(plugin))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
