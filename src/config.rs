//! Configuration persistence for the synced probe

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Serializable color representation for config storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for MarkerColor {
    fn default() -> Self {
        // greenyellow, the usual active-tool color of medical viewers
        Self {
            r: 173.0 / 255.0,
            g: 1.0,
            b: 47.0 / 255.0,
        }
    }
}

/// Appearance of probe markers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub color: MarkerColor,
    /// Circle radius in pixels
    pub radius: f32,
    /// Whether to draw a drop shadow behind the marker
    pub shadow: bool,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: MarkerColor::default(),
            radius: 2.0,
            shadow: true,
        }
    }
}

/// Probe configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// When false, drag events are ignored
    pub enabled: bool,
    pub marker: MarkerStyle,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            marker: MarkerStyle::default(),
        }
    }
}

impl ProbeConfig {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("syncprobe").join("config.json"))
    }

    /// Load configuration from the default path, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err:#}");
                Self::default()
            }
        }
    }

    /// Read configuration from `path`
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = serde_json::from_str(&json)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Write configuration to `path`, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}
