// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Configuration module

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::sensors::Axis;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Use the simulated accelerometer and the console display
    pub demo_mode: bool,

    /// Where to look for reported events
    pub location: Location,

    /// Remote event feed
    pub feed: FeedConfig,

    /// Accelerometer wiring
    pub sensor: SensorConfig,

    /// LCD wiring
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {:?}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {:?}", path))?;
        config.validate()?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Load or create default configuration
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let config = Self::default();

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            config.save(path)?;
            Ok(config)
        }
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        self.location.validate()?;
        if self.feed.endpoint.trim().is_empty() {
            bail!("feed.endpoint must not be empty");
        }
        if self.feed.timeout_secs == 0 {
            bail!("feed.timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Get configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("quakewatch"))
            .unwrap_or_else(|| PathBuf::from("./config"))
    }

    /// Get default configuration path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}

/// Observer location, read once at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            bail!("latitude {} is outside [-90, 90]", self.latitude);
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            bail!("longitude {} is outside [-180, 180]", self.longitude);
        }
        Ok(())
    }
}

/// Event feed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// FDSN event query endpoint
    pub endpoint: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://earthquake.usgs.gov/fdsnws/event/1/query".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Accelerometer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// I2C bus number
    pub i2c_bus: u8,

    /// 7-bit device address
    pub address: u16,

    /// Axis compared against the threshold
    pub axis: Axis,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            i2c_bus: 0,
            address: crate::sensors::MMA7660_ADDRESS,
            axis: Axis::X,
        }
    }
}

/// RGB LCD configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// I2C bus number
    pub i2c_bus: u8,

    /// Character controller address
    pub lcd_address: u16,

    /// Backlight controller address
    pub rgb_address: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_bus: 0,
            lcd_address: crate::display::LCD_ADDRESS,
            rgb_address: crate::display::RGB_ADDRESS,
        }
    }
}
