// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! QuakeWatch - accelerometer earthquake detector
//!
//! Samples a motion sensor every 100 ms, fires once on each rising crossing
//! of the movement threshold, and asks the USGS event feed whether anything
//! was reported within 500 km over the last ten minutes. The verdict goes to
//! an RGB character LCD and clears itself after 15 seconds.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Reading   ┌──────────────┐  TriggerEvent  ┌────────────────────┐
//! │ SampleSource │ ──────────▶ │ EdgeDetector │ ─────────────▶ │ VerificationClient │
//! └──────────────┘             └──────────────┘                └────────────────────┘
//!        ▲                            ▲                          │ spawn     │ Checking
//!        │ every 100 ms               │                          ▼           ▼
//! ┌──────┴────────────────────────────┴──────┐           ┌───────────┐  ┌───────────────────┐
//! │                  Engine                  │           │ EventFeed │─▶│ DisplayController │
//! └──────────────────────────────────────────┘           └───────────┘  └───────────────────┘
//!                                                          verdict         (auto-clear 15s)
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod core;
pub mod sensors;
pub mod detection;
pub mod verification;
pub mod display;
pub mod config;

// Re-exports for convenience
pub use config::{Config, Location};
pub use self::core::{Engine, EngineStats};
pub use sensors::{Reading, SampleSource};
pub use detection::{EdgeDetector, TriggerEvent, THRESHOLD};
pub use verification::{EventFeed, UsgsFeed, VerificationClient, VerificationQuery, VerificationResult};
pub use display::{DisplayController, DisplayDevice, DisplayHandle, DisplayState};

/// QuakeWatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// QuakeWatch name
pub const NAME: &str = "QuakeWatch";

/// Build info
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION.to_string(),
        target: std::env::consts::ARCH.to_string(),
        os: std::env::consts::OS.to_string(),
        features: enabled_features(),
    }
}

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version string
    pub version: String,
    /// Target architecture
    pub target: String,
    /// Operating system
    pub os: String,
    /// Enabled features
    pub features: Vec<String>,
}

fn enabled_features() -> Vec<String> {
    let mut features = vec![];

    #[cfg(feature = "hardware")]
    features.push("hardware".to_string());

    features
}
