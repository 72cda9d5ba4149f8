// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Sample source trait and common types

use async_trait::async_trait;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which accelerometer output is reported as the motion magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    X,
    Y,
    Z,
    /// Euclidean norm of all three axes
    Norm,
}

impl Axis {
    /// Reduce a three-axis acceleration (in g) to a single magnitude
    pub fn select(&self, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
            Axis::Norm => (x * x + y * y + z * z).sqrt(),
        }
    }
}

/// A single motion-magnitude sample, tagged with the tick it was taken on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub magnitude: f64,
    pub tick: u64,
    pub taken_at: DateTime<Utc>,
}

impl Reading {
    pub fn new(magnitude: f64, tick: u64) -> Self {
        Self {
            magnitude,
            tick,
            taken_at: Utc::now(),
        }
    }
}

/// Anything that yields motion magnitudes on demand.
///
/// A read may fail transiently; the caller skips that tick and polls again
/// on the next one.
#[async_trait]
pub trait SampleSource: Send {
    /// Source identifier used in log lines
    fn id(&self) -> &str;

    /// Read the current motion magnitude in sensor-native units (g)
    async fn read_magnitude(&mut self) -> Result<f64>;
}
