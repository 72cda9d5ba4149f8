//! Core module - the sampling loop that ties the pipeline together

mod engine;

pub use engine::{Engine, SAMPLE_PERIOD};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Running counters kept by the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    pub running: bool,
    pub ticks: u64,
    pub read_failures: u64,
    pub triggers: u64,
    pub verifications_started: u64,
    pub uptime_seconds: u64,
    pub last_trigger: Option<DateTime<Utc>>,
}
