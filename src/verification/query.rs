// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Feed query parameters for one verification

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::config::Location;

/// How far back a verification looks for reported events
pub const WINDOW_MINUTES: i64 = 10;

/// Search radius around the configured location
pub const RADIUS_KM: u32 = 500;

/// Response format requested from the feed
pub const FORMAT: &str = "geojson";

/// Built fresh for every trigger and never modified afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationQuery {
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
}

impl VerificationQuery {
    /// Query covering the ten minutes before `invoked_at`
    pub fn new(invoked_at: DateTime<Utc>, location: Location) -> Self {
        Self {
            window_start: invoked_at - Duration::minutes(WINDOW_MINUTES),
            window_end: invoked_at,
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }

    pub fn window_start(&self) -> DateTime<Utc> {
        self.window_start
    }

    /// Invocation time. Not sent, the feed treats an open end as "now".
    pub fn window_end(&self) -> DateTime<Utc> {
        self.window_end
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn radius_km(&self) -> u32 {
        RADIUS_KM
    }

    /// URL query parameters in FDSN event-service naming
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("format", FORMAT.to_string()),
            (
                "starttime",
                self.window_start.to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("maxradiuskm", RADIUS_KM.to_string()),
        ]
    }
}
