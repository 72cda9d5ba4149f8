//! Verification module - confirms a local trigger against a remote event feed

mod client;
mod feed;
mod query;

pub use client::VerificationClient;
pub use feed::{EventFeed, Feature, FeatureCollection, FeatureProperties, UsgsFeed};
pub use query::{VerificationQuery, FORMAT, RADIUS_KM, WINDOW_MINUTES};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of one verification attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VerificationResult {
    /// The feed reported at least one matching event
    Confirmed { events: usize },
    NoEvent,
    Failed(VerificationError),
}

impl VerificationResult {
    pub fn from_collection(collection: &FeatureCollection) -> Self {
        match collection.features.len() {
            0 => Self::NoEvent,
            events => Self::Confirmed { events },
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// Why a feed query produced no usable answer
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum VerificationError {
    #[error("feed request failed: {0}")]
    Transport(String),

    #[error("feed answered with HTTP {0}")]
    Status(u16),

    #[error("could not decode feed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for VerificationError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for VerificationError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
