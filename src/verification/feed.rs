// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Remote seismic event feed

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{VerificationError, VerificationQuery};
use crate::config::FeedConfig;

/// GeoJSON feature collection as returned by the FDSN event service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(default)]
    pub mag: Option<f64>,
    #[serde(default)]
    pub place: Option<String>,
    /// Origin time, milliseconds since the epoch
    #[serde(default)]
    pub time: Option<i64>,
}

/// Source of reported seismic events
#[async_trait]
pub trait EventFeed: Send + Sync {
    /// Issue one query. No retries.
    async fn fetch(&self, query: &VerificationQuery) -> Result<FeatureCollection, VerificationError>;
}

/// HTTP client for the USGS FDSN event query endpoint
pub struct UsgsFeed {
    client: reqwest::Client,
    endpoint: String,
}

impl UsgsFeed {
    pub fn new(config: &FeedConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("quakewatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EventFeed for UsgsFeed {
    async fn fetch(&self, query: &VerificationQuery) -> Result<FeatureCollection, VerificationError> {
        debug!("GET {} {:?}", self.endpoint, query.params());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&query.params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VerificationError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
