// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Verification client - one feed query per trigger

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{EventFeed, VerificationQuery, VerificationResult};
use crate::config::Location;
use crate::display::DisplayHandle;

/// Turns triggers into feed queries and feeds the verdicts to the display.
///
/// Every call to [`verify`](Self::verify) starts an independent attempt.
/// Attempts in flight are neither deduplicated nor cancelled, so when they
/// overlap the display ends up showing whichever finished last.
pub struct VerificationClient {
    feed: Arc<dyn EventFeed>,
    location: Location,
    display: DisplayHandle,
    attempts: AtomicU64,
}

impl VerificationClient {
    pub fn new(feed: Arc<dyn EventFeed>, location: Location, display: DisplayHandle) -> Self {
        Self {
            feed,
            location,
            display,
            attempts: AtomicU64::new(0),
        }
    }

    /// Start a verification without waiting for it.
    ///
    /// The display switches to `Checking` before this returns. The
    /// returned handle resolves to the same result the display receives.
    /// Must be called within a tokio runtime.
    pub fn verify(&self) -> JoinHandle<VerificationResult> {
        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        self.display.start_checking();

        let query = VerificationQuery::new(Utc::now(), self.location);
        let feed = Arc::clone(&self.feed);
        let display = self.display.clone();

        tokio::spawn(async move {
            let result = Self::resolve(feed.as_ref(), &query).await;
            match &result {
                VerificationResult::Confirmed { events } => {
                    info!("Verification #{}: {} event(s) reported nearby", attempt, events)
                }
                VerificationResult::NoEvent => {
                    info!("Verification #{}: no events reported nearby", attempt)
                }
                VerificationResult::Failed(e) => warn!("Verification #{} failed: {}", attempt, e),
            }
            display.show_result(result.clone());
            result
        })
    }

    /// Run one query against `feed` and classify the answer
    pub async fn resolve(feed: &dyn EventFeed, query: &VerificationQuery) -> VerificationResult {
        match feed.fetch(query).await {
            Ok(collection) => VerificationResult::from_collection(&collection),
            Err(e) => VerificationResult::Failed(e),
        }
    }

    /// Number of verifications started so far
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn location(&self) -> Location {
        self.location
    }
}
