// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.

//! Rising-edge threshold detector
//!
//! Fires once when the magnitude goes from at-or-below [`THRESHOLD`] to above
//! it, then stays latched until a reading drops back down. Sustained shaking
//! therefore produces a single trigger rather than one per tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sensors::Reading;

/// Movement threshold in sensor-native units (g)
pub const THRESHOLD: f64 = 1.0;

/// Emitted on each 0→1 threshold crossing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Running trigger count, starting at 1
    pub sequence: u64,
    /// Tick of the reading that crossed
    pub tick: u64,
    pub magnitude: f64,
    pub detected_at: DateTime<Utc>,
}

/// Edge-triggered debounce over magnitude readings
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    was_above_threshold: bool,
    triggers: u64,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one reading; returns a trigger only on a rising edge.
    pub fn observe(&mut self, reading: &Reading) -> Option<TriggerEvent> {
        let is_above = reading.magnitude > THRESHOLD;
        let rising = is_above && !self.was_above_threshold;
        self.was_above_threshold = is_above;

        if !rising {
            return None;
        }

        self.triggers += 1;
        Some(TriggerEvent {
            sequence: self.triggers,
            tick: reading.tick,
            magnitude: reading.magnitude,
            detected_at: reading.taken_at,
        })
    }

    /// Whether the last reading was above threshold
    pub fn is_latched(&self) -> bool {
        self.was_above_threshold
    }

    pub fn trigger_count(&self) -> u64 {
        self.triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(detector: &mut EdgeDetector, magnitudes: &[f64]) -> Vec<u64> {
        magnitudes
            .iter()
            .enumerate()
            .filter_map(|(i, &m)| detector.observe(&Reading::new(m, i as u64)))
            .map(|t| t.tick)
            .collect()
    }

    #[test]
    fn test_triggers_on_rising_edges_only() {
        let mut detector = EdgeDetector::new();
        let ticks = run(&mut detector, &[0.2, 0.3, 1.5, 1.6, 0.1, 1.9]);
        assert_eq!(ticks, vec![2, 5]);
        assert_eq!(detector.trigger_count(), 2);
    }

    #[test]
    fn test_sustained_shaking_fires_once() {
        let mut detector = EdgeDetector::new();
        let ticks = run(&mut detector, &[1.2; 50]);
        assert_eq!(ticks, vec![0]);
        assert!(detector.is_latched());
    }

    #[test]
    fn test_quiet_never_fires() {
        let mut detector = EdgeDetector::new();
        assert!(run(&mut detector, &[0.0, 0.5, 0.99, -3.0]).is_empty());
        assert!(!detector.is_latched());
    }

    #[test]
    fn test_exact_threshold_is_not_above() {
        let mut detector = EdgeDetector::new();
        assert!(run(&mut detector, &[1.0, 1.0]).is_empty());
        assert_eq!(run(&mut detector, &[1.0001]), vec![0]);
    }

    #[test]
    fn test_one_trigger_per_contiguous_run() {
        let magnitudes = [
            0.1, 1.1, 1.2, 0.9, 0.8, 1.4, 0.2, 1.3, 1.3, 1.3, 0.0, 0.0, 2.0,
        ];
        let expected_runs = magnitudes
            .windows(2)
            .filter(|w| w[0] <= THRESHOLD && w[1] > THRESHOLD)
            .count()
            + usize::from(magnitudes[0] > THRESHOLD);

        let mut detector = EdgeDetector::new();
        let ticks = run(&mut detector, &magnitudes);
        assert_eq!(ticks.len(), expected_runs);
        assert_eq!(ticks, vec![1, 5, 7, 12]);
    }

    #[test]
    fn test_sequence_numbers_increase() {
        let mut detector = EdgeDetector::new();
        let a = detector.observe(&Reading::new(2.0, 0)).unwrap();
        detector.observe(&Reading::new(0.0, 1));
        let b = detector.observe(&Reading::new(2.0, 2)).unwrap();
        assert_eq!((a.sequence, b.sequence), (1, 2));
        assert_eq!(b.magnitude, 2.0);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = EdgeDetector::new();
        let mut b = EdgeDetector::new();
        assert!(a.observe(&Reading::new(1.5, 0)).is_some());
        assert!(b.observe(&Reading::new(1.5, 0)).is_some());
    }
}
