// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clash detection options

use crate::MM3_PER_M3;
use modelcheck_model::Severity;
use serde::{Deserialize, Serialize};

/// Volume thresholds (m³) separating clash severity tiers
///
/// Each bound is inclusive: a clash of exactly `critical` m³ is critical.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityThresholds {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        Self {
            critical: 1.0,
            high: 0.1,
            medium: 0.01,
        }
    }
}

impl SeverityThresholds {
    /// Classify an intersection volume given in mm³
    pub fn classify(&self, volume_mm3: f64) -> Severity {
        let volume_m3 = volume_mm3 / MM3_PER_M3;
        if volume_m3 >= self.critical {
            Severity::Critical
        } else if volume_m3 >= self.high {
            Severity::High
        } else if volume_m3 >= self.medium {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Candidate-pair strategy used by [`crate::ClashDetector::check_all`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BroadPhaseKind {
    /// Naive `O(n²)` double loop
    AllPairs,
    /// Sort by min-x and sweep
    #[default]
    SweepAndPrune,
}

/// Clash detector configuration
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    /// Severity tier boundaries
    pub thresholds: SeverityThresholds,
    /// Soft-clash margin in mm (0 = hard clashes only)
    pub tolerance_mm: f64,
    /// Candidate-pair strategy
    pub broad_phase: BroadPhaseKind,
    /// Evaluate candidate pairs on the rayon thread pool
    pub parallel: bool,
}

impl DetectorOptions {
    /// Options for very large models (sweep-and-prune, parallel pair tests)
    pub fn large_model() -> Self {
        Self {
            broad_phase: BroadPhaseKind::SweepAndPrune,
            parallel: true,
            ..Self::default()
        }
    }

    /// Options reproducing the plain pairwise loop
    pub fn reference() -> Self {
        Self {
            broad_phase: BroadPhaseKind::AllPairs,
            parallel: false,
            ..Self::default()
        }
    }

    /// Set the soft-clash margin
    pub fn with_tolerance(mut self, tolerance_mm: f64) -> Self {
        self.tolerance_mm = tolerance_mm;
        self
    }

    /// Set the severity thresholds
    pub fn with_thresholds(mut self, thresholds: SeverityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the broad phase
    pub fn with_broad_phase(mut self, broad_phase: BroadPhaseKind) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    /// Enable or disable parallel pair evaluation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_boundaries_inclusive() {
        let t = SeverityThresholds::default();
        assert_eq!(t.classify(1_000_000_000.0), Severity::Critical);
        assert_eq!(t.classify(999_999_999.0), Severity::High);
        assert_eq!(t.classify(100_000_000.0), Severity::High);
        assert_eq!(t.classify(10_000_000.0), Severity::Medium);
        assert_eq!(t.classify(9_999_999.0), Severity::Low);
        assert_eq!(t.classify(0.0), Severity::Low);
    }

    #[test]
    fn test_options_from_partial_json() {
        let options: DetectorOptions =
            serde_json::from_str(r#"{"tolerance_mm": 25.0, "broad_phase": "all_pairs"}"#).unwrap();
        assert_eq!(options.tolerance_mm, 25.0);
        assert_eq!(options.broad_phase, BroadPhaseKind::AllPairs);
        assert_eq!(options.thresholds, SeverityThresholds::default());
        assert!(!options.parallel);
    }
}
