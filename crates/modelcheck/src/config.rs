// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON-loadable checker configuration

use log::debug;
use modelcheck_clash::DetectorOptions;
use modelcheck_model::Result;
use modelcheck_rules::{ClearanceLimits, SizingLimits};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// All tunable thresholds of a checking session
///
/// Every section and field is optional in JSON; absent values take their
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub detector: DetectorOptions,
    pub sizing: SizingLimits,
    pub clearance: ClearanceLimits,
}

impl CheckConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading check config from {}", path.display());
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_detector(mut self, detector: DetectorOptions) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_sizing(mut self, sizing: SizingLimits) -> Self {
        self.sizing = sizing;
        self
    }

    pub fn with_clearance(mut self, clearance: ClearanceLimits) -> Self {
        self.clearance = clearance;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelcheck_clash::BroadPhaseKind;
    use modelcheck_model::CheckError;

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(CheckConfig::from_json_str("{}").unwrap(), CheckConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = CheckConfig::from_json_str(
            r#"{
                "detector": {"tolerance_mm": 25.0, "broad_phase": "all_pairs"},
                "clearance": {"min_headroom": 2300.0}
            }"#,
        )
        .unwrap();

        assert_eq!(config.detector.tolerance_mm, 25.0);
        assert_eq!(config.detector.broad_phase, BroadPhaseKind::AllPairs);
        assert_eq!(config.detector.thresholds.critical, 1.0);
        assert_eq!(config.clearance.min_headroom, 2300.0);
        assert_eq!(config.clearance.min_access_clearance, 600.0);
        assert_eq!(config.sizing, SizingLimits::default());
    }

    #[test]
    fn test_from_path_round_trip() {
        let config = CheckConfig::default()
            .with_sizing(SizingLimits::default().with_pipe_max_velocity(2.5));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modelcheck.json");
        fs::write(&path, config.to_json().unwrap()).unwrap();

        assert_eq!(CheckConfig::from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_errors_propagate() {
        assert!(matches!(
            CheckConfig::from_json_str("{not json"),
            Err(CheckError::Json(_))
        ));
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            CheckConfig::from_path(dir.path().join("missing.json")),
            Err(CheckError::Io(_))
        ));
    }
}
