// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configured checking session

use crate::CheckConfig;
use log::info;
use modelcheck_clash::{ClashDetector, ClashElement, ClashReport, ClashReportBuilder};
use modelcheck_model::{ClashElementRecord, ElementId, FromRecord, Result};
use modelcheck_rules::{MepClearanceValidator, MepSizingValidator, Rule, ValidationReport, Validator};
use serde_json::Value;

/// Runs clash detection and rule validation with one configuration
#[derive(Clone, Debug, Default)]
pub struct ModelChecker {
    config: CheckConfig,
}

impl ModelChecker {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Detect clashes among `elements` and build the finished report
    pub fn check_clashes(&self, project_name: &str, elements: &[ClashElement]) -> ClashReport {
        let mut detector = ClashDetector::with_options(self.config.detector.clone());
        let clashes = detector.check_all(elements);
        let report = ClashReportBuilder::new(project_name)
            .add_clashes(clashes)
            .set_elements_checked(elements.len())
            .build();
        info!(
            "clash check '{}': {} elements, {} clashes ({} critical)",
            project_name,
            elements.len(),
            report.clash_count(),
            report.critical_count()
        );
        report
    }

    /// [`check_clashes`](Self::check_clashes) over raw element records
    pub fn check_clash_records(&self, project_name: &str, records: &[Value]) -> Result<ClashReport> {
        let elements = ClashElementRecord::from_values(records)?
            .iter()
            .map(ClashElement::from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.check_clashes(project_name, &elements))
    }

    /// Validate every element against `rules` into a fresh report
    pub fn validate<T>(
        &self,
        project_name: &str,
        elements: &[(ElementId, T)],
        rules: &[Rule<T>],
    ) -> Result<ValidationReport> {
        let mut validator = Validator::default();
        validator.create_report(project_name);
        validator.validate_batch(elements, rules)?;
        let report = validator
            .take_report()
            .unwrap_or_else(|| ValidationReport::new(project_name));
        info!(
            "validation '{}': {} elements, {} issues",
            project_name,
            report.total_elements_checked,
            report.total_issues()
        );
        Ok(report)
    }

    pub fn sizing_validator(&self) -> MepSizingValidator {
        MepSizingValidator::with_limits(self.config.sizing)
    }

    pub fn clearance_validator(&self) -> MepClearanceValidator {
        MepClearanceValidator::with_limits(self.config.clearance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelcheck_clash::BoundingVolume;
    use modelcheck_model::{AccessEquipment, Severity};
    use modelcheck_rules::{ClearanceLimits, MepValidator};
    use serde_json::json;

    fn chain(count: usize) -> Vec<ClashElement> {
        (0..count)
            .map(|i| {
                let x = i as f64 * 500.0;
                ClashElement::new(
                    i as i64,
                    BoundingVolume::from_extents(x, 0.0, 0.0, x + 1000.0, 1000.0, 1000.0)
                        .unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_check_clashes_builds_report() {
        let checker = ModelChecker::default();
        let report = checker.check_clashes("Chain", &chain(5));

        assert_eq!(report.clash_count(), 4);
        assert_eq!(report.total_elements_checked(), 5);
        assert_eq!(report.project_name(), "Chain");
        // Interior elements clash with both neighbors
        assert_eq!(report.most_problematic(1)[0].1, 2);
    }

    #[test]
    fn test_check_clash_records_names_missing_field() {
        let checker = ModelChecker::default();
        let err = checker
            .check_clash_records("Bad", &[json!({"id": 1})])
            .unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_validate_counts() {
        let rules = vec![Rule::new(
            "min_height",
            "Minimum Height",
            "Height must be >= 2400",
            "geometry",
            Severity::Critical,
            |e: &Value| e["height"].as_f64().unwrap_or(0.0) >= 2400.0,
        )];
        let elements = vec![
            (ElementId::from("a"), json!({"height": 3000})),
            (ElementId::from("b"), json!({"height": 1000})),
            (ElementId::from("c"), json!({})),
        ];

        let report = ModelChecker::default()
            .validate("Validate", &elements, &rules)
            .unwrap();
        assert_eq!(report.total_issues(), 2);
        assert_eq!(report.total_elements_checked, 3);
        assert_eq!(report.rules_executed, 3);
    }

    #[test]
    fn test_validators_use_configured_limits() {
        let config = CheckConfig::default()
            .with_clearance(ClearanceLimits::default().with_min_access_clearance(1200.0));
        let checker = ModelChecker::new(config);

        let mut clearance = checker.clearance_validator();
        let equipment = AccessEquipment::from_values(&[
            json!({"id": "pump_1", "type": "pump", "access_clearance": 1000}),
        ])
        .unwrap();
        clearance.validate_access_clearance(&equipment);
        assert_eq!(clearance.issue_count(), 1);
        assert_eq!(checker.sizing_validator().limits().pipe_max_velocity, 3.0);
    }
}
