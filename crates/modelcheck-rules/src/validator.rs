// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rule-driven validator with a single active report

use crate::{evaluate_rules, Rule, RuleEngine, ValidationIssue, ValidationReport};
use log::{debug, info, warn};
use modelcheck_model::{ElementId, Location, Result};

/// Validator owning a rule registry and at most one active report
///
/// Every successful `validate_*` call appends its issues to the active report
/// (if any) in the same call. A predicate error aborts the element before
/// anything is appended.
#[derive(Debug)]
pub struct Validator<T> {
    engine: RuleEngine<T>,
    current_report: Option<ValidationReport>,
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new(RuleEngine::new())
    }
}

impl<T> Validator<T> {
    pub fn new(engine: RuleEngine<T>) -> Self {
        Self {
            engine,
            current_report: None,
        }
    }

    pub fn engine(&self) -> &RuleEngine<T> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RuleEngine<T> {
        &mut self.engine
    }

    /// Replace the active report with a fresh one
    pub fn create_report(&mut self, project_name: impl Into<String>) -> &mut ValidationReport {
        let report = ValidationReport::new(project_name);
        info!("created validation report '{}'", report.project_name);
        if let Some(previous) = self.current_report.take() {
            if !previous.is_empty() {
                warn!(
                    "discarding active report '{}' with {} issues",
                    previous.project_name,
                    previous.total_issues()
                );
            }
        }
        self.current_report.insert(report)
    }

    pub fn current_report(&self) -> Option<&ValidationReport> {
        self.current_report.as_ref()
    }

    pub fn current_report_mut(&mut self) -> Option<&mut ValidationReport> {
        self.current_report.as_mut()
    }

    /// Detach the active report, leaving none
    pub fn take_report(&mut self) -> Option<ValidationReport> {
        self.current_report.take()
    }

    /// Validate one element against `rules`, in order
    pub fn validate_element(
        &mut self,
        element: &T,
        element_id: impl Into<ElementId>,
        rules: &[Rule<T>],
    ) -> Result<Vec<ValidationIssue>> {
        let issues = evaluate_rules(rules, element, &element_id.into(), None)?;
        self.record(&issues);
        Ok(issues)
    }

    /// Like [`validate_element`](Self::validate_element), tagging issues with a location
    pub fn validate_element_at(
        &mut self,
        element: &T,
        element_id: impl Into<ElementId>,
        location: Location,
        rules: &[Rule<T>],
    ) -> Result<Vec<ValidationIssue>> {
        let issues = evaluate_rules(rules, element, &element_id.into(), Some(location))?;
        self.record(&issues);
        Ok(issues)
    }

    /// Validate against every rule in the registry
    pub fn validate_registered(
        &mut self,
        element: &T,
        element_id: impl Into<ElementId>,
    ) -> Result<Vec<ValidationIssue>> {
        let issues = self.engine.evaluate(element, &element_id.into())?;
        self.record(&issues);
        Ok(issues)
    }

    /// Validate into an explicit report instead of the active one
    pub fn validate_into(
        report: &mut ValidationReport,
        element: &T,
        element_id: impl Into<ElementId>,
        rules: &[Rule<T>],
    ) -> Result<Vec<ValidationIssue>> {
        let issues = evaluate_rules(rules, element, &element_id.into(), None)?;
        report.extend_issues(issues.iter().cloned());
        Ok(issues)
    }

    /// Validate a batch of elements and advance the active report's counters
    ///
    /// Each element is recorded as soon as it passes evaluation, so an error
    /// on element `k` leaves elements `0..k` recorded and counted.
    pub fn validate_batch(
        &mut self,
        elements: &[(ElementId, T)],
        rules: &[Rule<T>],
    ) -> Result<Vec<ValidationIssue>> {
        debug!(
            "validating {} elements against {} rules",
            elements.len(),
            rules.len()
        );
        let mut all = Vec::new();
        for (id, element) in elements {
            let issues = evaluate_rules(rules, element, id, None)?;
            self.record(&issues);
            if let Some(report) = self.current_report.as_mut() {
                report.total_elements_checked += 1;
                report.rules_executed += rules.len();
            }
            all.extend(issues);
        }
        Ok(all)
    }

    fn record(&mut self, issues: &[ValidationIssue]) {
        if let Some(report) = self.current_report.as_mut() {
            report.extend_issues(issues.iter().cloned());
        }
    }
}
