// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation issues and the report they accumulate into

use chrono::{DateTime, Utc};
use log::info;
use modelcheck_model::{ElementId, ExportRecord, Location, Result, Severity, ToExportRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A failed rule on one element
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub rule_id: String,
    pub rule_name: String,
    pub severity: Severity,
    pub category: String,
    pub element_id: ElementId,
    pub description: String,
    pub location: Option<Location>,
    pub timestamp: DateTime<Utc>,
}

impl ValidationIssue {
    pub fn new(
        rule_id: impl Into<String>,
        rule_name: impl Into<String>,
        severity: Severity,
        category: impl Into<String>,
        element_id: impl Into<ElementId>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            rule_name: rule_name.into(),
            severity,
            category: category.into(),
            element_id: element_id.into(),
            description: description.into(),
            location: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

impl ToExportRecord for ValidationIssue {
    fn to_export_record(&self) -> ExportRecord {
        ExportRecord {
            element_id: self.element_id.clone(),
            element_type: self.category.clone(),
            issue_type: self.rule_id.clone(),
            description: self.description.clone(),
            severity: self.severity,
        }
    }
}

/// Serialized form of a [`ValidationReport`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReportDocument {
    pub project_name: String,
    pub timestamp: DateTime<Utc>,
    pub total_elements_checked: usize,
    pub rules_executed: usize,
    pub total_issues: usize,
    pub critical_issues: usize,
    pub high_issues: usize,
    pub issues: Vec<ValidationIssue>,
}

/// Ordered issue list plus running counters for one validation run
///
/// The counters are plain fields: callers that drive validation themselves
/// set them directly, [`crate::Validator::validate_batch`] advances them.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationReport {
    pub project_name: String,
    pub timestamp: DateTime<Utc>,
    pub total_elements_checked: usize,
    pub rules_executed: usize,
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            timestamp: Utc::now(),
            total_elements_checked: 0,
            rules_executed: 0,
            issues: Vec::new(),
        }
    }

    pub fn add_issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend_issues(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn issues_by_severity(&self, severity: Severity) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == severity)
            .collect()
    }

    pub fn issues_by_category(&self, category: &str) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.category == category)
            .collect()
    }

    pub fn critical_count(&self) -> usize {
        self.count_severity(Severity::Critical)
    }

    pub fn high_count(&self) -> usize {
        self.count_severity(Severity::High)
    }

    pub fn total_issues(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    pub fn to_document(&self) -> ValidationReportDocument {
        ValidationReportDocument {
            project_name: self.project_name.clone(),
            timestamp: self.timestamp,
            total_elements_checked: self.total_elements_checked,
            rules_executed: self.rules_executed,
            total_issues: self.total_issues(),
            critical_issues: self.critical_count(),
            high_issues: self.high_count(),
            issues: self.issues.clone(),
        }
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(
            "saved validation report '{}' ({} issues) to {}",
            self.project_name,
            self.issues.len(),
            path.display()
        );
        Ok(())
    }
}
