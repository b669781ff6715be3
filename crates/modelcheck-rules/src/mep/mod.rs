// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! MEP (mechanical, electrical, plumbing) validators
//!
//! Each validator applies a fixed decision table to typed element records
//! and keeps its own issue list. Validators share no state.

mod clearance;
mod connectivity;
mod sizing;

pub use clearance::{ClearanceLimits, MepClearanceValidator};
pub use connectivity::MepConnectivityValidator;
pub use sizing::{MepSizingValidator, SizingLimits};

use modelcheck_model::{ElementId, ExportRecord, Location, Severity, ToExportRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Issue-type tag of an [`MepIssue`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MepIssueType {
    NoSystem,
    InvalidSystem,
    DisconnectedStart,
    DisconnectedEnd,
    MultipleDisconnected,
    NoConnectors,
    Isolated,
    Undersized,
    Oversized,
    ExcessiveVelocity,
    InsufficientHeadroom,
    InsufficientAccess,
}

impl MepIssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MepIssueType::NoSystem => "no_system",
            MepIssueType::InvalidSystem => "invalid_system",
            MepIssueType::DisconnectedStart => "disconnected_start",
            MepIssueType::DisconnectedEnd => "disconnected_end",
            MepIssueType::MultipleDisconnected => "multiple_disconnected",
            MepIssueType::NoConnectors => "no_connectors",
            MepIssueType::Isolated => "isolated",
            MepIssueType::Undersized => "undersized",
            MepIssueType::Oversized => "oversized",
            MepIssueType::ExcessiveVelocity => "excessive_velocity",
            MepIssueType::InsufficientHeadroom => "insufficient_headroom",
            MepIssueType::InsufficientAccess => "insufficient_access",
        }
    }

    /// Severity used when the issue is exported
    pub fn default_severity(&self) -> Severity {
        match self {
            MepIssueType::NoSystem
            | MepIssueType::InvalidSystem
            | MepIssueType::NoConnectors
            | MepIssueType::Isolated
            | MepIssueType::ExcessiveVelocity
            | MepIssueType::InsufficientHeadroom => Severity::High,
            MepIssueType::DisconnectedStart
            | MepIssueType::DisconnectedEnd
            | MepIssueType::MultipleDisconnected
            | MepIssueType::Undersized
            | MepIssueType::Oversized
            | MepIssueType::InsufficientAccess => Severity::Medium,
        }
    }
}

impl fmt::Display for MepIssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue raised by an MEP validator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MepIssue {
    pub element_id: ElementId,
    pub element_type: String,
    pub issue_type: MepIssueType,
    pub description: String,
    pub system_name: Option<String>,
    pub location: Option<Location>,
}

impl MepIssue {
    pub fn new(
        element_id: ElementId,
        element_type: impl Into<String>,
        issue_type: MepIssueType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            element_id,
            element_type: element_type.into(),
            issue_type,
            description: description.into(),
            system_name: None,
            location: None,
        }
    }

    pub fn with_system(mut self, system_name: impl Into<String>) -> Self {
        self.system_name = Some(system_name.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.issue_type.default_severity()
    }
}

impl ToExportRecord for MepIssue {
    fn to_export_record(&self) -> ExportRecord {
        ExportRecord {
            element_id: self.element_id.clone(),
            element_type: self.element_type.clone(),
            issue_type: self.issue_type.as_str().to_string(),
            description: self.description.clone(),
            severity: self.severity(),
        }
    }
}

/// Issue list shared by every MEP validator
pub trait MepValidator {
    fn issues(&self) -> &[MepIssue];

    fn issues_mut(&mut self) -> &mut Vec<MepIssue>;

    fn issues_by_type(&self, issue_type: MepIssueType) -> Vec<&MepIssue> {
        self.issues()
            .iter()
            .filter(|i| i.issue_type == issue_type)
            .collect()
    }

    fn issues_by_system(&self, system_name: &str) -> Vec<&MepIssue> {
        self.issues()
            .iter()
            .filter(|i| i.system_name.as_deref() == Some(system_name))
            .collect()
    }

    fn issue_count(&self) -> usize {
        self.issues().len()
    }

    fn clear(&mut self) {
        self.issues_mut().clear();
    }
}

/// Append `found` to a validator's list and hand it back
fn record<V: MepValidator + ?Sized>(validator: &mut V, found: Vec<MepIssue>) -> Vec<MepIssue> {
    validator.issues_mut().extend(found.iter().cloned());
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_type_serde_matches_tag() {
        for tag in [
            MepIssueType::NoSystem,
            MepIssueType::MultipleDisconnected,
            MepIssueType::InsufficientAccess,
        ] {
            let json = serde_json::to_value(tag).unwrap();
            assert_eq!(json, tag.as_str());
        }
    }

    #[test]
    fn test_export_record_uses_default_severity() {
        let issue = MepIssue::new(
            ElementId::from("duct_1"),
            "duct",
            MepIssueType::DisconnectedEnd,
            "Duct end connector is not connected",
        )
        .with_system("Supply Air");

        let record = issue.to_export_record();
        assert_eq!(record.issue_type, "disconnected_end");
        assert_eq!(record.element_type, "duct");
        assert_eq!(record.severity, Severity::Medium);
    }
}
