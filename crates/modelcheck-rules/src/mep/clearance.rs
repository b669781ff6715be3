// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Headroom and maintenance access checks

use super::{record, MepIssue, MepIssueType, MepValidator};
use modelcheck_model::{AccessEquipment, HeadroomElement};
use serde::{Deserialize, Serialize};

/// Clearance limits in mm
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceLimits {
    /// Lowest allowed bottom elevation of overhead elements
    pub min_headroom: f64,
    pub min_access_clearance: f64,
}

impl Default for ClearanceLimits {
    fn default() -> Self {
        Self {
            min_headroom: 2100.0,
            min_access_clearance: 600.0,
        }
    }
}

impl ClearanceLimits {
    pub fn with_min_headroom(mut self, min_headroom: f64) -> Self {
        self.min_headroom = min_headroom;
        self
    }

    pub fn with_min_access_clearance(mut self, min_access_clearance: f64) -> Self {
        self.min_access_clearance = min_access_clearance;
        self
    }
}

#[derive(Debug, Default)]
pub struct MepClearanceValidator {
    limits: ClearanceLimits,
    issues: Vec<MepIssue>,
}

impl MepClearanceValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ClearanceLimits) -> Self {
        Self {
            limits,
            issues: Vec::new(),
        }
    }

    pub fn limits(&self) -> &ClearanceLimits {
        &self.limits
    }

    /// Flag elements whose underside (`elevation - height / 2`) is below the
    /// minimum headroom
    pub fn validate_headroom_clearance(&mut self, elements: &[HeadroomElement]) -> Vec<MepIssue> {
        let min = self.limits.min_headroom;
        let found = elements
            .iter()
            .filter_map(|element| {
                let bottom = element.bottom_elevation();
                (bottom < min).then(|| {
                    MepIssue::new(
                        element.id.clone(),
                        element.element_type.as_deref().unwrap_or("element"),
                        MepIssueType::InsufficientHeadroom,
                        format!("Bottom elevation {bottom} mm is below the minimum headroom of {min} mm"),
                    )
                })
            })
            .collect();

        record(self, found)
    }

    pub fn validate_access_clearance(&mut self, equipment: &[AccessEquipment]) -> Vec<MepIssue> {
        let min = self.limits.min_access_clearance;
        let found = equipment
            .iter()
            .filter(|equip| equip.access_clearance < min)
            .map(|equip| {
                MepIssue::new(
                    equip.id.clone(),
                    equip.equipment_type.as_deref().unwrap_or("equipment"),
                    MepIssueType::InsufficientAccess,
                    format!(
                        "Access clearance {} mm is below the minimum of {min} mm",
                        equip.access_clearance
                    ),
                )
            })
            .collect();

        record(self, found)
    }
}

impl MepValidator for MepClearanceValidator {
    fn issues(&self) -> &[MepIssue] {
        &self.issues
    }

    fn issues_mut(&mut self) -> &mut Vec<MepIssue> {
        &mut self.issues
    }
}
