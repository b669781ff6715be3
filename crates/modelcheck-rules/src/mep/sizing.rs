// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Duct and pipe sizing checks

use super::{record, MepIssue, MepIssueType, MepValidator};
use modelcheck_model::{SizedDuct, SizedPipe};
use serde::{Deserialize, Serialize};

/// Sizing limits; dimensions in mm, velocities in m/s
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingLimits {
    /// Smallest allowed duct side
    pub duct_min_size: f64,
    /// Largest allowed duct side
    pub duct_max_size: f64,
    pub duct_max_velocity: f64,
    pub pipe_min_diameter: f64,
    pub pipe_max_diameter: f64,
    pub pipe_max_velocity: f64,
}

impl Default for SizingLimits {
    fn default() -> Self {
        Self {
            duct_min_size: 100.0,
            duct_max_size: 2000.0,
            duct_max_velocity: 10.0,
            pipe_min_diameter: 15.0,
            pipe_max_diameter: 600.0,
            pipe_max_velocity: 3.0,
        }
    }
}

impl SizingLimits {
    pub fn with_duct_size(mut self, min: f64, max: f64) -> Self {
        self.duct_min_size = min;
        self.duct_max_size = max;
        self
    }

    pub fn with_duct_max_velocity(mut self, velocity: f64) -> Self {
        self.duct_max_velocity = velocity;
        self
    }

    pub fn with_pipe_diameter(mut self, min: f64, max: f64) -> Self {
        self.pipe_min_diameter = min;
        self.pipe_max_diameter = max;
        self
    }

    pub fn with_pipe_max_velocity(mut self, velocity: f64) -> Self {
        self.pipe_max_velocity = velocity;
        self
    }
}

/// Flags undersized, oversized and too-fast ducts and pipes
///
/// Each limit is checked independently, so one element can raise several
/// issues.
#[derive(Debug, Default)]
pub struct MepSizingValidator {
    limits: SizingLimits,
    issues: Vec<MepIssue>,
}

impl MepSizingValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: SizingLimits) -> Self {
        Self {
            limits,
            issues: Vec::new(),
        }
    }

    pub fn limits(&self) -> &SizingLimits {
        &self.limits
    }

    pub fn validate_duct_sizing(&mut self, ducts: &[SizedDuct]) -> Vec<MepIssue> {
        let limits = self.limits;
        let mut found = Vec::new();

        for duct in ducts {
            let smallest = duct.width.min(duct.height);
            let largest = duct.width.max(duct.height);

            if smallest < limits.duct_min_size {
                found.push(MepIssue::new(
                    duct.id.clone(),
                    "duct",
                    MepIssueType::Undersized,
                    format!(
                        "Duct {}x{} mm is below the minimum size of {} mm",
                        duct.width, duct.height, limits.duct_min_size
                    ),
                ));
            }
            if largest > limits.duct_max_size {
                found.push(MepIssue::new(
                    duct.id.clone(),
                    "duct",
                    MepIssueType::Oversized,
                    format!(
                        "Duct {}x{} mm exceeds the maximum size of {} mm",
                        duct.width, duct.height, limits.duct_max_size
                    ),
                ));
            }
            if let Some(velocity) = duct.velocity.filter(|v| *v > limits.duct_max_velocity) {
                found.push(MepIssue::new(
                    duct.id.clone(),
                    "duct",
                    MepIssueType::ExcessiveVelocity,
                    format!(
                        "Duct velocity {velocity} m/s exceeds the maximum of {} m/s",
                        limits.duct_max_velocity
                    ),
                ));
            }
        }

        record(self, found)
    }

    pub fn validate_pipe_sizing(&mut self, pipes: &[SizedPipe]) -> Vec<MepIssue> {
        let limits = self.limits;
        let mut found = Vec::new();

        for pipe in pipes {
            if pipe.diameter < limits.pipe_min_diameter {
                found.push(MepIssue::new(
                    pipe.id.clone(),
                    "pipe",
                    MepIssueType::Undersized,
                    format!(
                        "Pipe diameter {} mm is below the minimum of {} mm",
                        pipe.diameter, limits.pipe_min_diameter
                    ),
                ));
            }
            if pipe.diameter > limits.pipe_max_diameter {
                found.push(MepIssue::new(
                    pipe.id.clone(),
                    "pipe",
                    MepIssueType::Oversized,
                    format!(
                        "Pipe diameter {} mm exceeds the maximum of {} mm",
                        pipe.diameter, limits.pipe_max_diameter
                    ),
                ));
            }
            if let Some(velocity) = pipe.velocity.filter(|v| *v > limits.pipe_max_velocity) {
                found.push(MepIssue::new(
                    pipe.id.clone(),
                    "pipe",
                    MepIssueType::ExcessiveVelocity,
                    format!(
                        "Pipe velocity {velocity} m/s exceeds the maximum of {} m/s",
                        limits.pipe_max_velocity
                    ),
                ));
            }
        }

        record(self, found)
    }
}

impl MepValidator for MepSizingValidator {
    fn issues(&self) -> &[MepIssue] {
        &self.issues
    }

    fn issues_mut(&mut self) -> &mut Vec<MepIssue> {
        &mut self.issues
    }
}
