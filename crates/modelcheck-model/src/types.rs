// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types shared by clash detection and rule validation

use crate::CheckError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque element identifier
///
/// The host modeling application hands out either numeric element ids or
/// string ids (GUIDs, tags). Both are accepted and compared as-is; graph
/// structures key elements by the [`fmt::Display`] form.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementId {
    /// Numeric id (e.g. a Revit ElementId)
    Int(i64),
    /// String id (GUID, mark, tag)
    Text(String),
}

impl ElementId {
    /// Graph key for this element
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Int(id) => write!(f, "{}", id),
            ElementId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ElementId {
    fn from(id: i64) -> Self {
        ElementId::Int(id)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        ElementId::Int(i64::from(id))
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        ElementId::Text(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        ElementId::Text(id)
    }
}

/// Severity tier of a clash or a rule violation
///
/// Declared in ascending order so that `Severity::Critical > Severity::Low`.
/// `Info` only appears on prioritized issues; clash classification never
/// produces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// All tiers, most severe first
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Info,
    ];

    /// Lowercase tag used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Info => "info",
        }
    }

    /// Priority weight used when ranking issues
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Critical => 100,
            Severity::High => 50,
            Severity::Medium => 20,
            Severity::Low => 5,
            Severity::Info => 1,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Severity::Critical),
            "high" => Ok(Severity::High),
            "medium" => Ok(Severity::Medium),
            "low" => Ok(Severity::Low),
            "info" => Ok(Severity::Info),
            other => Err(CheckError::invalid_value(
                "severity",
                format!("unknown severity tier '{}'", other),
            )),
        }
    }
}

/// Point in model space, millimeters
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    /// Create a new location
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Midpoint between two locations
    pub fn midpoint(&self, other: &Location) -> Location {
        Location {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
            z: (self.z + other.z) / 2.0,
        }
    }
}

impl From<[f64; 3]> for Location {
    fn from(p: [f64; 3]) -> Self {
        Location::new(p[0], p[1], p[2])
    }
}
