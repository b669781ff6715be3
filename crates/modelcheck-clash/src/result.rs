// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clash results

use modelcheck_model::{ElementId, ExportRecord, Location, Severity, ToExportRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a clash was detected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClashType {
    /// Axis-aligned bounding boxes overlap
    BoundingBox,
    /// Exact solid intersection (reserved, not produced yet)
    PreciseGeometry,
}

impl ClashType {
    /// Snake-case tag used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ClashType::BoundingBox => "bounding_box",
            ClashType::PreciseGeometry => "precise_geometry",
        }
    }
}

impl fmt::Display for ClashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected geometric conflict between two elements
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClashResult {
    pub element_id_1: ElementId,
    pub element_id_2: ElementId,
    pub clash_type: ClashType,
    /// Overlap volume in mm³
    pub intersection_volume: f64,
    pub location: Option<Location>,
    pub severity: Severity,
}

impl ClashResult {
    /// `true` if `id` is one of the two clashing elements
    pub fn involves(&self, id: &ElementId) -> bool {
        &self.element_id_1 == id || &self.element_id_2 == id
    }

    /// Overlap volume in m³
    pub fn intersection_volume_m3(&self) -> f64 {
        self.intersection_volume / crate::MM3_PER_M3
    }
}

impl ToExportRecord for ClashResult {
    fn to_export_record(&self) -> ExportRecord {
        ExportRecord {
            element_id: self.element_id_1.clone(),
            element_type: "clash".to_string(),
            issue_type: self.clash_type.as_str().to_string(),
            description: format!(
                "Clashes with element {} ({:.3} m³ overlap)",
                self.element_id_2,
                self.intersection_volume_m3()
            ),
            severity: self.severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_involves_either_element() {
        let clash = ClashResult {
            element_id_1: ElementId::from("duct_1"),
            element_id_2: ElementId::Int(7),
            clash_type: ClashType::BoundingBox,
            intersection_volume: 2_500_000_000.0,
            location: Some([1000.0, 1000.0, 1000.0].into()),
            severity: Severity::Critical,
        };

        assert!(clash.involves(&ElementId::from("duct_1")));
        assert!(clash.involves(&ElementId::Int(7)));
        assert!(!clash.involves(&ElementId::from("7")));
        assert_eq!(clash.intersection_volume_m3(), 2.5);
        assert_eq!(clash.location, Some(Location::new(1000.0, 1000.0, 1000.0)));
    }
}
