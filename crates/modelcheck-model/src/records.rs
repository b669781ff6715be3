// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Input records handed over by the model acquisition layer
//!
//! Records arrive as loosely shaped JSON objects. Each record type names its
//! required fields; [`FromRecord::from_value`] checks them once at the
//! boundary and reports the first absent one as
//! [`CheckError::MissingField`], then deserializes into the typed struct.
//! Everything past the boundary works with typed fields only.

use crate::{CheckError, ElementId, Location, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Check that every dotted path in `paths` resolves to a non-null value
pub fn require_paths(value: &Value, record: &str, paths: &[&str]) -> Result<()> {
    for path in paths {
        let mut current = value;
        for segment in path.split('.') {
            current = match current.get(segment) {
                Some(next) if !next.is_null() => next,
                _ => return Err(CheckError::missing_field(record, *path)),
            };
        }
    }
    Ok(())
}

/// Typed record parsed from a JSON object with named missing-field errors
pub trait FromRecord: DeserializeOwned {
    /// Record name used in error messages
    const RECORD: &'static str;
    /// Dotted paths that must be present
    const REQUIRED: &'static [&'static str];

    /// Validate required fields and deserialize
    fn from_value(value: &Value) -> Result<Self> {
        require_paths(value, Self::RECORD, Self::REQUIRED)?;
        Ok(serde_json::from_value(value.clone())?)
    }

    /// Parse a slice of records, failing on the first malformed one
    fn from_values(values: &[Value]) -> Result<Vec<Self>> {
        values.iter().map(Self::from_value).collect()
    }
}

/// Raw min/max corners of an element's bounding box (millimeters)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundsRecord {
    pub min: Location,
    pub max: Location,
}

/// Element record for clash detection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClashElementRecord {
    pub id: ElementId,
    pub bounding_box: BoundsRecord,
}

impl FromRecord for ClashElementRecord {
    const RECORD: &'static str = "clash element";
    const REQUIRED: &'static [&'static str] = &[
        "id",
        "bounding_box",
        "bounding_box.min",
        "bounding_box.min.x",
        "bounding_box.min.y",
        "bounding_box.min.z",
        "bounding_box.max",
        "bounding_box.max.x",
        "bounding_box.max.y",
        "bounding_box.max.z",
    ];
}

/// MEP system (supply air, domestic cold water, ...)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MepSystem {
    pub id: ElementId,
    pub name: String,
    #[serde(default, rename = "type")]
    pub system_type: Option<String>,
}

impl FromRecord for MepSystem {
    const RECORD: &'static str = "MEP system";
    const REQUIRED: &'static [&'static str] = &["id", "name"];
}

/// Attachment point on a duct, pipe or piece of equipment
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Connector {
    #[serde(default)]
    pub connected: bool,
}

impl Connector {
    /// Connected connector
    pub fn connected() -> Self {
        Self { connected: true }
    }

    /// Open connector
    pub fn open() -> Self {
        Self { connected: false }
    }
}

/// System reference that is actually assigned (`""` and `0` count as unassigned)
pub fn assigned_system(system_id: &Option<ElementId>) -> Option<&ElementId> {
    match system_id {
        Some(ElementId::Text(s)) if s.is_empty() => None,
        Some(ElementId::Int(0)) => None,
        other => other.as_ref(),
    }
}

/// Duct with start/end connectors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuctRecord {
    pub id: ElementId,
    #[serde(default)]
    pub system_id: Option<ElementId>,
    #[serde(default)]
    pub start_connector: Option<Connector>,
    #[serde(default)]
    pub end_connector: Option<Connector>,
}

impl FromRecord for DuctRecord {
    const RECORD: &'static str = "duct";
    const REQUIRED: &'static [&'static str] = &["id"];
}

/// Pipe with any number of connectors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipeRecord {
    pub id: ElementId,
    #[serde(default)]
    pub system_id: Option<ElementId>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl FromRecord for PipeRecord {
    const RECORD: &'static str = "pipe";
    const REQUIRED: &'static [&'static str] = &["id"];
}

/// Air terminal, fixture or other system equipment
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub id: ElementId,
    #[serde(default, rename = "type")]
    pub equipment_type: Option<String>,
    #[serde(default)]
    pub system_id: Option<ElementId>,
}

impl FromRecord for EquipmentRecord {
    const RECORD: &'static str = "equipment";
    const REQUIRED: &'static [&'static str] = &["id"];
}

/// Any MEP element inspected for isolation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MepElementRecord {
    pub id: ElementId,
    #[serde(default, rename = "type")]
    pub element_type: Option<String>,
    #[serde(default)]
    pub connectors: Vec<Connector>,
}

impl FromRecord for MepElementRecord {
    const RECORD: &'static str = "MEP element";
    const REQUIRED: &'static [&'static str] = &["id"];
}

/// Rectangular duct cross-section (mm) and air velocity (m/s)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizedDuct {
    pub id: ElementId,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub velocity: Option<f64>,
}

impl FromRecord for SizedDuct {
    const RECORD: &'static str = "duct sizing";
    const REQUIRED: &'static [&'static str] = &["id", "width", "height"];
}

/// Pipe diameter (mm) and flow velocity (m/s)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SizedPipe {
    pub id: ElementId,
    pub diameter: f64,
    #[serde(default)]
    pub velocity: Option<f64>,
}

impl FromRecord for SizedPipe {
    const RECORD: &'static str = "pipe sizing";
    const REQUIRED: &'static [&'static str] = &["id", "diameter"];
}

/// Element hung below a ceiling: center elevation and overall height (mm)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadroomElement {
    pub id: ElementId,
    #[serde(default, rename = "type")]
    pub element_type: Option<String>,
    pub elevation: f64,
    #[serde(default)]
    pub height: f64,
}

impl HeadroomElement {
    /// Lowest point of the element
    pub fn bottom_elevation(&self) -> f64 {
        self.elevation - self.height / 2.0
    }
}

impl FromRecord for HeadroomElement {
    const RECORD: &'static str = "headroom element";
    const REQUIRED: &'static [&'static str] = &["id", "elevation"];
}

/// Equipment with its maintenance access clearance (mm)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessEquipment {
    pub id: ElementId,
    #[serde(default, rename = "type")]
    pub equipment_type: Option<String>,
    pub access_clearance: f64,
}

impl FromRecord for AccessEquipment {
    const RECORD: &'static str = "access equipment";
    const REQUIRED: &'static [&'static str] = &["id", "access_clearance"];
}
