// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clash report: ordered clash list plus an element adjacency multigraph

use crate::ClashResult;
use chrono::{DateTime, Utc};
use log::info;
use modelcheck_model::{Location, Result, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Number of ranked elements included in a serialized report
pub const DEFAULT_PROBLEMATIC_LIMIT: usize = 10;

/// Summary block of a serialized clash report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClashSummary {
    pub total_clashes: usize,
    pub critical_clashes: usize,
    pub high_clashes: usize,
    pub elements_checked: usize,
    pub elements_with_clashes: usize,
}

/// Ranked element entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProblematicElement {
    pub element_id: String,
    pub clash_count: usize,
}

/// Serialized form of a [`ClashReport`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClashReportDocument {
    pub project_name: String,
    pub timestamp: DateTime<Utc>,
    pub summary: ClashSummary,
    pub clashes: Vec<ClashResult>,
    pub clash_matrix: BTreeMap<String, Vec<String>>,
    pub most_problematic_elements: Vec<ProblematicElement>,
}

/// Clash report for one project
///
/// Clashes keep insertion order. The clash matrix maps every element key to
/// the keys it clashed with; each clash adds one entry in both directions,
/// so a pair that clashes twice appears twice on each side.
#[derive(Clone, Debug)]
pub struct ClashReport {
    project_name: String,
    timestamp: DateTime<Utc>,
    clashes: Vec<ClashResult>,
    clash_matrix: BTreeMap<String, Vec<String>>,
    /// Element keys in order of first appearance
    first_seen: Vec<String>,
    total_elements_checked: usize,
}

impl ClashReport {
    /// Create an empty report stamped with the current time
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            timestamp: Utc::now(),
            clashes: Vec::new(),
            clash_matrix: BTreeMap::new(),
            first_seen: Vec::new(),
            total_elements_checked: 0,
        }
    }

    /// Append a clash and update the matrix symmetrically
    pub fn add_clash(&mut self, clash: ClashResult) {
        let a = clash.element_id_1.key();
        let b = clash.element_id_2.key();
        self.link(&a, &b);
        self.link(&b, &a);
        self.clashes.push(clash);
    }

    fn link(&mut self, from: &str, to: &str) {
        match self.clash_matrix.get_mut(from) {
            Some(neighbors) => neighbors.push(to.to_string()),
            None => {
                self.first_seen.push(from.to_string());
                self.clash_matrix
                    .insert(from.to_string(), vec![to.to_string()]);
            }
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn clashes(&self) -> &[ClashResult] {
        &self.clashes
    }

    pub fn clash_matrix(&self) -> &BTreeMap<String, Vec<String>> {
        &self.clash_matrix
    }

    pub fn total_elements_checked(&self) -> usize {
        self.total_elements_checked
    }

    pub fn set_elements_checked(&mut self, count: usize) {
        self.total_elements_checked = count;
    }

    /// Clashes of one severity tier
    pub fn clashes_by_severity(&self, severity: Severity) -> Vec<&ClashResult> {
        self.clashes
            .iter()
            .filter(|c| c.severity == severity)
            .collect()
    }

    pub fn clash_count(&self) -> usize {
        self.clashes.len()
    }

    pub fn critical_count(&self) -> usize {
        self.count_severity(Severity::Critical)
    }

    pub fn high_count(&self) -> usize {
        self.count_severity(Severity::High)
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.clashes.iter().filter(|c| c.severity == severity).count()
    }

    /// Distinct element keys involved in at least one clash, first-seen order
    pub fn elements_with_clashes(&self) -> &[String] {
        &self.first_seen
    }

    /// Number of clash edges at `key` (duplicates counted)
    pub fn clash_count_for(&self, key: &str) -> usize {
        self.clash_matrix.get(key).map_or(0, Vec::len)
    }

    /// Elements ranked by clash-edge count, highest first
    ///
    /// Equal counts keep first-appearance order.
    pub fn most_problematic(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .first_seen
            .iter()
            .map(|key| (key.clone(), self.clash_count_for(key)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// `(element_id_1, element_id_2)` key pairs in clash order
    pub fn clash_pairs(&self) -> Vec<(String, String)> {
        self.clashes
            .iter()
            .map(|c| (c.element_id_1.key(), c.element_id_2.key()))
            .collect()
    }

    /// Locations of the clashes that carry one
    pub fn clash_locations(&self) -> Vec<Location> {
        self.clashes.iter().filter_map(|c| c.location).collect()
    }

    /// Serializable snapshot of the report
    pub fn to_document(&self) -> ClashReportDocument {
        ClashReportDocument {
            project_name: self.project_name.clone(),
            timestamp: self.timestamp,
            summary: ClashSummary {
                total_clashes: self.clash_count(),
                critical_clashes: self.critical_count(),
                high_clashes: self.high_count(),
                elements_checked: self.total_elements_checked,
                elements_with_clashes: self.first_seen.len(),
            },
            clashes: self.clashes.clone(),
            clash_matrix: self.clash_matrix.clone(),
            most_problematic_elements: self
                .most_problematic(DEFAULT_PROBLEMATIC_LIMIT)
                .into_iter()
                .map(|(element_id, clash_count)| ProblematicElement {
                    element_id,
                    clash_count,
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON (2-space indent)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Write the JSON form to `path`
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(
            "saved clash report '{}' ({} clashes) to {}",
            self.project_name,
            self.clashes.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClashType;
    use modelcheck_model::ElementId;

    fn clash(a: &str, b: &str, severity: Severity) -> ClashResult {
        ClashResult {
            element_id_1: ElementId::from(a),
            element_id_2: ElementId::from(b),
            clash_type: ClashType::BoundingBox,
            intersection_volume: 1000.0,
            location: Some(Location::new(1.0, 2.0, 3.0)),
            severity,
        }
    }

    #[test]
    fn test_add_clash_updates_matrix_symmetrically() {
        let mut report = ClashReport::new("Test");
        report.add_clash(clash("a", "b", Severity::High));
        report.add_clash(clash("a", "b", Severity::Low));

        assert_eq!(report.clash_matrix()["a"], vec!["b", "b"]);
        assert_eq!(report.clash_matrix()["b"], vec!["a", "a"]);
        assert_eq!(report.elements_with_clashes(), ["a", "b"]);
    }

    #[test]
    fn test_counts() {
        let mut report = ClashReport::new("Test");
        report.add_clash(clash("a", "b", Severity::Critical));
        report.add_clash(clash("a", "c", Severity::High));
        report.add_clash(clash("b", "c", Severity::High));
        report.add_clash(clash("c", "d", Severity::Low));

        assert_eq!(report.clash_count(), 4);
        assert_eq!(report.critical_count(), 1);
        assert_eq!(report.high_count(), 2);
        assert_eq!(report.clashes_by_severity(Severity::Low).len(), 1);
        assert_eq!(report.clash_locations().len(), 4);
    }

    #[test]
    fn test_most_problematic_ranking() {
        let mut report = ClashReport::new("Test");
        report.add_clash(clash("hub", "x", Severity::Low));
        report.add_clash(clash("hub", "y", Severity::Low));
        report.add_clash(clash("hub", "z", Severity::Low));

        let ranked = report.most_problematic(10);
        assert_eq!(ranked[0], ("hub".to_string(), 3));
        assert!(ranked[1..].iter().all(|(_, count)| *count == 1));
        // Ties keep first-appearance order
        let tail: Vec<&str> = ranked[1..].iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(tail, ["x", "y", "z"]);

        assert_eq!(report.most_problematic(2).len(), 2);
    }

    #[test]
    fn test_document_summary() {
        let mut report = ClashReport::new("Tower");
        report.set_elements_checked(25);
        report.add_clash(clash("1", "2", Severity::Critical));
        report.add_clash(clash("2", "3", Severity::Medium));

        let doc = report.to_document();
        assert_eq!(doc.project_name, "Tower");
        assert_eq!(doc.summary.total_clashes, 2);
        assert_eq!(doc.summary.critical_clashes, 1);
        assert_eq!(doc.summary.high_clashes, 0);
        assert_eq!(doc.summary.elements_checked, 25);
        assert_eq!(doc.summary.elements_with_clashes, 3);
        assert_eq!(doc.most_problematic_elements[0].element_id, "2");
        assert_eq!(doc.most_problematic_elements[0].clash_count, 2);
    }

    #[test]
    fn test_json_round_trip() {
        let mut report = ClashReport::new("Round Trip");
        report.add_clash(clash("a", "b", Severity::Critical));
        report.add_clash(clash("b", "c", Severity::High));

        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["total_clashes"], 2);
        assert_eq!(value["clashes"][0]["clash_type"], "bounding_box");
        assert_eq!(value["clashes"][0]["severity"], "critical");
        assert!(value["timestamp"].as_str().unwrap().contains('T'));

        let doc: ClashReportDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, report.to_document());
    }

    #[test]
    fn test_save() {
        let mut report = ClashReport::new("Saved");
        report.add_clash(clash("a", "b", Severity::Low));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clashes.json");
        report.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"project_name\": \"Saved\""));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let report = ClashReport::new("Nowhere");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        assert!(report.save(path).is_err());
    }
}
