// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pairwise clash detection
//!
//! The detector tests element pairs for bounding-box overlap, classifies each
//! overlap by volume and keeps every detected clash in an accumulator that
//! persists across calls until [`ClashDetector::clear`].

use crate::broad::broad_phase_for;
use crate::{BoundingVolume, ClashResult, ClashType, DetectorOptions};
use log::debug;
use modelcheck_model::{ClashElementRecord, ElementId, FromRecord, Result, Severity};
use rayon::prelude::*;
use serde_json::Value;

/// Element participating in clash detection
#[derive(Clone, Debug, PartialEq)]
pub struct ClashElement {
    pub id: ElementId,
    pub volume: BoundingVolume,
}

impl ClashElement {
    /// Create an element from an id and a materialized volume
    pub fn new(id: impl Into<ElementId>, volume: BoundingVolume) -> Self {
        Self {
            id: id.into(),
            volume,
        }
    }

    /// Create an element from a raw record, validating its bounds
    pub fn from_record(record: &ClashElementRecord) -> Result<Self> {
        Ok(Self {
            id: record.id.clone(),
            volume: BoundingVolume::from_record(&record.bounding_box)?,
        })
    }
}

/// Geometric clash detector with a persistent accumulator
#[derive(Debug, Default)]
pub struct ClashDetector {
    options: DetectorOptions,
    clashes: Vec<ClashResult>,
}

impl ClashDetector {
    /// Create a detector with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with specific options
    pub fn with_options(options: DetectorOptions) -> Self {
        Self {
            options,
            clashes: Vec::new(),
        }
    }

    /// Current options
    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Test a single pair without touching the accumulator
    ///
    /// With a non-zero tolerance the first box is inflated for the overlap
    /// test; the reported volume is always the overlap of the raw boxes.
    pub fn evaluate_pair(
        &self,
        id1: &ElementId,
        box1: &BoundingVolume,
        id2: &ElementId,
        box2: &BoundingVolume,
    ) -> Option<ClashResult> {
        let hit = if self.options.tolerance_mm > 0.0 {
            box1.inflate(self.options.tolerance_mm).intersects(box2)
        } else {
            box1.intersects(box2)
        };
        if !hit {
            return None;
        }

        let intersection_volume = box1.intersection_volume(box2);
        let location = box1
            .center_location()
            .midpoint(&box2.center_location());

        Some(ClashResult {
            element_id_1: id1.clone(),
            element_id_2: id2.clone(),
            clash_type: ClashType::BoundingBox,
            intersection_volume,
            location: Some(location),
            severity: self.options.thresholds.classify(intersection_volume),
        })
    }

    /// Test a pair and record the clash if one is found
    pub fn check_pair(
        &mut self,
        id1: &ElementId,
        box1: &BoundingVolume,
        id2: &ElementId,
        box2: &BoundingVolume,
    ) -> Option<ClashResult> {
        let clash = self.evaluate_pair(id1, box1, id2, box2)?;
        self.clashes.push(clash.clone());
        Some(clash)
    }

    /// Test every unordered pair `i < j` exactly once
    ///
    /// Returns the clashes found by this call in `(i, j)` order and appends
    /// them to the accumulator in the same order, whichever broad phase and
    /// parallelism the options select.
    pub fn check_all(&mut self, elements: &[ClashElement]) -> Vec<ClashResult> {
        let volumes: Vec<BoundingVolume> = if self.options.tolerance_mm > 0.0 {
            elements
                .iter()
                .map(|e| e.volume.inflate(self.options.tolerance_mm))
                .collect()
        } else {
            elements.iter().map(|e| e.volume).collect()
        };

        let candidates = broad_phase_for(self.options.broad_phase).candidate_pairs(&volumes);
        debug!(
            "clash check: {} elements, {} candidate pairs ({:?})",
            elements.len(),
            candidates.len(),
            self.options.broad_phase
        );

        let test = |&(i, j): &(usize, usize)| {
            let (a, b) = (&elements[i], &elements[j]);
            self.evaluate_pair(&a.id, &a.volume, &b.id, &b.volume)
        };
        let found: Vec<ClashResult> = if self.options.parallel {
            candidates.par_iter().filter_map(test).collect()
        } else {
            candidates.iter().filter_map(test).collect()
        };

        debug!("clash check: {} clashes found", found.len());
        self.clashes.extend(found.iter().cloned());
        found
    }

    /// Parse typed records at the boundary, then run [`Self::check_all`]
    pub fn check_element_records(
        &mut self,
        records: &[ClashElementRecord],
    ) -> Result<Vec<ClashResult>> {
        let elements = records
            .iter()
            .map(ClashElement::from_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.check_all(&elements))
    }

    /// Parse loosely shaped JSON element records, then run [`Self::check_all`]
    ///
    /// Fails with `MissingField` on the first record lacking `id`,
    /// `bounding_box` or a coordinate.
    pub fn check_records(&mut self, records: &[Value]) -> Result<Vec<ClashResult>> {
        let records = ClashElementRecord::from_values(records)?;
        self.check_element_records(&records)
    }

    /// All accumulated clashes, in discovery order
    pub fn clashes(&self) -> &[ClashResult] {
        &self.clashes
    }

    /// Accumulated clashes of one severity tier
    pub fn clashes_by_severity(&self, severity: Severity) -> Vec<&ClashResult> {
        self.clashes
            .iter()
            .filter(|c| c.severity == severity)
            .collect()
    }

    /// Accumulated critical clashes
    pub fn critical_clashes(&self) -> Vec<&ClashResult> {
        self.clashes_by_severity(Severity::Critical)
    }

    /// Number of accumulated clashes
    pub fn total_clashes(&self) -> usize {
        self.clashes.len()
    }

    /// Drop all accumulated clashes
    pub fn clear(&mut self) {
        self.clashes.clear();
    }
}
