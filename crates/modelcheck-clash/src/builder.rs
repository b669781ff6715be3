// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fluent construction of clash reports

use crate::{ClashReport, ClashResult};

/// Builder holding exactly one report under construction
///
/// # Example
///
/// ```ignore
/// let report = ClashReportBuilder::new("Hospital Wing B")
///     .add_clashes(detector.clashes().iter().cloned())
///     .set_elements_checked(elements.len())
///     .build();
/// ```
#[derive(Debug)]
pub struct ClashReportBuilder {
    report: ClashReport,
}

impl ClashReportBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            report: ClashReport::new(project_name),
        }
    }

    /// Add clashes in iteration order
    pub fn add_clashes(mut self, clashes: impl IntoIterator<Item = ClashResult>) -> Self {
        for clash in clashes {
            self.report.add_clash(clash);
        }
        self
    }

    /// Record how many elements were checked
    pub fn set_elements_checked(mut self, count: usize) -> Self {
        self.report.set_elements_checked(count);
        self
    }

    /// Finish and return the report
    pub fn build(self) -> ClashReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundingVolume, ClashDetector, ClashElement};

    #[test]
    fn test_builder_from_detector() {
        let elements: Vec<ClashElement> = (0..3)
            .map(|i| {
                let x = i as f64 * 500.0;
                ClashElement::new(
                    i as i64,
                    BoundingVolume::from_extents(x, 0.0, 0.0, x + 1000.0, 1000.0, 1000.0).unwrap(),
                )
            })
            .collect();
        let mut detector = ClashDetector::new();
        let clashes = detector.check_all(&elements);

        let report = ClashReportBuilder::new("Builder")
            .add_clashes(clashes)
            .set_elements_checked(elements.len())
            .build();

        assert_eq!(report.project_name(), "Builder");
        assert_eq!(report.clash_count(), 2);
        assert_eq!(report.total_elements_checked(), 3);
        assert_eq!(report.most_problematic(1), vec![("1".to_string(), 2)]);
    }
}
