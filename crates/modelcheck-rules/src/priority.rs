// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Severity-weighted ranking across issue kinds

use modelcheck_model::{ExportRecord, ToExportRecord};

/// Default size of [`IssuePrioritizer::top_issues`] lists
pub const DEFAULT_TOP_ISSUES: usize = 10;

/// Collects issues of any kind as export records and ranks them by
/// [`Severity::weight`](modelcheck_model::Severity::weight)
#[derive(Clone, Debug, Default)]
pub struct IssuePrioritizer {
    records: Vec<ExportRecord>,
}

impl IssuePrioritizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issues<'a, I, T>(&mut self, issues: I)
    where
        I: IntoIterator<Item = &'a T>,
        T: ToExportRecord + 'a,
    {
        self.records
            .extend(issues.into_iter().map(ToExportRecord::to_export_record));
    }

    pub fn add_record(&mut self, record: ExportRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ExportRecord] {
        &self.records
    }

    /// All records, heaviest severity first; equal weights keep insertion order
    pub fn prioritize(&self) -> Vec<ExportRecord> {
        let mut ranked = self.records.clone();
        ranked.sort_by_key(|r| std::cmp::Reverse(r.severity.weight()));
        ranked
    }

    pub fn top_issues(&self, limit: usize) -> Vec<ExportRecord> {
        let mut ranked = self.prioritize();
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MepIssue, MepIssueType, ValidationIssue};
    use modelcheck_model::{ElementId, Severity};

    #[test]
    fn test_mixed_issue_kinds_rank_by_weight() {
        let rule_issues = vec![
            ValidationIssue::new("naming", "Naming", Severity::Low, "naming", "w1", "bad name"),
            ValidationIssue::new("height", "Height", Severity::Critical, "walls", "w2", "too low"),
        ];
        let mep_issues = vec![MepIssue::new(
            ElementId::from("d1"),
            "duct",
            MepIssueType::NoSystem,
            "Duct is not part of any MEP system",
        )];

        let mut prioritizer = IssuePrioritizer::new();
        prioritizer.add_issues(&rule_issues);
        prioritizer.add_issues(&mep_issues);

        let ranked = prioritizer.prioritize();
        let severities: Vec<_> = ranked.iter().map(|r| r.severity).collect();
        assert_eq!(severities, vec![Severity::Critical, Severity::High, Severity::Low]);
        assert_eq!(ranked[1].issue_type, "no_system");
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let issues: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|id| ValidationIssue::new(*id, *id, Severity::Medium, "t", *id, "m"))
            .collect();
        let mut prioritizer = IssuePrioritizer::new();
        prioritizer.add_issues(&issues);
        prioritizer.add_record(ExportRecord {
            element_id: ElementId::from("z"),
            element_type: "clash".to_string(),
            issue_type: "bounding_box".to_string(),
            description: "info".to_string(),
            severity: Severity::Info,
        });

        let top = prioritizer.top_issues(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].issue_type, "a");
        assert_eq!(top[1].issue_type, "b");
        assert_eq!(prioritizer.top_issues(DEFAULT_TOP_ISSUES).len(), 4);
    }
}
