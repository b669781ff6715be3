// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat issue records consumed by the report export layer

use crate::{ElementId, Result, Severity};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One row of an exported issue table
///
/// Field names are the keys the HTML/CSV/Markdown renderers look up.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub element_id: ElementId,
    pub element_type: String,
    pub issue_type: String,
    pub description: String,
    pub severity: Severity,
}

/// Anything that can be flattened into an [`ExportRecord`]
pub trait ToExportRecord {
    fn to_export_record(&self) -> ExportRecord;
}

/// Flatten a slice of issues into export records
pub fn to_export_records<T: ToExportRecord>(issues: &[T]) -> Vec<ExportRecord> {
    issues.iter().map(ToExportRecord::to_export_record).collect()
}

/// Write records as a pretty-printed JSON array
pub fn export_json(records: &[ExportRecord], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckError;

    fn record(id: &str) -> ExportRecord {
        ExportRecord {
            element_id: ElementId::from(id),
            element_type: "duct".to_string(),
            issue_type: "no_system".to_string(),
            description: "Duct is not part of any MEP system".to_string(),
            severity: Severity::High,
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_export_json_reports_full_device() {
        let records = vec![record("duct_1"), record("duct_2")];
        let err = export_json(&records, "/dev/full").unwrap_err();
        assert!(matches!(err, CheckError::Io(_)));
    }

    #[test]
    fn test_export_json_missing_directory() {
        let dir = std::env::temp_dir().join("modelcheck-no-such-dir").join("x");
        let err = export_json(&[record("duct_1")], dir.join("issues.json")).unwrap_err();
        assert!(matches!(err, CheckError::Io(_)));
    }
}
