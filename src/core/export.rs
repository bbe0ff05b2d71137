use crate::errors::AppResult;
use crate::export::{DownloadSink, ExportFormat, export_roster};
use crate::models::AttendeeRecord;
use crate::ui::messages::{info, success, warning};
use std::path::PathBuf;

/// High-level export: render the roster and save it through `sink`.
pub struct ExportLogic;

impl ExportLogic {
    /// Returns the saved path, or `None` when the roster is empty.
    pub fn export<K: DownloadSink>(
        records: &[AttendeeRecord],
        format: ExportFormat,
        title: &str,
        sink: &mut K,
    ) -> AppResult<Option<PathBuf>> {
        if records.is_empty() {
            warning("No attendees recorded yet. Nothing to export.");
            return Ok(None);
        }

        info(format!(
            "Exporting {} attendee(s) to {}",
            records.len(),
            format.as_str().to_uppercase()
        ));

        let saved = export_roster(records, format, title, sink)?;

        if let Some(path) = &saved {
            success(format!(
                "{} export completed: {}",
                format.as_str().to_uppercase(),
                path.display()
            ));
        }

        Ok(saved)
    }
}
