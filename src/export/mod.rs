// src/export/mod.rs

mod model;
mod pdf;
mod pdf_export;
pub mod sink;
mod xlsx;

pub use pdf_export::DEFAULT_TITLE;
pub use sink::{Artifact, DirectorySink, DownloadSink};
pub use xlsx::SHEET_NAME;

use crate::errors::AppResult;
use crate::models::AttendeeRecord;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    /// Fixed download name of each artifact kind.
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "attendees.pdf",
            ExportFormat::Xlsx => "attendees.xlsx",
        }
    }
}

/// Serialize the roster into an artifact. Does not look at emptiness.
pub fn render(format: ExportFormat, records: &[AttendeeRecord], title: &str) -> AppResult<Artifact> {
    let bytes = match format {
        ExportFormat::Pdf => pdf_export::render_pdf(records, title),
        ExportFormat::Xlsx => xlsx::render_xlsx(records)?,
    };

    Ok(Artifact {
        file_name: format.file_name(),
        bytes,
    })
}

/// Render and hand the artifact to `sink`.
///
/// An empty roster produces nothing: the sink is not called and `None` is
/// returned.
pub fn export_roster<K: DownloadSink + ?Sized>(
    records: &[AttendeeRecord],
    format: ExportFormat,
    title: &str,
    sink: &mut K,
) -> AppResult<Option<PathBuf>> {
    if records.is_empty() {
        return Ok(None);
    }

    let artifact = render(format, records, title)?;
    sink.deliver(&artifact).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        delivered: Vec<Artifact>,
    }

    impl DownloadSink for RecordingSink {
        fn deliver(&mut self, artifact: &Artifact) -> AppResult<PathBuf> {
            self.delivered.push(artifact.clone());
            Ok(PathBuf::from(artifact.file_name))
        }
    }

    fn roster() -> Vec<AttendeeRecord> {
        vec![
            AttendeeRecord::new("Bob", "7", "6/1/2025", "9:30:00 AM"),
            AttendeeRecord::new("Alice", "42", "6/1/2025", "9:00:00 AM"),
        ]
    }

    #[test]
    fn empty_roster_never_reaches_the_sink() {
        let mut sink = RecordingSink::default();
        for format in [ExportFormat::Pdf, ExportFormat::Xlsx] {
            let out = export_roster(&[], format, DEFAULT_TITLE, &mut sink).unwrap();
            assert_eq!(out, None);
        }
        assert!(sink.delivered.is_empty());
    }

    #[test]
    fn artifacts_use_fixed_file_names() {
        let mut sink = RecordingSink::default();
        let records = roster();

        export_roster(&records, ExportFormat::Pdf, DEFAULT_TITLE, &mut sink).unwrap();
        export_roster(&records, ExportFormat::Xlsx, DEFAULT_TITLE, &mut sink).unwrap();

        let names: Vec<_> = sink.delivered.iter().map(|a| a.file_name).collect();
        assert_eq!(names, ["attendees.pdf", "attendees.xlsx"]);
        assert!(sink.delivered[0].bytes.starts_with(b"%PDF"));
        assert!(sink.delivered[1].bytes.starts_with(b"PK"));
    }

    #[test]
    fn pdf_lists_rows_in_roster_order() {
        let artifact = render(ExportFormat::Pdf, &roster(), DEFAULT_TITLE).unwrap();
        let text = String::from_utf8_lossy(&artifact.bytes).into_owned();

        for col in ["(Name)", "(ID)", "(Date)", "(Time)"] {
            assert!(text.contains(col), "missing header {col}");
        }
        let bob = text.find("(Bob)").unwrap();
        let alice = text.find("(Alice)").unwrap();
        assert!(bob < alice);
    }

    #[test]
    fn export_does_not_touch_the_input() {
        let records = roster();
        let before = records.clone();
        let mut sink = RecordingSink::default();
        export_roster(&records, ExportFormat::Xlsx, DEFAULT_TITLE, &mut sink).unwrap();
        assert_eq!(records, before);
    }
}
