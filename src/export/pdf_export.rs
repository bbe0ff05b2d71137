// src/export/pdf_export.rs

use crate::export::model::{PDF_HEADERS, records_to_pdf_table};
use crate::export::pdf::PdfManager;
use crate::models::AttendeeRecord;

pub const DEFAULT_TITLE: &str = "Attendee Records";

/// Render the roster as a titled, paginated table.
pub(crate) fn render_pdf(records: &[AttendeeRecord], title: &str) -> Vec<u8> {
    let rows = records_to_pdf_table(records);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &PDF_HEADERS, &rows);
    pdf.finish()
}
