// src/export/model.rs

use crate::models::AttendeeRecord;

/// Columns of the PDF table.
pub(crate) const PDF_HEADERS: [&str; 4] = ["Name", "ID", "Date", "Time"];

/// Record keys, in record order, used as spreadsheet headers.
pub(crate) const RECORD_KEYS: [&str; 6] = ["name", "id", "time", "date", "lat", "lng"];
pub(crate) const EMAIL_KEY: &str = "email";

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

/// PDF row: Name, ID, Date, Time.
pub(crate) fn record_to_pdf_row(r: &AttendeeRecord) -> Vec<String> {
    vec![r.name.clone(), r.id.clone(), r.date.clone(), r.time.clone()]
}

pub(crate) fn records_to_pdf_table(records: &[AttendeeRecord]) -> Vec<Vec<String>> {
    records.iter().map(record_to_pdf_row).collect()
}

/// Spreadsheet headers: the record keys, plus `email` when any record has one.
pub(crate) fn sheet_headers(records: &[AttendeeRecord]) -> Vec<&'static str> {
    let mut headers = RECORD_KEYS.to_vec();
    if records.iter().any(|r| r.email.is_some()) {
        headers.push(EMAIL_KEY);
    }
    headers
}

/// Spreadsheet row aligned with `sheet_headers`.
pub(crate) fn record_to_sheet_row(r: &AttendeeRecord, with_email: bool) -> Vec<Cell> {
    let mut row = vec![
        Cell::Text(r.name.clone()),
        Cell::Text(r.id.clone()),
        Cell::Text(r.time.clone()),
        Cell::Text(r.date.clone()),
        Cell::Number(r.lat),
        Cell::Number(r.lng),
    ];
    if with_email {
        row.push(match &r.email {
            Some(e) => Cell::Text(e.clone()),
            None => Cell::Empty,
        });
    }
    row
}
