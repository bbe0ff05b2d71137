//! Scanned payload → AttendeeRecord.
//!
//! Payloads are `Key: value` lines. Parsing is best-effort: unknown keys,
//! malformed lines and unparsable coordinates degrade to defaults, so any
//! payload yields a record.

use super::attendee::{AttendeeRecord, DEFAULT_ID, DEFAULT_NAME};
use crate::ui::messages::warning;
use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};
use std::collections::HashMap;

/// US month/day/year, e.g. `10/16/2026`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";
/// 12-hour clock, e.g. `3:04:05 PM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-I:%M:%S %p";

const KEY_NAME: &str = "Name";
const KEY_ID: &str = "ID";
const KEY_TIME: &str = "Time";
const KEY_DATE: &str = "Date";
const KEY_LAT: &str = "Latitude";
const KEY_LNG: &str = "Longitude";

#[derive(Debug, Clone)]
pub struct RecordParser {
    date_format: String,
    time_format: String,
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT, DEFAULT_TIME_FORMAT)
    }
}

impl RecordParser {
    /// An invalid strftime pattern is replaced by the default one.
    pub fn new(date_format: impl Into<String>, time_format: impl Into<String>) -> Self {
        Self {
            date_format: checked_format(date_format.into(), DEFAULT_DATE_FORMAT),
            time_format: checked_format(time_format.into(), DEFAULT_TIME_FORMAT),
        }
    }

    /// Build a record from `raw`; missing date/time come from `captured_at`.
    pub fn parse(&self, raw: &str, captured_at: NaiveDateTime) -> AttendeeRecord {
        let fields = split_fields(raw);

        let text = |key: &str, default: String| -> String {
            fields
                .get(key)
                .map(|v| v.to_string())
                .unwrap_or(default)
        };

        AttendeeRecord {
            name: text(KEY_NAME, DEFAULT_NAME.to_string()),
            id: text(KEY_ID, DEFAULT_ID.to_string()),
            time: text(
                KEY_TIME,
                captured_at.format(&self.time_format).to_string(),
            ),
            date: text(
                KEY_DATE,
                captured_at.format(&self.date_format).to_string(),
            ),
            lat: coordinate(fields.get(KEY_LAT).copied()),
            lng: coordinate(fields.get(KEY_LNG).copied()),
            email: None,
        }
    }
}

/// Parse with the default locale formats.
pub fn parse_payload(raw: &str, captured_at: NaiveDateTime) -> AttendeeRecord {
    RecordParser::default().parse(raw, captured_at)
}

fn checked_format(format: String, fallback: &str) -> String {
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        warning(format!(
            "Invalid date/time format \"{format}\". Using \"{fallback}\"."
        ));
        return fallback.to_string();
    }
    format
}

/// Collect `key -> value` pairs; a repeated key keeps its last value and
/// empty values are treated as absent.
fn split_fields(raw: &str) -> HashMap<&str, &str> {
    let mut fields = HashMap::new();

    for line in raw.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        if value.is_empty() {
            fields.remove(key);
        } else {
            fields.insert(key, value);
        }
    }

    fields
}

/// Leading decimal number of `value` (`"14.5 N"` -> 14.5); 0 when there is
/// none or it is not finite.
fn coordinate(value: Option<&str>) -> f64 {
    value
        .map(numeric_prefix)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix of `s` (after leading whitespace) shaped like
/// `[+-]digits[.digits][e[+-]digits]`. Empty when no digit leads.
fn numeric_prefix(s: &str) -> &str {
    let s = s.trim_start();
    let b = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if b.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return "";
    }

    if matches!(b.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(b.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap()
    }

    #[test]
    fn name_and_id_with_capture_time_defaults() {
        let r = parse_payload("Name:Alice\nID:42", at());
        assert_eq!(r.name, "Alice");
        assert_eq!(r.id, "42");
        assert_eq!(r.lat, 0.0);
        assert_eq!(r.lng, 0.0);
        assert_eq!(r.date, "3/7/2025");
        assert_eq!(r.time, "2:05:09 PM");
        assert_eq!(r.email, None);
    }

    #[test]
    fn empty_and_blank_payloads_yield_defaults() {
        for raw in ["", "   ", "\n\r\n  \n"] {
            let r = parse_payload(raw, at());
            assert_eq!(r.name, "Unknown");
            assert_eq!(r.id, "-");
            assert_eq!(r.date, "3/7/2025");
        }
    }

    #[test]
    fn crlf_lines_and_colons_inside_values() {
        let r = parse_payload("Name: Bob \r\nTime: 10:30:00\r\nDate:2025-01-02\r\n", at());
        assert_eq!(r.name, "Bob");
        assert_eq!(r.time, "10:30:00");
        assert_eq!(r.date, "2025-01-02");
    }

    #[test]
    fn coordinates_parse_or_fall_back_to_zero() {
        let r = parse_payload("Latitude:14.5\nLongitude:121.0", at());
        assert_eq!(r.lat, 14.5);
        assert_eq!(r.lng, 121.0);

        let r = parse_payload("Latitude:north\nLongitude:NaN", at());
        assert_eq!(r.lat, 0.0);
        assert_eq!(r.lng, 0.0);
    }

    #[test]
    fn coordinates_keep_their_leading_number() {
        let r = parse_payload("Latitude:14.5°\nLongitude:121.0,", at());
        assert_eq!(r.lat, 14.5);
        assert_eq!(r.lng, 121.0);

        let r = parse_payload("Latitude: -14.5 N\nLongitude:.5e1x", at());
        assert_eq!(r.lat, -14.5);
        assert_eq!(r.lng, 5.0);

        let r = parse_payload("Latitude:1e400\nLongitude:-.", at());
        assert_eq!(r.lat, 0.0);
        assert_eq!(r.lng, 0.0);
    }

    #[test]
    fn numeric_prefix_shapes() {
        assert_eq!(numeric_prefix("12abc"), "12");
        assert_eq!(numeric_prefix("3.e"), "3.");
        assert_eq!(numeric_prefix("2e+"), "2");
        assert_eq!(numeric_prefix("+7.25E-2 rest"), "+7.25E-2");
        assert_eq!(numeric_prefix("abc"), "");
    }

    #[test]
    fn unknown_keys_case_and_garbage_lines_are_ignored() {
        let r = parse_payload("name:lower\n:no key\nno colon here\nEmail:x@y.z\nID:7", at());
        assert_eq!(r.name, "Unknown");
        assert_eq!(r.id, "7");
        assert_eq!(r.email, None);
    }

    #[test]
    fn repeated_key_keeps_last_value_and_empty_value_is_absent() {
        let r = parse_payload("Name:First\nName:Second\nID:", at());
        assert_eq!(r.name, "Second");
        assert_eq!(r.id, "-");
    }

    #[test]
    fn custom_formats_are_used_for_defaults() {
        let p = RecordParser::new("%Y-%m-%d", "%H:%M");
        let r = p.parse("Name:Z", at());
        assert_eq!(r.date, "2025-03-07");
        assert_eq!(r.time, "14:05");
    }

    #[test]
    fn invalid_formats_fall_back_to_defaults() {
        let p = RecordParser::new("%Q", "%H:%M");
        let r = p.parse("Name:Alice", at());
        assert_eq!(r.name, "Alice");
        assert_eq!(r.date, "3/7/2025");
        assert_eq!(r.time, "14:05");

        let r = RecordParser::new("%Y", "%").parse("", at());
        assert_eq!(r.date, "2025");
        assert_eq!(r.time, "2:05:09 PM");
    }
}
