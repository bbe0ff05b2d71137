use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_ID: &str = "-";

/// One entry of the roster.
///
/// Records are immutable once stored: the store only prepends or deletes
/// whole entries, it never edits fields in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendeeRecord {
    pub name: String,
    pub id: String,
    pub time: String,
    pub date: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    /// Only present when the producer supplied it (never set by the parser).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AttendeeRecord {
    pub fn new(
        name: impl Into<String>,
        id: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            time: time.into(),
            date: date.into(),
            lat: 0.0,
            lng: 0.0,
            email: None,
        }
    }

    pub fn with_coords(mut self, lat: f64, lng: f64) -> Self {
        self.lat = lat;
        self.lng = lng;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// True when both coordinates are set (a zero coordinate means "unknown").
    pub fn has_location(&self) -> bool {
        self.lat != 0.0 && self.lng != 0.0
    }
}
