//! Map enrichment: the engine hands out coordinates, a map view renders them.

use crate::models::AttendeeRecord;

const DEFAULT_LABEL: &str = "Attendee";

/// What the map view needs to show one attendee.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTarget {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl MapTarget {
    pub fn from_record(r: &AttendeeRecord) -> Self {
        let name = if r.name.trim().is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            r.name.clone()
        };
        Self {
            lat: r.lat,
            lng: r.lng,
            name,
        }
    }

    /// `None` when the record carries no usable location.
    pub fn embed_url(&self) -> Option<String> {
        if self.lat == 0.0 || self.lng == 0.0 {
            return None;
        }
        Some(map_embed_url(self.lat, self.lng))
    }

    pub fn title(&self) -> String {
        format!("{}'s Location", self.name)
    }
}

/// Satellite view, zoom 15, embeddable output.
pub fn map_embed_url(lat: f64, lng: f64) -> String {
    format!("https://www.google.com/maps?q={lat},{lng}&z=15&t=k&output=embed")
}

/// Records that can be placed on a map (both coordinates non-zero).
pub fn mappable(records: &[AttendeeRecord]) -> impl Iterator<Item = &AttendeeRecord> {
    records.iter().filter(|r| r.has_location())
}
