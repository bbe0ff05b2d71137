//! Countdown display helpers. The session only emits numbers; these turn
//! them into what a view shows.

pub const EXPIRED_LABEL: &str = "Expired";

/// `M:SS`, e.g. `5:00`, `0:09`.
pub fn format_remaining(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Last minute before expiry (views highlight it).
pub fn is_final_minute(secs: u32) -> bool {
    secs > 0 && secs < 60
}
