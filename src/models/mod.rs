pub mod attendee;
pub mod parser;

pub use attendee::AttendeeRecord;
pub use parser::{RecordParser, parse_payload};
