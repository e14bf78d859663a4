//! Parsers for catalog-provided encodings.
//!
//! - [`schedule_string`]: decode a lecture's raw `schedule` field into
//!   `(day, range, room)` blocks

pub mod schedule_string;


pub use schedule_string::{entries_for_lecture, parse_block, parse_schedule, ScheduleParseError};
