//! Schedule-string decoding.
//!
//! A lecture's `schedule` field is a list of blocks joined by `<p>`. Each block is
//! `<day><slots>[(<room>)]`, where `<slots>` is a single slot (`3`), an inclusive
//! run (`1~3`) or a comma list (`1,2`). Examples:
//!
//! ```text
//! 월1~2(제1공학관 103)<p>수3(제1공학관 103)
//! Mon1,2<p>Tue1
//! ```
//!
//! Blocks are decoded independently. A malformed block is logged and skipped so
//! one bad record never prevents selecting the lecture.

use std::collections::BTreeSet;

use log::debug;

use crate::models::{Day, Lecture, ScheduleBlock, ScheduleEntry, TimeRange, CATALOG_DELIMITER};

/// Why a single block could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleParseError {
    #[error("empty schedule block")]
    Empty,
    #[error("unknown day in block '{0}'")]
    UnknownDay(String),
    #[error("no time slots in block '{0}'")]
    MissingSlots(String),
    #[error("invalid time slot '{slot}' in block '{block}'")]
    InvalidSlot { block: String, slot: String },
    #[error("invalid time range in block '{block}': {reason}")]
    InvalidRange { block: String, reason: String },
}

/// Decode every well-formed block of a raw schedule string.
pub fn parse_schedule(raw: &str) -> Vec<ScheduleBlock> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    for block in raw.split(CATALOG_DELIMITER) {
        match parse_block(block) {
            Ok(parsed) => blocks.extend(parsed),
            Err(ScheduleParseError::Empty) => {}
            Err(e) => debug!("Skipping schedule block: {}", e),
        }
    }
    blocks
}

/// Decode one block.
///
/// A comma list that is not contiguous (`1,2,5`) yields one block per
/// contiguous run, all sharing the day and room.
pub fn parse_block(block: &str) -> Result<Vec<ScheduleBlock>, ScheduleParseError> {
    let block = block.trim();
    if block.is_empty() {
        return Err(ScheduleParseError::Empty);
    }

    let slots_at = block
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| ScheduleParseError::MissingSlots(block.to_string()))?;
    let (day_part, rest) = block.split_at(slots_at);
    let day: Day = day_part
        .parse()
        .map_err(|_| ScheduleParseError::UnknownDay(block.to_string()))?;

    let slots_len = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '~' || c == ',' || c == ' '))
        .unwrap_or(rest.len());
    let (slot_part, room_part) = rest.split_at(slots_len);

    let slots = parse_slots(block, slot_part)?;
    let room = parse_room(room_part);

    contiguous_runs(&slots)
        .into_iter()
        .map(|(start, end)| {
            TimeRange::new(start, end)
                .map(|range| ScheduleBlock {
                    day,
                    range,
                    room: room.clone(),
                })
                .map_err(|reason| ScheduleParseError::InvalidRange {
                    block: block.to_string(),
                    reason,
                })
        })
        .collect()
}

/// Build the entries a lecture contributes to a table when it is selected.
pub fn entries_for_lecture(lecture: &Lecture) -> Vec<ScheduleEntry> {
    parse_schedule(&lecture.schedule)
        .into_iter()
        .map(|block| ScheduleEntry::from_block(block, lecture.clone()))
        .collect()
}

fn parse_slots(block: &str, slot_part: &str) -> Result<BTreeSet<u8>, ScheduleParseError> {
    let mut slots = BTreeSet::new();
    for segment in slot_part.split(',').map(str::trim) {
        if segment.is_empty() {
            continue;
        }
        let (start, end) = match segment.split_once('~') {
            Some((start, end)) => (parse_slot(block, start)?, parse_slot(block, end)?),
            None => {
                let slot = parse_slot(block, segment)?;
                (slot, slot)
            }
        };
        if end < start {
            return Err(ScheduleParseError::InvalidRange {
                block: block.to_string(),
                reason: format!("end {} precedes start {}", end, start),
            });
        }
        slots.extend(start..=end);
    }

    if slots.is_empty() {
        return Err(ScheduleParseError::MissingSlots(block.to_string()));
    }
    Ok(slots)
}

fn parse_slot(block: &str, raw: &str) -> Result<u8, ScheduleParseError> {
    raw.trim()
        .parse()
        .map_err(|_| ScheduleParseError::InvalidSlot {
            block: block.to_string(),
            slot: raw.to_string(),
        })
}

fn parse_room(raw: &str) -> Option<String> {
    let room: String = raw.chars().filter(|c| *c != '(' && *c != ')').collect();
    let room = room.trim();
    (!room.is_empty()).then(|| room.to_string())
}

fn contiguous_runs(slots: &BTreeSet<u8>) -> Vec<(u8, u8)> {
    let mut runs: Vec<(u8, u8)> = Vec::new();
    for &slot in slots {
        match runs.last_mut() {
            Some((_, end)) if u16::from(*end) + 1 == u16::from(slot) => *end = slot,
            _ => runs.push((slot, slot)),
        }
    }
    runs
}
