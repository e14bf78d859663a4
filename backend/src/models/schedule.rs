//! Weekday labels, time slots and placed schedule entries.
//!
//! A [`ScheduleEntry`] is one lecture occupying a contiguous run of time slots on
//! a single day. Both the day and the range are validated on construction so the
//! rest of the crate can rely on them without re-checking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lecture::Lecture;

/// First valid time-slot index.
pub const FIRST_TIME_SLOT: u8 = 1;

/// Last valid time-slot index.
pub const LAST_TIME_SLOT: u8 = 24;

const TIME_SLOT_LABELS: [&str; 24] = [
    "09:00~09:30",
    "09:30~10:00",
    "10:00~10:30",
    "10:30~11:00",
    "11:00~11:30",
    "11:30~12:00",
    "12:00~12:30",
    "12:30~13:00",
    "13:00~13:30",
    "13:30~14:00",
    "14:00~14:30",
    "14:30~15:00",
    "15:00~15:30",
    "15:30~16:00",
    "16:00~16:30",
    "16:30~17:00",
    "17:00~17:30",
    "17:30~18:00",
    "18:00~18:50",
    "18:55~19:45",
    "19:50~20:40",
    "20:45~21:35",
    "21:40~22:30",
    "22:35~23:25",
];

/// Clock label for a time slot, e.g. `"09:00~09:30"` for slot 1.
pub fn time_slot_label(slot: u8) -> Option<&'static str> {
    if !(FIRST_TIME_SLOT..=LAST_TIME_SLOT).contains(&slot) {
        return None;
    }
    TIME_SLOT_LABELS.get(usize::from(slot - FIRST_TIME_SLOT)).copied()
}

/// Day of the teaching week, in grid column order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    /// All days in column order.
    pub const ALL: [Day; 6] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri, Day::Sat];

    /// Zero-based column index.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at a column index, `None` outside the label set.
    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    /// Day shifted by `delta` columns. Never wraps.
    pub fn offset(self, delta: i32) -> Option<Day> {
        let target = self.index() as i64 + i64::from(delta);
        usize::try_from(target).ok().and_then(Day::from_index)
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
        }
    }

    /// Single-character label used by the lecture catalog.
    pub fn catalog_label(self) -> char {
        match self {
            Day::Mon => '월',
            Day::Tue => '화',
            Day::Wed => '수',
            Day::Thu => '목',
            Day::Fri => '금',
            Day::Sat => '토',
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = String;

    /// Accepts English labels (any case) and the catalog's Korean labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Day::ALL
            .iter()
            .copied()
            .find(|day| {
                day.label().eq_ignore_ascii_case(trimmed)
                    || trimmed.chars().eq(std::iter::once(day.catalog_label()))
            })
            .ok_or_else(|| format!("Unknown day label: {}", s))
    }
}

/// Sorted, contiguous, nonempty run of time-slot indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct TimeRange {
    start: u8,
    len: u8,
}

impl TimeRange {
    /// Inclusive run `start..=end`. Both ends must be valid slots.
    pub fn new(start: u8, end: u8) -> Result<Self, String> {
        if end < start {
            return Err(format!("Time range end {} precedes start {}", end, start));
        }
        for slot in [start, end] {
            if !(FIRST_TIME_SLOT..=LAST_TIME_SLOT).contains(&slot) {
                return Err(format!(
                    "Time slot {} outside {}..={}",
                    slot, FIRST_TIME_SLOT, LAST_TIME_SLOT
                ));
            }
        }
        Ok(Self {
            start,
            len: end - start + 1,
        })
    }

    pub fn single(slot: u8) -> Result<Self, String> {
        Self::new(slot, slot)
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.start + self.len - 1
    }

    /// Number of slots covered (the lecture's duration).
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, slot: u8) -> bool {
        (self.start..=self.end()).contains(&slot)
    }

    pub fn slots(&self) -> impl Iterator<Item = u8> {
        self.start..=self.end()
    }

    /// Range moved by `delta` slots, `None` if any slot would leave the grid.
    pub fn shifted(&self, delta: i32) -> Option<TimeRange> {
        let start = i32::from(self.start).checked_add(delta)?;
        let end = i32::from(self.end()).checked_add(delta)?;
        let start = u8::try_from(start).ok()?;
        let end = u8::try_from(end).ok()?;
        TimeRange::new(start, end).ok()
    }
}

impl TryFrom<Vec<u8>> for TimeRange {
    type Error = String;

    fn try_from(slots: Vec<u8>) -> Result<Self, Self::Error> {
        let (first, last) = match (slots.first(), slots.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err("Time range must not be empty".to_string()),
        };
        let contiguous = slots
            .windows(2)
            .all(|pair| u16::from(pair[0]) + 1 == u16::from(pair[1]));
        if !contiguous {
            return Err(format!("Time range {:?} is not contiguous", slots));
        }
        TimeRange::new(first, last)
    }
}

impl From<TimeRange> for Vec<u8> {
    fn from(range: TimeRange) -> Self {
        range.slots().collect()
    }
}

/// One decoded block of a lecture's schedule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleBlock {
    pub day: Day,
    pub range: TimeRange,
    pub room: Option<String>,
}

/// A lecture placed in a table.
///
/// The lecture is an embedded copy, so relocating an entry never touches the
/// catalog record it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: Day,
    pub range: TimeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    pub lecture: Lecture,
}

impl ScheduleEntry {
    pub fn from_block(block: ScheduleBlock, lecture: Lecture) -> Self {
        Self {
            day: block.day,
            range: block.range,
            room: block.room,
            lecture,
        }
    }

    /// True when this entry covers `time` on `day`.
    pub fn occupies(&self, day: Day, time: u8) -> bool {
        self.day == day && self.range.contains(time)
    }

    /// Copy of this entry at a new position, room and lecture unchanged.
    pub fn moved_to(&self, day: Day, range: TimeRange) -> Self {
        Self {
            day,
            range,
            room: self.room.clone(),
            lecture: self.lecture.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_offset_does_not_wrap() {
        assert_eq!(Day::Mon.offset(1), Some(Day::Tue));
        assert_eq!(Day::Sat.offset(-5), Some(Day::Mon));
        assert_eq!(Day::Mon.offset(-1), None);
        assert_eq!(Day::Sat.offset(1), None);
    }

    #[test]
    fn test_day_parses_english_and_catalog_labels() {
        assert_eq!("Mon".parse::<Day>().unwrap(), Day::Mon);
        assert_eq!("fri".parse::<Day>().unwrap(), Day::Fri);
        assert_eq!("수".parse::<Day>().unwrap(), Day::Wed);
        assert!("Sun".parse::<Day>().is_err());
        assert!("".parse::<Day>().is_err());
    }

    #[test]
    fn test_time_range_rejects_invalid_bounds() {
        assert!(TimeRange::new(3, 2).is_err());
        assert!(TimeRange::new(0, 2).is_err());
        assert!(TimeRange::new(23, 25).is_err());

        let range = TimeRange::new(2, 4).unwrap();
        assert_eq!(range.len(), 3);
        assert_eq!(range.slots().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_time_range_shift_stays_on_grid() {
        let range = TimeRange::new(2, 3).unwrap();
        assert_eq!(range.shifted(2), Some(TimeRange::new(4, 5).unwrap()));
        assert_eq!(range.shifted(-1), Some(TimeRange::new(1, 2).unwrap()));
        assert_eq!(range.shifted(-2), None);
        assert_eq!(TimeRange::new(23, 24).unwrap().shifted(1), None);
    }

    #[test]
    fn test_time_range_serializes_as_slot_list() {
        let range = TimeRange::new(5, 7).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "[5,6,7]");

        let back: TimeRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
        assert!(serde_json::from_str::<TimeRange>("[1,3]").is_err());
        assert!(serde_json::from_str::<TimeRange>("[]").is_err());
    }

    #[test]
    fn test_time_slot_labels() {
        assert_eq!(time_slot_label(1), Some("09:00~09:30"));
        assert_eq!(time_slot_label(19), Some("18:00~18:50"));
        assert_eq!(time_slot_label(24), Some("22:35~23:25"));
        assert_eq!(time_slot_label(0), None);
        assert_eq!(time_slot_label(25), None);
    }
}
