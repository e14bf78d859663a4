//! Lecture catalog records.

use serde::{Deserialize, Deserializer, Serialize};

/// Delimiter the catalog embeds in multi-value `major` and `schedule` strings.
pub const CATALOG_DELIMITER: &str = "<p>";

/// One lecture as published in the catalog.
///
/// `major` and `schedule` are kept byte-for-byte; splitting them is left to
/// [`major_display_segments`] and the schedule-string parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_credits")]
    pub credits: Option<u8>,
    pub grade: u8,
    #[serde(default)]
    pub major: String,
    #[serde(default)]
    pub schedule: String,
}

impl Lecture {
    /// Display segments of this lecture's major.
    pub fn major_segments(&self) -> Vec<String> {
        major_display_segments(&self.major)
    }
}

/// Split a catalog major into its display segments, dropping empty pieces.
pub fn major_display_segments(major: &str) -> Vec<String> {
    major
        .split(CATALOG_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Short label for a major: its last display segment.
pub fn major_short_label(major: &str) -> &str {
    major
        .rsplit(CATALOG_DELIMITER)
        .map(str::trim)
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// Parse a credit value from its catalog form.
///
/// The catalog publishes credits as a number or as a string whose leading
/// digits are the credit count (`"3"`, `"3(2)"`). Anything else is unset.
pub fn parse_credits(raw: &str) -> Option<u8> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn deserialize_credits<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCredits {
        Number(f64),
        Text(String),
    }

    let raw = Option::<RawCredits>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCredits::Number(n)) if n >= 0.0 && n <= f64::from(u8::MAX) && n.fract() == 0.0 => {
            Some(n as u8)
        }
        Some(RawCredits::Number(_)) => None,
        Some(RawCredits::Text(text)) => parse_credits(&text),
        None => None,
    })
}
