//! Per-table lecture colors.

use std::collections::HashMap;

use crate::models::ScheduleEntry;

/// Background colors, cycled in order of first appearance.
pub const LECTURE_COLORS: [&str; 6] = ["#fdd", "#ffd", "#dff", "#ddf", "#fdf", "#dfd"];

/// Color assignment for the lectures shown in one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LecturePalette {
    colors: HashMap<String, &'static str>,
}

impl LecturePalette {
    /// Assign colors to the distinct lecture ids of `entries`.
    ///
    /// Every block of the same lecture gets the same color.
    pub fn for_entries<'a, I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a E>,
        E: AsRef<ScheduleEntry> + 'a,
    {
        let mut colors = HashMap::new();
        for entry in entries {
            let next = LECTURE_COLORS[colors.len() % LECTURE_COLORS.len()];
            colors
                .entry(entry.as_ref().lecture.id.clone())
                .or_insert(next);
        }
        Self { colors }
    }

    /// Color for a lecture id, or the first color for ids not in the table.
    pub fn color_for(&self, lecture_id: &str) -> &'static str {
        self.colors
            .get(lecture_id)
            .copied()
            .unwrap_or(LECTURE_COLORS[0])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
