use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A named period of the school day covering the half-open range `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Unique identifier, also the key used by the timetable.
    pub id: String,
    /// Display label such as "第一節".
    pub name: String,
    /// Zero-padded "HH:MM".
    pub start: String,
    /// Zero-padded "HH:MM", exclusive.
    pub end: String,
}

impl TimeSlot {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// `hhmm` must be zero-padded so that string ordering matches time ordering.
    pub fn contains(&self, hhmm: &str) -> bool {
        self.start.as_str() <= hhmm && hhmm < self.end.as_str()
    }
}

const DEFAULT_PERIODS: [(&str, &str, &str); 13] = [
    ("第一節", "08:10", "09:00"),
    ("第二節", "09:10", "10:00"),
    ("第三節", "10:20", "11:10"),
    ("第四節", "11:20", "12:10"),
    ("第五節", "12:20", "13:10"),
    ("第六節", "13:20", "14:10"),
    ("第七節", "14:20", "15:10"),
    ("第八節", "15:30", "16:20"),
    ("第九節", "16:30", "17:20"),
    ("第十節", "17:30", "18:20"),
    ("第A節", "18:25", "19:15"),
    ("第B節", "19:20", "20:10"),
    ("第C節", "20:15", "21:05"),
];

/// The bell schedule used until a spreadsheet has been imported.
pub fn default_slots() -> Vec<TimeSlot> {
    DEFAULT_PERIODS
        .iter()
        .enumerate()
        .map(|(idx, (name, start, end))| TimeSlot::new((idx + 1).to_string(), *name, *start, *end))
        .collect()
}

/// Returns true for a zero-padded 24-hour "HH:MM" value.
pub fn is_valid_hhmm(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M")
        .is_ok_and(|time| time.format("%H:%M").to_string() == value)
}
