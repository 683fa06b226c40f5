use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of weekday columns in the timetable, Sunday first.
pub const DAYS_PER_WEEK: u8 = 7;

pub const DAY_NAMES_ZH: [&str; 7] = [
    "星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六",
];

/// Day-of-week (0 = Sunday) to slot id to subject.
///
/// Serialized as `{"1": {"3": "國文"}}`. A missing entry means no class is
/// scheduled for that slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timetable {
    days: BTreeMap<u8, BTreeMap<String, String>>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self, day: u8, slot_id: &str) -> Option<&str> {
        self.days
            .get(&day)
            .and_then(|slots| slots.get(slot_id))
            .map(String::as_str)
    }

    /// Stores the value as given, including empty strings.
    pub fn set(&mut self, day: u8, slot_id: impl Into<String>, subject: impl Into<String>) {
        self.days
            .entry(day)
            .or_default()
            .insert(slot_id.into(), subject.into());
    }

    pub fn day(&self, day: u8) -> Option<&BTreeMap<String, String>> {
        self.days.get(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(BTreeMap::is_empty)
    }

    /// Total number of stored cells across all days.
    pub fn len(&self) -> usize {
        self.days.values().map(BTreeMap::len).sum()
    }
}
