use crate::slot::TimeSlot;
use crate::timetable::Timetable;
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const BREAK_PERIOD_NAME: &str = "休息";
pub const BREAK_LABEL: &str = "下課時間";
pub const FREE_PERIOD_LABEL: &str = "（空堂）";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodStatus {
    pub period_name: String,
    pub display_label: String,
    pub is_class_in_session: bool,
}

impl PeriodStatus {
    pub fn on_break() -> Self {
        Self {
            period_name: BREAK_PERIOD_NAME.to_string(),
            display_label: BREAK_LABEL.to_string(),
            is_class_in_session: false,
        }
    }
}

/// Works out which period `now` falls in. Seconds are ignored.
pub fn resolve_period(now: &NaiveDateTime, slots: &[TimeSlot], timetable: &Timetable) -> PeriodStatus {
    let day = now.weekday().num_days_from_sunday() as u8;
    let hhmm = format!("{:02}:{:02}", now.hour(), now.minute());
    resolve_period_at(day, &hhmm, slots, timetable)
}

/// `day` is 0 for Sunday; `hhmm` must be zero-padded.
///
/// The first slot in list order whose `[start, end)` range contains `hhmm` wins.
pub fn resolve_period_at(day: u8, hhmm: &str, slots: &[TimeSlot], timetable: &Timetable) -> PeriodStatus {
    let Some(slot) = slots.iter().find(|slot| slot.contains(hhmm)) else {
        return PeriodStatus::on_break();
    };

    match timetable.subject(day, &slot.id).filter(|s| !s.is_empty()) {
        Some(subject) => PeriodStatus {
            period_name: slot.name.clone(),
            display_label: subject.to_string(),
            is_class_in_session: true,
        },
        None => PeriodStatus {
            period_name: slot.name.clone(),
            display_label: FREE_PERIOD_LABEL.to_string(),
            is_class_in_session: false,
        },
    }
}
