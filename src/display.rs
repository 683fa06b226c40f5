use crate::broadcast::BroadcastTemplate;
use crate::resolver::{PeriodStatus, resolve_period};
use crate::state::AppState;
use crate::timetable::DAY_NAMES_ZH;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Offset between the Gregorian year and the Republic of China (Minguo) year.
const MINGUO_EPOCH_YEAR: i32 = 1911;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayContent {
    Period { status: PeriodStatus },
    Broadcast { broadcast: BroadcastTemplate },
}

/// What the kiosk page renders for one clock tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub time_text: String,
    pub date_text: String,
    pub content: DisplayContent,
    pub calendar_text: String,
    pub calendar_refreshing: bool,
    pub syncing: bool,
}

impl DisplaySnapshot {
    /// An active broadcast replaces the period display.
    pub fn build(state: &AppState, now: &NaiveDateTime) -> Self {
        let content = match state.broadcast() {
            Some(broadcast) => DisplayContent::Broadcast {
                broadcast: broadcast.clone(),
            },
            None => DisplayContent::Period {
                status: resolve_period(now, state.slots(), state.timetable()),
            },
        };
        Self {
            time_text: format_clock(now),
            date_text: format_minguo_date(now),
            content,
            calendar_text: state.calendar_text().to_string(),
            calendar_refreshing: state.calendar_in_flight(),
            syncing: state.syncing(),
        }
    }
}

pub fn format_clock(now: &NaiveDateTime) -> String {
    now.format("%H:%M:%S").to_string()
}

/// `民國115年03月02日 星期一`
pub fn format_minguo_date(now: &NaiveDateTime) -> String {
    let weekday = DAY_NAMES_ZH[now.weekday().num_days_from_sunday() as usize];
    format!(
        "民國{}年{:02}月{:02}日 {}",
        now.year() - MINGUO_EPOCH_YEAR,
        now.month(),
        now.day(),
        weekday
    )
}
