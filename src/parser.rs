use crate::slot::TimeSlot;
use crate::timetable::{DAYS_PER_WEEK, Timetable};
use regex::Regex;
use std::sync::LazyLock;

/// `8:10~9:00`, `08：10-09：00`, `8:10～9:00` ...
static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2}[:：][0-9]{2})\s*[~～-]\s*([0-9]{1,2}[:：][0-9]{2})")
        .expect("time range pattern is valid")
});

static LEADING_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^0-9]+").expect("slot name pattern is valid"));

const UNSET_TIME: &str = "00:00";

/// Result of reading a timetable spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSchedule {
    pub slots: Vec<TimeSlot>,
    pub timetable: Timetable,
}

impl ParsedSchedule {
    /// A schedule without slots is a failed parse and must not replace stored state.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Turns a decoded spreadsheet into slots and a timetable.
///
/// The first row is a header. Each following row describes one period: the
/// first cell holds the period label and time range (for example
/// `第一節 8:10~9:00`), the next seven cells hold the subjects from Sunday to
/// Saturday. Rows with an empty first cell are skipped and do not consume an
/// id, but a fallback name (`第N節`) still counts every data row.
pub fn parse_schedule_grid<R, C>(rows: &[R]) -> ParsedSchedule
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut parsed = ParsedSchedule::default();

    for (row_index, row) in rows.iter().skip(1).enumerate() {
        let cells = row.as_ref();
        let Some(first) = cells.first() else {
            continue;
        };
        let label: String = first
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if label.is_empty() {
            continue;
        }

        let slot_id = (parsed.slots.len() + 1).to_string();
        let name = LEADING_NAME_RE
            .find(&label)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| format!("第{}節", row_index + 1));
        let (start, end) = match TIME_RANGE_RE.captures(&label) {
            Some(caps) => (normalize_time(&caps[1]), normalize_time(&caps[2])),
            None => (UNSET_TIME.to_string(), UNSET_TIME.to_string()),
        };

        for day in 0..DAYS_PER_WEEK {
            let Some(cell) = cells.get(usize::from(day) + 1) else {
                break;
            };
            let subject = cell.as_ref().trim();
            if !subject.is_empty() {
                parsed.timetable.set(day, slot_id.clone(), subject);
            }
        }

        parsed.slots.push(TimeSlot::new(slot_id, name, start, end));
    }

    parsed
}

fn normalize_time(raw: &str) -> String {
    let time = raw.replacen('：', ":", 1);
    format!("{time:0>5}")
}
