use chrono::{NaiveDate, NaiveDateTime};
use classroom_signage::display::{format_clock, format_minguo_date};
use classroom_signage::state::CALENDAR_LOADING_TEXT;
use classroom_signage::{AppState, DisplayContent, DisplaySnapshot, QuickAction};

fn monday_morning() -> NaiveDateTime {
    // 2026-03-02 is a Monday.
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(8, 15, 7)
        .unwrap()
}

#[test]
fn date_uses_minguo_year_and_weekday() {
    assert_eq!(format_minguo_date(&monday_morning()), "民國115年03月02日 星期一");

    let sunday = NaiveDate::from_ymd_opt(2025, 1, 5)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(format_minguo_date(&sunday), "民國114年01月05日 星期日");
}

#[test]
fn clock_is_zero_padded_24_hour() {
    assert_eq!(format_clock(&monday_morning()), "08:15:07");
    let evening = NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(21, 4, 0)
        .unwrap();
    assert_eq!(format_clock(&evening), "21:04:00");
}

#[test]
fn period_is_shown_without_broadcast() {
    let mut state = AppState::default();
    state.set_timetable_cell(1, "1", "數學").unwrap();

    let snapshot = DisplaySnapshot::build(&state, &monday_morning());

    match snapshot.content {
        DisplayContent::Period { status } => {
            assert_eq!(status.period_name, "第一節");
            assert_eq!(status.display_label, "數學");
            assert!(status.is_class_in_session);
        }
        other => panic!("expected period, got {other:?}"),
    }
    assert_eq!(snapshot.calendar_text, CALENDAR_LOADING_TEXT);
    assert!(!snapshot.calendar_refreshing);
    assert!(!snapshot.syncing);
}

#[test]
fn broadcast_replaces_period_until_dismissed() {
    let mut state = AppState::default();
    state.publish_quick_action(QuickAction::Home);

    let snapshot = DisplaySnapshot::build(&state, &monday_morning());
    match &snapshot.content {
        DisplayContent::Broadcast { broadcast } => assert_eq!(broadcast.title, "回家了"),
        other => panic!("expected broadcast, got {other:?}"),
    }
    assert_eq!(snapshot.time_text, "08:15:07");

    state.dismiss_broadcast();
    let snapshot = DisplaySnapshot::build(&state, &monday_morning());
    assert!(matches!(snapshot.content, DisplayContent::Period { .. }));
}

#[test]
fn snapshot_serializes_with_mode_tag() {
    let state = AppState::default();
    let snapshot = DisplaySnapshot::build(&state, &monday_morning());
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["content"]["mode"], "period");
    assert_eq!(json["content"]["status"]["display_label"], "（空堂）");
    assert_eq!(json["date_text"], "民國115年03月02日 星期一");
}
