use chrono::{NaiveDate, TimeZone, Utc};
use classroom_signage::SyncError;
use classroom_signage::clock::is_daily_refresh_instant;
use classroom_signage::remote::calendar::{CALENDAR_ACTION, CALENDAR_PROMPT};
use classroom_signage::remote::{CalendarQuery, unwrap_calendar_response};
use serde_json::json;

#[test]
fn plain_string_body_is_used_verbatim() {
    let text = unwrap_calendar_response(&json!("今日行程：朝會")).unwrap();
    assert_eq!(text, "今日行程：朝會");
}

#[test]
fn object_fields_are_checked_in_order() {
    assert_eq!(
        unwrap_calendar_response(&json!({ "output": "A", "text": "B" })).unwrap(),
        "A"
    );
    assert_eq!(
        unwrap_calendar_response(&json!({ "text": "B", "message": "C" })).unwrap(),
        "B"
    );
    assert_eq!(
        unwrap_calendar_response(&json!({ "result": "R" })).unwrap(),
        "R"
    );
    // Empty strings do not count as a value.
    assert_eq!(
        unwrap_calendar_response(&json!({ "output": "", "message": "C" })).unwrap(),
        "C"
    );
}

#[test]
fn array_uses_first_element() {
    assert_eq!(
        unwrap_calendar_response(&json!([{ "message": "D" }, { "output": "E" }])).unwrap(),
        "D"
    );
    // `result` is only looked at on objects.
    assert_eq!(
        unwrap_calendar_response(&json!([{ "result": "R" }])).unwrap(),
        r#"{"result":"R"}"#
    );
}

#[test]
fn unrecognised_object_is_dumped_as_json() {
    let text = unwrap_calendar_response(&json!({ "agenda": ["朝會"] })).unwrap();
    assert_eq!(text, r#"{"agenda":["朝會"]}"#);
}

#[test]
fn null_and_empty_array_are_decode_failures() {
    assert!(matches!(
        unwrap_calendar_response(&json!(null)),
        Err(SyncError::Decode(_))
    ));
    assert!(matches!(
        unwrap_calendar_response(&json!([])),
        Err(SyncError::Decode(_))
    ));
}

#[test]
fn query_carries_action_prompt_and_timestamp() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 5, 9).unwrap();
    let query = CalendarQuery::at(now);

    assert_eq!(query.action, CALENDAR_ACTION);
    assert_eq!(query.query, CALENDAR_PROMPT);
    assert_eq!(query.time, "2026-03-02T00:05:09.000Z");

    let body = serde_json::to_value(&query).unwrap();
    assert_eq!(body["action"], "query_calendar");
    assert!(body["query"].as_str().unwrap().contains("後天行程："));
}

#[test]
fn daily_refresh_fires_only_at_three_sharp() {
    let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    assert!(is_daily_refresh_instant(&day.and_hms_opt(3, 0, 0).unwrap()));
    assert!(!is_daily_refresh_instant(&day.and_hms_opt(3, 0, 1).unwrap()));
    assert!(!is_daily_refresh_instant(&day.and_hms_opt(15, 0, 0).unwrap()));
    assert!(!is_daily_refresh_instant(&day.and_hms_opt(2, 59, 59).unwrap()));
}
