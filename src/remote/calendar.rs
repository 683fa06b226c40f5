use super::{RemoteClient, SyncError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

pub const CALENDAR_ACTION: &str = "query_calendar";

pub const CALENDAR_PROMPT: &str = "請查詢我的行事曆，給我今天、明天與後天的全部行程。輸出的結果請分為三行呈現：\n今日行程：\n明日行程：\n後天行程：";

/// Body posted to the calendar webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarQuery {
    pub action: String,
    pub query: String,
    /// ISO-8601 timestamp of the request.
    pub time: String,
}

impl CalendarQuery {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            action: CALENDAR_ACTION.to_string(),
            query: CALENDAR_PROMPT.to_string(),
            time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

const ARRAY_ITEM_FIELDS: [&str; 3] = ["output", "text", "message"];
const OBJECT_FIELDS: [&str; 4] = ["output", "text", "message", "result"];

/// Pulls the agenda text out of whatever shape the webhook answered with.
///
/// A string is used as is. For an array the first element is inspected for
/// `output`, `text`, `message`; for an object `output`, `text`, `message`,
/// `result`. When no field carries a value the element itself is returned as
/// JSON text.
pub fn unwrap_calendar_response(body: &Value) -> Result<String, SyncError> {
    match body {
        Value::String(text) => Ok(text.clone()),
        Value::Array(items) => {
            let first = items
                .first()
                .ok_or_else(|| SyncError::Decode("webhook returned an empty array".into()))?;
            Ok(first_present(first, &ARRAY_ITEM_FIELDS).unwrap_or_else(|| first.to_string()))
        }
        Value::Null => Err(SyncError::Decode("webhook returned null".into())),
        other => Ok(first_present(other, &OBJECT_FIELDS).unwrap_or_else(|| other.to_string())),
    }
}

fn first_present(value: &Value, fields: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    fields
        .iter()
        .filter_map(|field| object.get(*field))
        .find(|v| is_truthy(v))
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl RemoteClient {
    /// Asks the webhook for the agenda of today and the next two days.
    pub async fn fetch_calendar_text(&self, now: DateTime<Utc>) -> Result<String, SyncError> {
        debug!(url = %self.calendar_url(), "querying calendar webhook");
        let response = self
            .http()
            .post(self.calendar_url())
            .json(&CalendarQuery::at(now))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status.as_u16()));
        }
        let body: Value = response.json().await?;
        unwrap_calendar_response(&body)
    }
}
