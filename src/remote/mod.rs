//! Outbound HTTP: the published spreadsheet and the calendar webhook.

use reqwest::Client as HttpClient;
use std::fmt;

pub mod calendar;
pub mod sheet;

pub use calendar::{CalendarQuery, unwrap_calendar_response};

#[derive(Debug)]
pub enum SyncError {
    Http(reqwest::Error),
    Status(u16),
    Decode(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Http(err) => write!(f, "http error: {err}"),
            SyncError::Status(code) => write!(f, "unexpected status {code}"),
            SyncError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Endpoints the kiosk talks to. Cheap to clone.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: HttpClient,
    sheet_url: String,
    calendar_url: String,
}

impl RemoteClient {
    pub fn new(sheet_url: impl Into<String>, calendar_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            sheet_url: sheet_url.into(),
            calendar_url: calendar_url.into(),
        }
    }

    pub fn sheet_url(&self) -> &str {
        &self.sheet_url
    }

    pub fn calendar_url(&self) -> &str {
        &self.calendar_url
    }

    pub(crate) fn http(&self) -> &HttpClient {
        &self.http
    }
}
