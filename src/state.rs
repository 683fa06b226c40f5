use crate::broadcast::{BroadcastTemplate, QuickAction, TemplatePatch, travel_broadcast};
use crate::parser::ParsedSchedule;
use crate::persistence::Settings;
use crate::slot::{TimeSlot, is_valid_hhmm};
use crate::timetable::{DAYS_PER_WEEK, Timetable};
use chrono::Utc;
use std::fmt;

pub const CALENDAR_LOADING_TEXT: &str = "正在獲取今日校務行事曆...";
pub const CALENDAR_REFRESHING_TEXT: &str = "正在同步最新行程...";
pub const CALENDAR_FAILURE_TEXT: &str = "目前無法取得校務行事曆內容，請稍後點擊重試。";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    UnknownTemplate(String),
    UnknownSlot(String),
    InvalidDay(u8),
    InvalidTime(String),
    BlankDestination,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::UnknownTemplate(id) => write!(f, "template {id} not found"),
            StateError::UnknownSlot(id) => write!(f, "slot {id} not found"),
            StateError::InvalidDay(day) => {
                write!(f, "day {day} is out of range (0 = Sunday .. 6 = Saturday)")
            }
            StateError::InvalidTime(value) => write!(f, "time '{value}' is not a valid HH:MM value"),
            StateError::BlankDestination => write!(f, "travel destination must not be blank"),
        }
    }
}

impl std::error::Error for StateError {}

/// Everything the kiosk shows, owned by the controller.
///
/// `slots`, `timetable` and `templates` are persisted; the rest lives only as
/// long as the process.
#[derive(Debug, Clone)]
pub struct AppState {
    slots: Vec<TimeSlot>,
    timetable: Timetable,
    templates: Vec<BroadcastTemplate>,
    broadcast: Option<BroadcastTemplate>,
    calendar_text: String,
    calendar_in_flight: bool,
    /// Spreadsheet syncs currently running; they are not exclusive.
    syncs_running: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_settings(Settings::default())
    }
}

impl AppState {
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            slots: settings.slots,
            timetable: settings.timetable,
            templates: settings.templates,
            broadcast: None,
            calendar_text: CALENDAR_LOADING_TEXT.to_string(),
            calendar_in_flight: false,
            syncs_running: 0,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            slots: self.slots.clone(),
            timetable: self.timetable.clone(),
            templates: self.templates.clone(),
        }
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn templates(&self) -> &[BroadcastTemplate] {
        &self.templates
    }

    pub fn broadcast(&self) -> Option<&BroadcastTemplate> {
        self.broadcast.as_ref()
    }

    pub fn calendar_text(&self) -> &str {
        &self.calendar_text
    }

    pub fn calendar_in_flight(&self) -> bool {
        self.calendar_in_flight
    }

    pub fn syncing(&self) -> bool {
        self.syncs_running > 0
    }

    /// Replaces slots and timetable together. Returns false, leaving both
    /// untouched, when the parse produced no slots.
    pub fn apply_schedule(&mut self, parsed: ParsedSchedule) -> bool {
        if parsed.is_empty() {
            return false;
        }
        self.slots = parsed.slots;
        self.timetable = parsed.timetable;
        true
    }

    pub fn set_timetable_cell(
        &mut self,
        day: u8,
        slot_id: &str,
        subject: impl Into<String>,
    ) -> Result<(), StateError> {
        if day >= DAYS_PER_WEEK {
            return Err(StateError::InvalidDay(day));
        }
        if !self.slots.iter().any(|slot| slot.id == slot_id) {
            return Err(StateError::UnknownSlot(slot_id.to_string()));
        }
        self.timetable.set(day, slot_id, subject);
        Ok(())
    }

    pub fn set_slot_times(&mut self, slot_id: &str, start: &str, end: &str) -> Result<&TimeSlot, StateError> {
        for value in [start, end] {
            if !is_valid_hhmm(value) {
                return Err(StateError::InvalidTime(value.to_string()));
            }
        }
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.id == slot_id)
            .ok_or_else(|| StateError::UnknownSlot(slot_id.to_string()))?;
        slot.start = start.to_string();
        slot.end = end.to_string();
        Ok(&*slot)
    }

    pub fn update_template(
        &mut self,
        template_id: &str,
        patch: &TemplatePatch,
    ) -> Result<&BroadcastTemplate, StateError> {
        let template = self
            .templates
            .iter_mut()
            .find(|t| t.id == template_id)
            .ok_or_else(|| StateError::UnknownTemplate(template_id.to_string()))?;
        template.apply(patch);
        Ok(&*template)
    }

    pub fn publish_template(&mut self, template_id: &str) -> Result<&BroadcastTemplate, StateError> {
        let template = self
            .templates
            .iter()
            .find(|t| t.id == template_id)
            .ok_or_else(|| StateError::UnknownTemplate(template_id.to_string()))?;
        let broadcast = template.publish_as(fresh_broadcast_id());
        Ok(&*self.broadcast.insert(broadcast))
    }

    pub fn publish_quick_action(&mut self, action: QuickAction) -> &BroadcastTemplate {
        self.broadcast.insert(action.to_broadcast(fresh_broadcast_id()))
    }

    pub fn publish_travel(&mut self, destination: &str) -> Result<&BroadcastTemplate, StateError> {
        let broadcast =
            travel_broadcast(fresh_broadcast_id(), destination).ok_or(StateError::BlankDestination)?;
        Ok(&*self.broadcast.insert(broadcast))
    }

    /// Returns the broadcast that was showing, if any.
    pub fn dismiss_broadcast(&mut self) -> Option<BroadcastTemplate> {
        self.broadcast.take()
    }

    /// Marks a calendar fetch as started. Returns false when one is already
    /// running, in which case the caller must not issue another request.
    pub fn begin_calendar_fetch(&mut self) -> bool {
        if self.calendar_in_flight {
            return false;
        }
        self.calendar_in_flight = true;
        self.calendar_text = CALENDAR_REFRESHING_TEXT.to_string();
        true
    }

    pub fn finish_calendar_fetch(&mut self, text: impl Into<String>) {
        self.calendar_in_flight = false;
        self.calendar_text = text.into();
    }

    pub fn begin_sync(&mut self) {
        self.syncs_running += 1;
    }

    pub fn finish_sync(&mut self) {
        self.syncs_running = self.syncs_running.saturating_sub(1);
    }
}

fn fresh_broadcast_id() -> String {
    Utc::now().timestamp_millis().to_string()
}
