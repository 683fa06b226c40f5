use crate::broadcast::{BroadcastTemplate, QuickAction, TemplatePatch};
use crate::display::DisplaySnapshot;
use crate::grid::{Grid, grid_from_xlsx};
use crate::parser::parse_schedule_grid;
use crate::persistence::{Settings, SettingsStore, load_settings, save_settings};
use crate::remote::RemoteClient;
use crate::slot::TimeSlot;
use crate::state::{AppState, CALENDAR_FAILURE_TEXT, StateError};
use chrono::{NaiveDateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

pub const SYNC_FAILURE_NOTICE: &str = "同步 Google 試算表失敗，請檢查網路連線或權限設定。";
pub const NO_SLOTS_NOTICE: &str = "試算表中沒有可辨識的節次，課表維持不變。";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScheduleOutcome {
    Updated { slot_count: usize },
    /// The source parsed to zero slots; stored state was kept.
    NoSlots,
    Failed { message: String },
}

/// Result of a spreadsheet sync or file import, with the message the user
/// should see, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    #[serde(flatten)]
    pub outcome: ScheduleOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl ScheduleReport {
    pub fn is_updated(&self) -> bool {
        matches!(self.outcome, ScheduleOutcome::Updated { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarRefresh {
    Updated,
    /// The fallback text is now displayed.
    Failed,
    /// Another fetch was still running; nothing was sent.
    AlreadyRunning,
}

/// Owns the kiosk state and routes every change through the settings store.
#[derive(Clone)]
pub struct Kiosk {
    state: Arc<RwLock<AppState>>,
    store: Arc<dyn SettingsStore>,
    remote: RemoteClient,
}

impl Kiosk {
    pub fn open(store: Arc<dyn SettingsStore>, remote: RemoteClient) -> Self {
        let settings = load_settings(store.as_ref());
        info!(
            slots = settings.slots.len(),
            timetable_cells = settings.timetable.len(),
            templates = settings.templates.len(),
            "settings loaded"
        );
        Self {
            state: Arc::new(RwLock::new(AppState::from_settings(settings))),
            store,
            remote,
        }
    }

    pub fn snapshot(&self, now: &NaiveDateTime) -> DisplaySnapshot {
        DisplaySnapshot::build(&self.state.read(), now)
    }

    pub fn settings(&self) -> Settings {
        self.state.read().settings()
    }

    pub fn templates(&self) -> Vec<BroadcastTemplate> {
        self.state.read().templates().to_vec()
    }

    pub fn broadcast(&self) -> Option<BroadcastTemplate> {
        self.state.read().broadcast().cloned()
    }

    /// Runs `change` on the state and saves the persisted records while the
    /// lock is still held, so saves land in the order the changes happened.
    fn update_settings<T>(&self, change: impl FnOnce(&mut AppState) -> T) -> T {
        let mut state = self.state.write();
        let result = change(&mut *state);
        if let Err(err) = save_settings(self.store.as_ref(), &state.settings()) {
            error!(error = %err, "failed to save settings");
        }
        result
    }

    pub fn set_timetable_cell(&self, day: u8, slot_id: &str, subject: &str) -> Result<(), StateError> {
        self.update_settings(|state| state.set_timetable_cell(day, slot_id, subject))
    }

    pub fn set_slot_times(&self, slot_id: &str, start: &str, end: &str) -> Result<TimeSlot, StateError> {
        self.update_settings(|state| state.set_slot_times(slot_id, start, end).cloned())
    }

    pub fn update_template(
        &self,
        template_id: &str,
        patch: &TemplatePatch,
    ) -> Result<BroadcastTemplate, StateError> {
        self.update_settings(|state| state.update_template(template_id, patch).cloned())
    }

    pub fn publish_template(&self, template_id: &str) -> Result<BroadcastTemplate, StateError> {
        let mut state = self.state.write();
        let broadcast = state.publish_template(template_id)?.clone();
        info!(title = %broadcast.title, "broadcast published");
        Ok(broadcast)
    }

    pub fn publish_quick_action(&self, action: QuickAction) -> BroadcastTemplate {
        let mut state = self.state.write();
        let broadcast = state.publish_quick_action(action).clone();
        info!(title = %broadcast.title, "quick action published");
        broadcast
    }

    pub fn publish_travel(&self, destination: &str) -> Result<BroadcastTemplate, StateError> {
        let mut state = self.state.write();
        let broadcast = state.publish_travel(destination)?.clone();
        info!(title = %broadcast.title, "travel notice published");
        Ok(broadcast)
    }

    pub fn dismiss_broadcast(&self) -> Option<BroadcastTemplate> {
        self.state.write().dismiss_broadcast()
    }

    /// Parses `grid` and, when it yields at least one slot, replaces the
    /// stored slots and timetable in one step.
    pub fn apply_grid(&self, grid: &Grid) -> ScheduleOutcome {
        let parsed = parse_schedule_grid(grid);
        let slot_count = parsed.slot_count();
        let applied = self.update_settings(|state| state.apply_schedule(parsed));
        if applied {
            ScheduleOutcome::Updated { slot_count }
        } else {
            ScheduleOutcome::NoSlots
        }
    }

    /// Pulls the published spreadsheet. With `notify_on_failure` unset the
    /// report never carries a notice; failures are only logged.
    pub async fn sync_remote_schedule(&self, notify_on_failure: bool) -> ScheduleReport {
        self.state.write().begin_sync();
        let fetched = self.remote.fetch_schedule_grid().await;
        let outcome = match fetched {
            Ok(grid) => self.apply_grid(&grid),
            Err(err) => {
                error!(error = %err, "spreadsheet sync failed");
                ScheduleOutcome::Failed {
                    message: err.to_string(),
                }
            }
        };
        self.state.write().finish_sync();

        let notice = match &outcome {
            ScheduleOutcome::Updated { slot_count } => {
                info!(slot_count, "spreadsheet sync applied");
                None
            }
            ScheduleOutcome::NoSlots => {
                warn!("spreadsheet contained no slots, keeping current schedule");
                notify_on_failure.then(|| NO_SLOTS_NOTICE.to_string())
            }
            ScheduleOutcome::Failed { .. } => {
                notify_on_failure.then(|| SYNC_FAILURE_NOTICE.to_string())
            }
        };
        ScheduleReport { outcome, notice }
    }

    /// Imports an uploaded `.xlsx` workbook. Always reports back to the user.
    pub fn import_workbook(&self, bytes: &[u8]) -> ScheduleReport {
        let outcome = match grid_from_xlsx(bytes) {
            Ok(grid) => self.apply_grid(&grid),
            Err(err) => {
                warn!(error = %err, "workbook import failed");
                ScheduleOutcome::Failed {
                    message: err.to_string(),
                }
            }
        };
        let notice = match &outcome {
            ScheduleOutcome::Updated { slot_count } => {
                info!(slot_count, "workbook imported");
                format!("匯入成功！已讀取 {slot_count} 節課表內容。")
            }
            ScheduleOutcome::NoSlots => NO_SLOTS_NOTICE.to_string(),
            ScheduleOutcome::Failed { message } => format!("檔案讀取失敗：{message}"),
        };
        ScheduleReport {
            outcome,
            notice: Some(notice),
        }
    }

    /// Fetches the agenda unless a fetch is already running.
    pub async fn refresh_calendar(&self) -> CalendarRefresh {
        let started = self.state.write().begin_calendar_fetch();
        if !started {
            return CalendarRefresh::AlreadyRunning;
        }

        let result = self.remote.fetch_calendar_text(Utc::now()).await;
        let mut state = self.state.write();
        match result {
            Ok(text) => {
                state.finish_calendar_fetch(text);
                CalendarRefresh::Updated
            }
            Err(err) => {
                error!(error = %err, "calendar fetch failed");
                state.finish_calendar_fetch(CALENDAR_FAILURE_TEXT);
                CalendarRefresh::Failed
            }
        }
    }
}
