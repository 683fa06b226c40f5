pub mod broadcast;
pub mod clock;
pub mod config;
pub mod display;
pub mod grid;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod kiosk;
pub mod parser;
pub mod persistence;
pub mod remote;
pub mod resolver;
pub mod slot;
pub mod state;
pub mod timetable;

pub use broadcast::{BroadcastTemplate, QuickAction, TemplatePatch};
pub use config::{KioskConfig, StoreBackend};
pub use display::{DisplayContent, DisplaySnapshot};
pub use grid::{Grid, ImportError, grid_from_csv, grid_from_xlsx};
pub use kiosk::{CalendarRefresh, Kiosk, ScheduleOutcome, ScheduleReport};
pub use parser::{ParsedSchedule, parse_schedule_grid};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteSettingsStore;
pub use persistence::{
    FileSettingsStore, MemorySettingsStore, PersistenceError, Settings, SettingsStore,
    load_settings, save_settings,
};
pub use remote::{RemoteClient, SyncError};
pub use resolver::{PeriodStatus, resolve_period, resolve_period_at};
pub use slot::TimeSlot;
pub use state::{AppState, StateError};
pub use timetable::Timetable;
