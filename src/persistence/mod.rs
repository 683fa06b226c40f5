use crate::broadcast::{BroadcastTemplate, default_templates};
use crate::slot::{TimeSlot, default_slots};
use crate::timetable::Timetable;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;
use tracing::{debug, warn};

pub const SLOTS_KEY: &str = "slots";
pub const TIMETABLE_KEY: &str = "timetable";
pub const TEMPLATES_KEY: &str = "templates";

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// String key-value storage holding one JSON document per key.
pub trait SettingsStore: Send + Sync {
    fn read(&self, key: &str) -> PersistenceResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> PersistenceResult<()>;
}

/// The three persisted records of the kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub slots: Vec<TimeSlot>,
    pub timetable: Timetable,
    pub templates: Vec<BroadcastTemplate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slots: default_slots(),
            timetable: Timetable::new(),
            templates: default_templates(),
        }
    }
}

/// Loads every record, substituting its default when it is missing or unreadable.
pub fn load_settings(store: &dyn SettingsStore) -> Settings {
    Settings {
        slots: load_record(store, SLOTS_KEY, default_slots),
        timetable: load_record(store, TIMETABLE_KEY, Timetable::new),
        templates: load_record(store, TEMPLATES_KEY, default_templates),
    }
}

pub fn save_settings(store: &dyn SettingsStore, settings: &Settings) -> PersistenceResult<()> {
    write_record(store, SLOTS_KEY, &settings.slots)?;
    write_record(store, TIMETABLE_KEY, &settings.timetable)?;
    write_record(store, TEMPLATES_KEY, &settings.templates)?;
    Ok(())
}

fn load_record<T, F>(store: &dyn SettingsStore, key: &str, default: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.read(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "stored record is not valid, using defaults");
                default()
            }
        },
        Ok(None) => {
            debug!(key, "no stored record, using defaults");
            default()
        }
        Err(err) => {
            warn!(key, error = %err, "failed to read stored record, using defaults");
            default()
        }
    }
}

fn write_record<T: Serialize>(store: &dyn SettingsStore, key: &str, value: &T) -> PersistenceResult<()> {
    let json = serde_json::to_string(value)?;
    store.write(key, &json)
}

pub mod file;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::FileSettingsStore;
pub use memory::MemorySettingsStore;
