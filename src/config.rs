use crate::persistence::{FileSettingsStore, MemorySettingsStore, PersistenceError, SettingsStore};
use crate::remote::RemoteClient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1GPi-84ocA56qJrzGoN6ocmt27Fmc1iHJ-qxScqsHVvE/export?format=csv";
pub const DEFAULT_CALENDAR_URL: &str = "https://a3g.app.n8n.cloud/webhook/sch_wh";

pub const CONFIG_PATH_ENV: &str = "SIGNAGE_CONFIG";
pub const HTTP_ADDR_ENV: &str = "SIGNAGE_HTTP_ADDR";
pub const DATA_DIR_ENV: &str = "SIGNAGE_DATA_DIR";
pub const SHEET_URL_ENV: &str = "SIGNAGE_SHEET_URL";
pub const CALENDAR_URL_ENV: &str = "SIGNAGE_CALENDAR_URL";
pub const STORE_ENV: &str = "SIGNAGE_STORE";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidValue { key: &'static str, value: String },
    Store(PersistenceError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "could not read config file: {err}"),
            ConfigError::Parse(err) => write!(f, "invalid config file: {err}"),
            ConfigError::InvalidValue { key, value } => write!(f, "invalid value '{value}' for {key}"),
            ConfigError::Store(err) => write!(f, "could not open settings store: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<PersistenceError> for ConfigError {
    fn from(value: PersistenceError) -> Self {
        Self::Store(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    File,
    #[cfg(feature = "sqlite")]
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreBackend::File),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(StoreBackend::Sqlite),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Runtime settings of the kiosk service, as opposed to the classroom
/// settings kept in the settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub http_addr: String,
    pub data_dir: PathBuf,
    pub store: StoreBackend,
    pub sheet_url: String,
    pub calendar_url: String,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:3000".to_string(),
            data_dir: PathBuf::from("signage-data"),
            store: StoreBackend::File,
            sheet_url: DEFAULT_SHEET_URL.to_string(),
            calendar_url: DEFAULT_CALENDAR_URL.to_string(),
        }
    }
}

impl KioskConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Reads the file named by `SIGNAGE_CONFIG` (if set), then applies the
    /// individual `SIGNAGE_*` overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_json_file(path)?,
            Err(_) => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(HTTP_ADDR_ENV) {
            self.http_addr = addr;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(SHEET_URL_ENV) {
            self.sheet_url = url;
        }
        if let Some(url) = lookup(CALENDAR_URL_ENV) {
            self.calendar_url = url;
        }
        if let Some(store) = lookup(STORE_ENV) {
            self.store = store.parse().map_err(|_| ConfigError::InvalidValue {
                key: STORE_ENV,
                value: store,
            })?;
        }
        Ok(self)
    }

    pub fn open_store(&self) -> Result<Arc<dyn SettingsStore>, ConfigError> {
        let store: Arc<dyn SettingsStore> = match self.store {
            StoreBackend::File => Arc::new(FileSettingsStore::new(&self.data_dir)?),
            #[cfg(feature = "sqlite")]
            StoreBackend::Sqlite => {
                fs::create_dir_all(&self.data_dir)?;
                Arc::new(crate::persistence::sqlite::SqliteSettingsStore::new(
                    self.data_dir.join("settings.sqlite3"),
                )?)
            }
            StoreBackend::Memory => Arc::new(MemorySettingsStore::new()),
        };
        Ok(store)
    }

    pub fn remote_client(&self) -> RemoteClient {
        RemoteClient::new(&self.sheet_url, &self.calendar_url)
    }
}
