//! Remembered grid/list choice for the article catalog.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::constants::PREFERENCE_KEY;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewPreference {
    #[default]
    Grid,
    List,
}

impl ViewPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewPreference::Grid => "grid",
            ViewPreference::List => "list",
        }
    }

    /// Parse a stored literal. Only the exact strings `grid` and `list` are
    /// recognized; anything else, including a missing value, is `Grid`.
    pub fn from_stored(value: Option<&str>) -> Self {
        Self::parse(value.unwrap_or_default()).unwrap_or_default()
    }

    /// Strict parse for user input.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "grid" => Some(ViewPreference::Grid),
            "list" => Some(ViewPreference::List),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewPreference::Grid => ViewPreference::List,
            ViewPreference::List => ViewPreference::Grid,
        }
    }
}

impl fmt::Display for ViewPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage failure reported by a backend. Always recovered by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError(pub String);

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preference storage unavailable: {}", self.0)
    }
}

impl std::error::Error for BackendError {}

/// Durable key/value capability behind the preference store.
pub trait PreferenceBackend {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError>;
    fn write(&self, key: &str, value: &str) -> Result<(), BackendError>;
}

impl<B: PreferenceBackend + ?Sized> PreferenceBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).write(key, value)
    }
}

/// Process-local backend. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a raw stored value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let backend = Self::new();
        if let Ok(mut values) = backend.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        backend
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, BackendError> {
        let values = self
            .values
            .lock()
            .map_err(|_| BackendError("memory backend poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| BackendError("memory backend poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// In-memory view preference kept in step with a durable backend.
///
/// Every change writes through immediately. Backend failures never escape:
/// the in-memory value stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct PreferenceStore<B> {
    backend: B,
    key: String,
    current: ViewPreference,
    persisted: bool,
}

impl<B: PreferenceBackend> PreferenceStore<B> {
    /// Open under the standard key and load the persisted value.
    pub fn open(backend: B) -> Self {
        Self::open_with_key(backend, PREFERENCE_KEY)
    }

    pub fn open_with_key(backend: B, key: &str) -> Self {
        let mut store = Self {
            backend,
            key: key.to_string(),
            current: ViewPreference::default(),
            persisted: false,
        };
        store.load_preference();
        store
    }

    /// Re-read the persisted value; unreadable storage yields `Grid`.
    pub fn load_preference(&mut self) -> ViewPreference {
        let stored = self.backend.read(&self.key);
        self.persisted = stored.is_ok();
        self.current = ViewPreference::from_stored(stored.unwrap_or(None).as_deref());
        self.current
    }

    /// Set and write through. Returns whether the value reached durable storage.
    pub fn save_preference(&mut self, mode: ViewPreference) -> bool {
        self.current = mode;
        self.persisted = self.backend.write(&self.key, mode.as_str()).is_ok();
        self.persisted
    }

    /// Flip grid/list and persist; returns the new mode.
    pub fn toggle(&mut self) -> (ViewPreference, bool) {
        let next = self.current.toggled();
        let persisted = self.save_preference(next);
        (next, persisted)
    }

    pub fn current(&self) -> ViewPreference {
        self.current
    }

    /// Whether the last read or write reached the backend. `false` means the
    /// current value lives in memory only.
    pub fn persisted(&self) -> bool {
        self.persisted
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
