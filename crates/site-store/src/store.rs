use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use site_core::{BackendError, PreferenceBackend};

use crate::error::Result;
use crate::schema;

/// SQLite-backed key/value storage for site preferences.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM preferences WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).optional()?;
        Ok(result)
    }

    pub fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    /// Flush the WAL into the main database file and truncate it.
    pub fn checkpoint_truncate(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

impl PreferenceBackend for Store {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, BackendError> {
        self.get_preference(key).map_err(|e| {
            tracing::warn!("failed to read preference '{key}': {e}");
            BackendError(e.to_string())
        })
    }

    fn write(&self, key: &str, value: &str) -> std::result::Result<(), BackendError> {
        self.set_preference(key, value).map_err(|e| {
            tracing::warn!("failed to persist preference '{key}': {e}");
            BackendError(e.to_string())
        })?;
        tracing::debug!("persisted preference {key}={value}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_core::{PREFERENCE_KEY, PreferenceStore, ViewPreference};

    #[test]
    fn test_preference_upsert() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.get_preference(PREFERENCE_KEY).unwrap().is_none());

        store.set_preference(PREFERENCE_KEY, "list").unwrap();
        store.set_preference(PREFERENCE_KEY, "grid").unwrap();
        assert_eq!(
            store.get_preference(PREFERENCE_KEY).unwrap().as_deref(),
            Some("grid")
        );

        let rows: i64 = store
            .conn()
            .query_row("SELECT count(*) FROM preferences", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_backend_save_then_load() {
        let store = Store::open_in_memory().unwrap();
        let mut prefs = PreferenceStore::open(&store);
        assert_eq!(prefs.current(), ViewPreference::Grid);

        assert!(prefs.save_preference(ViewPreference::List));
        assert_eq!(prefs.load_preference(), ViewPreference::List);
    }

    #[test]
    fn test_backend_wrong_case_is_grid() {
        let store = Store::open_in_memory().unwrap();
        store.set_preference(PREFERENCE_KEY, "GRID").unwrap();
        assert_eq!(PreferenceStore::open(&store).current(), ViewPreference::Grid);

        store.set_preference(PREFERENCE_KEY, "LIST").unwrap();
        assert_eq!(PreferenceStore::open(&store).current(), ViewPreference::Grid);
    }

    #[test]
    fn test_backend_unavailable_keeps_memory_value() {
        let store = Store::open_in_memory().unwrap();
        store.conn().execute_batch("DROP TABLE preferences;").unwrap();

        let mut prefs = PreferenceStore::open(&store);
        assert_eq!(prefs.current(), ViewPreference::Grid);
        assert!(!prefs.save_preference(ViewPreference::List));
        assert_eq!(prefs.current(), ViewPreference::List);
    }

    #[test]
    fn test_open_refuses_newer_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.db");
        {
            let store = Store::open(&path).unwrap();
            store
                .conn()
                .execute(
                    "UPDATE metadata SET value = '99' WHERE key = 'schema_version'",
                    [],
                )
                .unwrap();
        }
        assert!(Store::open(&path).is_err());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.db");
        {
            let store = Store::open(&path).unwrap();
            PreferenceStore::open(&store).save_preference(ViewPreference::List);
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(PreferenceStore::open(&store).current(), ViewPreference::List);
    }
}
