use async_trait::async_trait;
use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

use crate::storage::PreferenceStore;

pub struct SqlitePreferences {
    conn: Arc<Mutex<Connection>>,
}

impl SqlitePreferences {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)
            .context("Failed to open SQLite database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .context("Failed to open in-memory SQLite database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("Preference database lock poisoned"))
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferences {
    async fn migrate(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        info!("Preference store migration completed");
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;

        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
            params![key, value],
        )?;

        debug!("Stored preference {} = {}", key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LANG_KEY;

    #[tokio::test]
    async fn test_get_set_round_trip() {
        let store = SqlitePreferences::in_memory().unwrap();
        store.migrate().await.unwrap();

        assert_eq!(store.get(LANG_KEY).await.unwrap(), None);
        store.set(LANG_KEY, "ja").await.unwrap();
        store.set(LANG_KEY, "en").await.unwrap();
        assert_eq!(store.get(LANG_KEY).await.unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_unmigrated_store_reports_errors() {
        let store = SqlitePreferences::in_memory().unwrap();
        assert!(tokio_test::block_on(store.get(LANG_KEY)).is_err());
        assert!(tokio_test::block_on(store.set(LANG_KEY, "en")).is_err());
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.db");
        let path = path.to_str().unwrap();

        {
            let store = SqlitePreferences::new(path).await.unwrap();
            store.migrate().await.unwrap();
            store.set(LANG_KEY, "sw").await.unwrap();
        }

        let store = SqlitePreferences::new(path).await.unwrap();
        store.migrate().await.unwrap();
        assert_eq!(store.get(LANG_KEY).await.unwrap().as_deref(), Some("sw"));
    }
}
