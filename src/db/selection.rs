use crate::prelude::*;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{Executor, Row, SqlitePool};
use std::path::Path;
#[cfg(test)]
use {
    anyhow::anyhow,
    std::collections::HashMap,
    std::sync::atomic::{AtomicUsize, Ordering},
    std::sync::Mutex,
};

/// Durable key-value store for visited-region lists. Injected into the render
/// cycle so the reconciliation logic can be tested against an in-memory fake.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>>;
    async fn set(&self, key: &str, value: &[String]) -> Result<()>;
}

pub struct SqliteSelectionStore {
    pool: SqlitePool,
}

impl SqliteSelectionStore {
    pub async fn open(db_path: &Path) -> Result<Self> {
        let pool = SqlitePool::connect_with(
            SqliteConnectOptions::new()
                .filename(db_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal),
        )
        .await?;
        pool.execute(
            "CREATE TABLE IF NOT EXISTS selections (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SelectionStore for SqliteSelectionStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        let row = sqlx::query("SELECT value FROM selections WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(row) => {
                let raw: String = row.get(0);
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &[String]) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO selections (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(serde_json::to_string(value)?)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// In-memory store used in tests, keeping the reconciliation logic exercisable
/// without a persistence backend. Counts writes so redundant-write checks can
/// observe them.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySelectionStore {
    entries: Mutex<HashMap<String, Vec<String>>>,
    writes: AtomicUsize,
}

#[cfg(test)]
impl MemorySelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(key: &str, value: &[String]) -> Self {
        let store = Self::default();
        match store.entries.lock() {
            Ok(mut entries) => {
                entries.insert(key.to_string(), value.to_vec());
            }
            Err(poisoned) => {
                poisoned.into_inner().insert(key.to_string(), value.to_vec());
            }
        }

        store
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl SelectionStore for MemorySelectionStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<String>>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| anyhow!("Poisoned selection store lock: {}", e))?;

        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[String]) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| anyhow!("Poisoned selection store lock: {}", e))?;
        entries.insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trips() {
        let store = MemorySelectionStore::new();
        assert_eq!(store.get("visited_states").await.unwrap(), None);

        store
            .set("visited_states", &["CA".to_string(), "NY".to_string()])
            .await
            .unwrap();
        assert_eq!(
            store.get("visited_states").await.unwrap(),
            Some(vec!["CA".to_string(), "NY".to_string()])
        );
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn sqlite_store_round_trips() {
        let dir = std::env::temp_dir().join("travelmap_store_test");
        std::fs::create_dir_all(&dir).unwrap();
        let db_path = dir.join("selections.sqlite");
        let _ = std::fs::remove_file(&db_path);

        let store = SqliteSelectionStore::open(&db_path).await.unwrap();
        assert_eq!(store.get("visited_countries").await.unwrap(), None);

        store
            .set("visited_countries", &["France".to_string()])
            .await
            .unwrap();
        store
            .set(
                "visited_countries",
                &["France".to_string(), "Japan".to_string()],
            )
            .await
            .unwrap();
        assert_eq!(
            store.get("visited_countries").await.unwrap(),
            Some(vec!["France".to_string(), "Japan".to_string()])
        );
    }
}
