//! Durable store on a single long-lived SQLite connection.
//!
//! - One connection (WAL) behind a mutex; every operation is one statement.
//! - `increment` is an upsert with `RETURNING`, so the add and the read of
//!   the new count cannot interleave with another writer.
//! - `decrement` runs its update and the delete of an emptied row in one
//!   transaction.
//! - `warnings.count` carries a `CHECK (count > 0)`; zero is always a deleted row.

use crate::{Increment, RuleStore, WarningStore};
use groupwarden_core::{Error, GroupId, Result, UserId};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS warnings (
      group_id  INTEGER NOT NULL,
      user_id   INTEGER NOT NULL,
      count     INTEGER NOT NULL CHECK (count > 0),
      PRIMARY KEY (group_id, user_id)
    );

    CREATE TABLE IF NOT EXISTS rules (
      group_id  INTEGER PRIMARY KEY,
      text      TEXT NOT NULL
    );
"#;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

fn unavailable(e: rusqlite::Error) -> Error {
    Error::store_unavailable(e.to_string())
}

impl SqliteStore {
    /// Open/create the database file and ensure the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(unavailable)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(unavailable)?;
        debug!("Opened warning database at {}", path.display());
        Self::with_connection(conn)
    }

    /// A private database that lives as long as the store.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory().map_err(unavailable)?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        // Other processes (CLI invocations) may hold the write lock briefly.
        conn.busy_timeout(Duration::from_secs(5)).map_err(unavailable)?;
        conn.execute_batch(SCHEMA).map_err(unavailable)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::store_unavailable("connection mutex poisoned"))
    }
}

impl WarningStore for SqliteStore {
    fn increment(&self, group_id: GroupId, user_id: UserId) -> Result<Increment> {
        let current: u32 = self
            .conn()?
            .query_row(
                r#"
                INSERT INTO warnings(group_id, user_id, count)
                VALUES (?1, ?2, 1)
                ON CONFLICT(group_id, user_id) DO UPDATE SET
                  count = count + 1
                RETURNING count
                "#,
                (group_id.get(), user_id.get()),
                |row| row.get(0),
            )
            .map_err(unavailable)?;
        Ok(Increment {
            previous: current - 1,
            current,
        })
    }

    fn decrement(&self, group_id: GroupId, user_id: UserId) -> Result<u32> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(unavailable)?;
        let remaining: Option<u32> = tx
            .query_row(
                r#"
                UPDATE warnings SET count = count - 1
                WHERE group_id = ?1 AND user_id = ?2 AND count > 1
                RETURNING count
                "#,
                (group_id.get(), user_id.get()),
                |row| row.get(0),
            )
            .optional()
            .map_err(unavailable)?;
        if remaining.is_none() {
            tx.execute(
                "DELETE FROM warnings WHERE group_id = ?1 AND user_id = ?2",
                (group_id.get(), user_id.get()),
            )
            .map_err(unavailable)?;
        }
        tx.commit().map_err(unavailable)?;
        Ok(remaining.unwrap_or(0))
    }

    fn count(&self, group_id: GroupId, user_id: UserId) -> Result<u32> {
        let count: Option<u32> = self
            .conn()?
            .query_row(
                "SELECT count FROM warnings WHERE group_id = ?1 AND user_id = ?2",
                (group_id.get(), user_id.get()),
                |row| row.get(0),
            )
            .optional()
            .map_err(unavailable)?;
        Ok(count.unwrap_or(0))
    }

    fn delete(&self, group_id: GroupId, user_id: UserId) -> Result<bool> {
        let removed = self
            .conn()?
            .execute(
                "DELETE FROM warnings WHERE group_id = ?1 AND user_id = ?2",
                (group_id.get(), user_id.get()),
            )
            .map_err(unavailable)?;
        Ok(removed > 0)
    }

    fn warning_records(&self) -> Result<u64> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM warnings", [], |row| row.get(0))
            .map_err(unavailable)?;
        Ok(n as u64)
    }
}

impl RuleStore for SqliteStore {
    fn upsert_rules(&self, group_id: GroupId, text: &str) -> Result<()> {
        self.conn()?
            .execute(
                r#"
                INSERT INTO rules(group_id, text) VALUES (?1, ?2)
                ON CONFLICT(group_id) DO UPDATE SET text = excluded.text
                "#,
                (group_id.get(), text),
            )
            .map_err(unavailable)?;
        Ok(())
    }

    fn rules(&self, group_id: GroupId) -> Result<Option<String>> {
        self.conn()?
            .query_row(
                "SELECT text FROM rules WHERE group_id = ?1",
                [group_id.get()],
                |row| row.get(0),
            )
            .optional()
            .map_err(unavailable)
    }

    fn rule_records(&self) -> Result<u64> {
        let n: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM rules", [], |row| row.get(0))
            .map_err(unavailable)?;
        Ok(n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G: GroupId = GroupId::new(-1001);
    const U: UserId = UserId::new(77);

    #[test]
    fn increment_returns_counts_around_the_upsert() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.increment(G, U).unwrap(), Increment { previous: 0, current: 1 });
        assert_eq!(store.increment(G, U).unwrap(), Increment { previous: 1, current: 2 });
        assert_eq!(store.count(G, U).unwrap(), 2);
    }

    #[test]
    fn zero_count_is_rejected_by_schema() {
        let store = SqliteStore::open_in_memory().unwrap();
        let conn = store.conn().unwrap();
        let res = conn.execute(
            "INSERT INTO warnings(group_id, user_id, count) VALUES (1, 1, 0)",
            [],
        );
        assert!(res.is_err());
    }

    #[test]
    fn decrement_never_leaves_a_zero_row() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.increment(G, U).unwrap();
        store.increment(G, U).unwrap();
        assert_eq!(store.decrement(G, U).unwrap(), 1);
        assert_eq!(store.decrement(G, U).unwrap(), 0);
        assert_eq!(store.warning_records().unwrap(), 0);
    }

    #[test]
    fn rules_upsert_overwrites() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.upsert_rules(G, "no spam").unwrap();
        store.upsert_rules(G, "no spam, no links").unwrap();
        assert_eq!(store.rules(G).unwrap().as_deref(), Some("no spam, no links"));
        assert_eq!(store.rule_records().unwrap(), 1);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("warden.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.increment(G, U).unwrap();
            store.upsert_rules(G, "be kind").unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count(G, U).unwrap(), 1);
        assert_eq!(store.rules(G).unwrap().as_deref(), Some("be kind"));
    }
}
