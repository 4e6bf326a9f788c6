//! [`SqliteStore`] — the SQLite implementation of [`SnapshotStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use tracing::debug;

use rolodex_core::snapshot::{Snapshot, SnapshotStore};

use crate::{
  Error, Result,
  encode::{RawSnapshot, encode_contacts, encode_next_id},
  schema::{CONTACTS_KEY, NEXT_ID_KEY, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Rolodex snapshots persisted in a single SQLite file.
///
/// Clones share one reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read the raw string stored under `key`.
  pub(crate) async fn get_value(&self, key: &'static str) -> Result<Option<String>> {
    let value = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT value FROM kv WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;
    Ok(value)
  }

  /// Overwrite the raw string stored under `key`.
  #[cfg(test)]
  pub(crate) async fn set_value(&self, key: &'static str, value: String) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO kv (key, value) VALUES (?1, ?2)
           ON CONFLICT (key) DO UPDATE SET value = excluded.value",
          rusqlite::params![key, value],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── SnapshotStore impl ──────────────────────────────────────────────────────

impl SnapshotStore for SqliteStore {
  type Error = Error;

  async fn load(&self) -> Result<Option<Snapshot>> {
    let raw = RawSnapshot {
      contacts: self.get_value(CONTACTS_KEY).await?,
      next_id:  self.get_value(NEXT_ID_KEY).await?,
    };
    raw.into_snapshot()
  }

  async fn save(&self, snapshot: &Snapshot) -> Result<()> {
    let contacts_json = encode_contacts(&snapshot.contacts)?;
    let next_id_str   = encode_next_id(snapshot.next_id);
    let count         = snapshot.contacts.len();

    // Both keys change together or not at all.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
          )?;
          stmt.execute(rusqlite::params![CONTACTS_KEY, contacts_json])?;
          stmt.execute(rusqlite::params![NEXT_ID_KEY, next_id_str])?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    debug!(count, "saved snapshot");
    Ok(())
  }
}
