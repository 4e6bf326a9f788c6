//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Key under which the JSON array of contact records is stored.
pub const CONTACTS_KEY: &str = "contacts";

/// Key under which the decimal next-id counter is stored.
pub const NEXT_ID_KEY: &str = "nextId";

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Plain string key-value pairs, mirroring browser local storage.
CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

PRAGMA user_version = 1;
";
