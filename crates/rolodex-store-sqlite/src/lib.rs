//! SQLite backend for Rolodex snapshots.
//!
//! Stands in for browser local storage: a single key-value table holding the
//! `contacts` array and the `nextId` counter. Wraps [`tokio_rusqlite`] so all
//! database access runs on a dedicated thread without blocking the async
//! runtime. The [`export`] module writes the same snapshot to a JSON file.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod export;

pub use error::{Error, Result};
pub use store::SqliteStore;
