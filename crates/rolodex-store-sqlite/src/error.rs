//! Error type for `rolodex-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] rolodex_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// A stored value could not be decoded.
  #[error("corrupt value for key {key:?}: {reason}")]
  Corrupt { key: &'static str, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
