//! Error types for `rolodex-core`.

use thiserror::Error;

use crate::contact::ContactId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact id {0} is already in use")]
  DuplicateId(ContactId),

  #[error("no contact ids left to assign")]
  IdsExhausted,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
