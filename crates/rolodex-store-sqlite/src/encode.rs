//! Encoding and decoding helpers between snapshot types and the plain-text
//! values stored in the `kv` table.
//!
//! Contacts are stored as a compact JSON array, the counter as a decimal
//! string.

use rolodex_core::{
  contact::{Contact, ContactId},
  snapshot::Snapshot,
};
use tracing::warn;

use crate::{Error, Result, schema::NEXT_ID_KEY};

// ─── Contacts ────────────────────────────────────────────────────────────────

pub fn encode_contacts(contacts: &[Contact]) -> Result<String> {
  Ok(serde_json::to_string(contacts)?)
}

pub fn decode_contacts(s: &str) -> Result<Vec<Contact>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Counter ─────────────────────────────────────────────────────────────────

pub fn encode_next_id(id: ContactId) -> String { id.to_string() }

pub fn decode_next_id(s: &str) -> Result<ContactId> {
  s.trim().parse().map_err(|e: std::num::ParseIntError| Error::Corrupt {
    key:    NEXT_ID_KEY,
    reason: e.to_string(),
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from the `kv` table.
pub struct RawSnapshot {
  pub contacts: Option<String>,
  pub next_id:  Option<String>,
}

impl RawSnapshot {
  /// `None` when no contact list was ever saved. A missing or unreadable
  /// counter falls back to 0; the address book raises it past the stored ids.
  pub fn into_snapshot(self) -> Result<Option<Snapshot>> {
    let Some(contacts) = self.contacts else {
      return Ok(None);
    };
    let contacts = decode_contacts(&contacts)?;

    let next_id = match self.next_id.as_deref().map(decode_next_id) {
      Some(Ok(id)) => id,
      Some(Err(e)) => {
        warn!(error = %e, "ignoring stored counter");
        0
      }
      None => 0,
    };

    Ok(Some(Snapshot { contacts, next_id }))
  }
}
