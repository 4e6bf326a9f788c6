//! The persisted snapshot format and the [`SnapshotStore`] persistence seam.
//!
//! A snapshot is the full ordered contact list plus the next-id counter:
//!
//! ```json
//! { "contacts": [ { "id": 1, "name": "…", "phone": "…", "favorite": false } ],
//!   "nextId": 2 }
//! ```
//!
//! Backends (e.g. `rolodex-store-sqlite`) implement [`SnapshotStore`]; the
//! core never touches storage directly.

use std::{future::Future, sync::Mutex};

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  contact::{Contact, ContactId},
};

/// File name offered for exports when the user does not pick one.
pub const SUGGESTED_FILE_NAME: &str = "contacts.json";

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// Everything needed to rebuild an address book at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
  pub contacts: Vec<Contact>,
  #[serde(default)]
  pub next_id:  ContactId,
}

impl Snapshot {
  /// Pretty-printed with two-space indentation, as written by file exports.
  pub fn to_pretty_json(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  pub fn from_json(s: &str) -> Result<Self> { Ok(serde_json::from_str(s)?) }
}

/// The smallest id strictly greater than every id in `contacts`, or 0 for an
/// empty list. Saturates at `ContactId::MAX`; the address book refuses to
/// assign that value.
pub fn next_id_after(contacts: &[Contact]) -> ContactId {
  contacts
    .iter()
    .map(|c| c.id)
    .max()
    .map_or(0, |max| max.saturating_add(1))
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over wherever snapshots are persisted between sessions.
///
/// Implementations store the latest snapshot wholesale; there is no partial
/// write. All methods return `Send` futures so the address book can live
/// behind an async mutex in a multi-threaded runtime.
pub trait SnapshotStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the last saved snapshot. `None` means nothing was ever saved.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<Snapshot>, Self::Error>> + Send + '_;

  /// Replace the saved snapshot with `snapshot`.
  fn save<'a>(
    &'a self,
    snapshot: &'a Snapshot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// A [`SnapshotStore`] that keeps the snapshot in process memory.
///
/// Used for tests and for sessions that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
  saved: Mutex<Option<Snapshot>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Start out as if `snapshot` had already been saved.
  pub fn with_snapshot(snapshot: Snapshot) -> Self {
    Self {
      saved: Mutex::new(Some(snapshot)),
    }
  }

  /// The currently saved snapshot, if any.
  pub fn saved(&self) -> Option<Snapshot> {
    self
      .saved
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner())
      .clone()
  }
}

impl SnapshotStore for MemoryStore {
  type Error = std::convert::Infallible;

  async fn load(&self) -> Result<Option<Snapshot>, Self::Error> {
    Ok(self.saved())
  }

  async fn save(&self, snapshot: &Snapshot) -> Result<(), Self::Error> {
    *self
      .saved
      .lock()
      .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(snapshot.clone());
    Ok(())
  }
}

// ─── Sample data ─────────────────────────────────────────────────────────────

/// Default records offered when no snapshot has ever been saved.
pub fn sample_contacts() -> Vec<Contact> {
  vec![
    Contact {
      id:            1,
      name:          "John Doe".into(),
      phone:         "0241234567".into(),
      email:         Some("john.doe@example.com".into()),
      profile_image: None,
      favorite:      true,
    },
    Contact {
      id:            2,
      name:          "Jane Smith".into(),
      phone:         "0557654321".into(),
      email:         Some("jane.smith@example.com".into()),
      profile_image: None,
      favorite:      false,
    },
    Contact {
      id:            3,
      name:          "David Johnson".into(),
      phone:         "0558869979".into(),
      email:         Some("david.johnson@example.com".into()),
      profile_image: Some(
        "https://images.unsplash.com/photo-1511367461989-f85a21fda167?fm=jpg&q=60&w=3000"
          .into(),
      ),
      favorite:      true,
    },
    Contact {
      id:            4,
      name:          "Sarah Williams".into(),
      phone:         "0272098865".into(),
      email:         Some("sarah.williams@example.com".into()),
      profile_image: None,
      favorite:      false,
    },
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn snapshot_json_shape() {
    let snapshot = Snapshot {
      contacts: sample_contacts()[..1].to_vec(),
      next_id:  2,
    };
    let json: serde_json::Value =
      serde_json::from_str(&snapshot.to_pretty_json().unwrap()).unwrap();
    assert_eq!(json["nextId"], 2);
    assert_eq!(json["contacts"][0]["name"], "John Doe");
    assert_eq!(json["contacts"][0]["favorite"], true);
  }

  #[test]
  fn pretty_json_uses_two_space_indent() {
    let text = Snapshot::default().to_pretty_json().unwrap();
    assert!(text.contains("\n  \"contacts\""), "{text}");
  }

  #[test]
  fn from_json_accepts_records_without_favorite() {
    let snapshot = Snapshot::from_json(
      r#"{"contacts":[{"id":3,"name":"Ann","phone":"1"}],"nextId":4}"#,
    )
    .unwrap();
    assert_eq!(snapshot.next_id, 4);
    assert!(!snapshot.contacts[0].favorite);
  }

  #[test]
  fn next_id_after_is_max_plus_one() {
    assert_eq!(next_id_after(&[]), 0);
    assert_eq!(next_id_after(&sample_contacts()), 5);
  }

  #[test]
  fn next_id_after_saturates_at_max_id() {
    let mut contacts = sample_contacts();
    contacts[0].id = ContactId::MAX;
    assert_eq!(next_id_after(&contacts), ContactId::MAX);
  }

  #[tokio::test]
  async fn memory_store_round_trips() {
    let store = MemoryStore::new();
    assert!(store.load().await.unwrap().is_none());

    let snapshot = Snapshot {
      contacts: sample_contacts(),
      next_id:  5,
    };
    store.save(&snapshot).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(snapshot));
  }
}
