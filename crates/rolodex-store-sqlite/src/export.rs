//! Writing a [`Snapshot`] to a user-chosen JSON file.
//!
//! The file holds the same `{ "contacts": [...], "nextId": n }` payload that
//! is persisted in the store, pretty-printed with two-space indentation.

use std::path::Path;

use chrono::{DateTime, TimeZone};
use rolodex_core::snapshot::Snapshot;
use tracing::info;

use crate::Result;

pub use rolodex_core::snapshot::SUGGESTED_FILE_NAME;

/// `contacts-YYYY-MM-DD_HHMMSS.json` for `now`.
pub fn timestamped_file_name<Tz>(now: DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: std::fmt::Display,
{
  format!("contacts-{}.json", now.format("%Y-%m-%d_%H%M%S"))
}

/// Write `snapshot` to `path`, replacing any existing file.
pub async fn write_snapshot(path: impl AsRef<Path>, snapshot: &Snapshot) -> Result<()> {
  let path = path.as_ref();
  let body = snapshot.to_pretty_json()?;
  tokio::fs::write(path, body).await?;
  info!(path = %path.display(), count = snapshot.contacts.len(), "exported contacts");
  Ok(())
}

#[cfg(test)]
mod tests {
  use chrono::{NaiveDate, Utc};
  use rolodex_core::snapshot::sample_contacts;

  use super::*;

  #[test]
  fn timestamped_name_format() {
    let at = NaiveDate::from_ymd_opt(2024, 3, 9)
      .unwrap()
      .and_hms_opt(7, 5, 30)
      .unwrap()
      .and_utc();
    assert_eq!(timestamped_file_name(at), "contacts-2024-03-09_070530.json");
    assert!(timestamped_file_name(Utc::now()).ends_with(".json"));
  }

  #[tokio::test]
  async fn written_file_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(SUGGESTED_FILE_NAME);
    let snapshot = Snapshot {
      contacts: sample_contacts(),
      next_id:  5,
    };

    write_snapshot(&path, &snapshot).await.unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"contacts\": ["), "{text}");
    assert_eq!(Snapshot::from_json(&text).unwrap(), snapshot);
  }

  #[tokio::test]
  async fn write_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    std::fs::write(&path, "old contents that are longer than the new ones").unwrap();

    write_snapshot(&path, &Snapshot::default()).await.unwrap();

    let parsed = Snapshot::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, Snapshot::default());
  }
}
