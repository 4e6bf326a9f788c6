//! Contact records — the unit of data managed by the store.
//!
//! Records serialise in the camelCase shape used by the persisted snapshot:
//! `{ id, name, phone, email?, profileImage?, favorite }`.

use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned identifier; unique within a store and immutable once set.
pub type ContactId = u64;

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A stored contact record. `favorite` is always concrete once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:            ContactId,
  pub name:          String,
  pub phone:         String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile_image: Option<String>,
  /// Older snapshots may omit the flag entirely.
  #[serde(default)]
  pub favorite:      bool,
}

impl Contact {
  /// Upper-cased first letters of each whitespace-separated name part,
  /// e.g. `"John Doe"` → `"JD"`.
  pub fn initials(&self) -> String {
    self
      .name
      .split_whitespace()
      .filter_map(|part| part.chars().next())
      .flat_map(char::to_uppercase)
      .collect()
  }

  /// Apply a shallow merge: fields present in `patch` overwrite, the rest are
  /// kept. The id is never touched. A blank email or image clears the field.
  pub fn apply(&mut self, patch: ContactPatch) {
    if let Some(name) = patch.name {
      self.name = name;
    }
    if let Some(phone) = patch.phone {
      self.phone = phone;
    }
    if let Some(email) = patch.email {
      self.email = blank_to_none(email);
    }
    if let Some(profile_image) = patch.profile_image {
      self.profile_image = blank_to_none(profile_image);
    }
    if let Some(favorite) = patch.favorite {
      self.favorite = favorite;
    }
  }
}

// ─── NewContact ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::ContactStore::add`]. The id is pre-assigned by
/// the caller; `favorite` may be left unset and is normalised to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
  pub id:            ContactId,
  pub name:          String,
  pub phone:         String,
  #[serde(default)]
  pub email:         Option<String>,
  #[serde(default)]
  pub profile_image: Option<String>,
  #[serde(default)]
  pub favorite:      Option<bool>,
}

impl NewContact {
  /// Convenience constructor with all optional fields unset.
  pub fn new(
    id: ContactId,
    name: impl Into<String>,
    phone: impl Into<String>,
  ) -> Self {
    Self {
      id,
      name: name.into(),
      phone: phone.into(),
      email: None,
      profile_image: None,
      favorite: None,
    }
  }

  pub(crate) fn into_contact(self) -> Contact {
    Contact {
      id:            self.id,
      name:          self.name,
      phone:         self.phone,
      email:         self.email,
      profile_image: self.profile_image,
      favorite:      self.favorite.unwrap_or(false),
    }
  }
}

impl From<Contact> for NewContact {
  fn from(c: Contact) -> Self {
    NewContact {
      id:            c.id,
      name:          c.name,
      phone:         c.phone,
      email:         c.email,
      profile_image: c.profile_image,
      favorite:      Some(c.favorite),
    }
  }
}

// ─── ContactDraft ────────────────────────────────────────────────────────────

/// A contact as entered by a user, before the address book assigns an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
  pub name:          String,
  pub phone:         String,
  #[serde(default)]
  pub email:         Option<String>,
  #[serde(default)]
  pub profile_image: Option<String>,
  #[serde(default)]
  pub favorite:      Option<bool>,
}

impl ContactDraft {
  pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      phone: phone.into(),
      ..Self::default()
    }
  }

  /// Attach an id, producing the input expected by the store.
  pub fn with_id(self, id: ContactId) -> NewContact {
    NewContact {
      id,
      name: self.name,
      phone: self.phone,
      email: blank_to_none(self.email),
      profile_image: blank_to_none(self.profile_image),
      favorite: self.favorite,
    }
  }
}

// ─── ContactPatch ────────────────────────────────────────────────────────────

/// Partial update for [`crate::store::ContactStore::update`].
///
/// For `email` and `profile_image`, `None` leaves the field alone and
/// `Some(None)` clears it. In JSON an explicit `null` clears and an absent key
/// leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:         Option<String>,
  #[serde(
    default,
    deserialize_with = "present",
    skip_serializing_if = "Option::is_none"
  )]
  pub email:         Option<Option<String>>,
  #[serde(
    default,
    deserialize_with = "present",
    skip_serializing_if = "Option::is_none"
  )]
  pub profile_image: Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub favorite:      Option<bool>,
}

impl ContactPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

/// Marks a key that was present in the input, even if its value was `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

/// Form fields arrive as empty strings when left blank.
fn blank_to_none(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
