//! [`ContactStore`] — the ordered, in-memory collection of contact records.
//!
//! Records keep insertion order unless [`ContactStore::reverse`] is called.
//! Every lookup is a linear scan; the record set is expected to stay in the
//! tens to low hundreds. The store performs no I/O and knows nothing about
//! persistence or presentation; see [`crate::book::AddressBook`] for the
//! layer that composes it with a [`crate::snapshot::SnapshotStore`].

use crate::{
  Error, Result,
  contact::{Contact, ContactId, ContactPatch, NewContact},
};

/// Ordered collection of contacts with CRUD, search and favorite operations.
///
/// Reads hand out independent copies, so callers can never alias the
/// records held by the store.
#[derive(Debug, Clone, Default)]
pub struct ContactStore {
  contacts: Vec<Contact>,
}

impl ContactStore {
  pub fn new() -> Self { Self::default() }

  /// Number of stored records.
  pub fn len(&self) -> usize { self.contacts.len() }

  pub fn is_empty(&self) -> bool { self.contacts.is_empty() }

  /// Borrowing traversal in the current order.
  pub fn iter(&self) -> impl Iterator<Item = &Contact> { self.contacts.iter() }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Append a record at the tail and return its id.
  ///
  /// A missing `favorite` flag is stored as `false`. Ids are assigned by the
  /// caller; reusing one that is already stored is rejected and leaves the
  /// store untouched.
  pub fn add(&mut self, record: NewContact) -> Result<ContactId> {
    if self.position(record.id).is_some() {
      return Err(Error::DuplicateId(record.id));
    }
    let contact = record.into_contact();
    let id = contact.id;
    self.contacts.push(contact);
    Ok(id)
  }

  /// Merge `patch` over the record with `id`. Returns `false` (and changes
  /// nothing) when no such record exists.
  pub fn update(&mut self, id: ContactId, patch: ContactPatch) -> bool {
    match self.find_mut(id) {
      Some(contact) => {
        contact.apply(patch);
        true
      }
      None => false,
    }
  }

  /// Unlink the record with `id`. Returns `false` when the store is empty or
  /// the id is absent.
  pub fn delete(&mut self, id: ContactId) -> bool {
    match self.position(id) {
      Some(idx) => {
        self.contacts.remove(idx);
        true
      }
      None => false,
    }
  }

  /// Flip the `favorite` flag of the record with `id`.
  pub fn toggle_favorite(&mut self, id: ContactId) -> bool {
    match self.find_mut(id) {
      Some(contact) => {
        contact.favorite = !contact.favorite;
        true
      }
      None => false,
    }
  }

  /// Reverse the traversal order in place.
  pub fn reverse(&mut self) { self.contacts.reverse(); }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Copies of every record, in traversal order.
  pub fn get_all(&self) -> Vec<Contact> { self.contacts.clone() }

  pub fn get_by_id(&self, id: ContactId) -> Option<Contact> {
    self.contacts.iter().find(|c| c.id == id).cloned()
  }

  /// Records whose name contains `query` case-insensitively, or whose phone
  /// contains it verbatim. An empty query returns everything.
  pub fn search(&self, query: &str) -> Vec<Contact> {
    if query.is_empty() {
      return self.get_all();
    }

    let needle = query.to_lowercase();
    self
      .contacts
      .iter()
      .filter(|c| {
        c.name.to_lowercase().contains(&needle) || c.phone.contains(query)
      })
      .cloned()
      .collect()
  }

  pub fn favorites_count(&self) -> usize {
    self.contacts.iter().filter(|c| c.favorite).count()
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  fn position(&self, id: ContactId) -> Option<usize> {
    self.contacts.iter().position(|c| c.id == id)
  }

  fn find_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
    self.contacts.iter_mut().find(|c| c.id == id)
  }
}
