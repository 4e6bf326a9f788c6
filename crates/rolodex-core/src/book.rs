//! [`AddressBook`] — composes a [`ContactStore`] with a [`SnapshotStore`].
//!
//! Every mutating call goes store → snapshot → persistence, in that order,
//! before returning, so the saved snapshot never lags behind what a view
//! renders from [`AddressBook::listing`]. Toggling the sort direction is the
//! one exception: it reorders the store but is only persisted by the next
//! mutation (or an explicit [`AddressBook::save`]).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
  contact::{Contact, ContactDraft, ContactId, ContactPatch, NewContact},
  snapshot::{Snapshot, SnapshotStore, next_id_after, sample_contacts},
  store::ContactStore,
};

// ─── Error ───────────────────────────────────────────────────────────────────

/// Failure of an [`AddressBook`] operation. `E` is the persistence backend's
/// error type.
#[derive(Debug, Error)]
pub enum AddressBookError<E> {
  #[error(transparent)]
  Core(#[from] crate::Error),

  #[error("persistence error: {0}")]
  Persistence(#[source] E),
}

pub type BookResult<T, E> = std::result::Result<T, AddressBookError<E>>;

// ─── Presentation state ──────────────────────────────────────────────────────

/// Name ordering used by [`AddressBook::listing`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
  #[default]
  Asc,
  Desc,
}

impl SortDirection {
  pub fn toggled(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }
}

/// Totals shown alongside the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
  pub total:     usize,
  pub favorites: usize,
}

/// Order `contacts` for display: favorites first, then by name
/// (case-insensitive) in `direction`. Ties keep their current order.
pub fn sort_for_display(contacts: &mut [Contact], direction: SortDirection) {
  contacts.sort_by(|a, b| {
    b.favorite.cmp(&a.favorite).then_with(|| {
      let by_name = compare_names(&a.name, &b.name);
      match direction {
        SortDirection::Asc => by_name,
        SortDirection::Desc => by_name.reverse(),
      }
    })
  });
}

fn compare_names(a: &str, b: &str) -> Ordering {
  a.to_lowercase()
    .cmp(&b.to_lowercase())
    .then_with(|| a.cmp(b))
}

// ─── AddressBook ─────────────────────────────────────────────────────────────

/// The in-memory store, its persistence backend, and the view state that the
/// front ends share (next id, sort direction, current search query).
#[derive(Debug)]
pub struct AddressBook<P> {
  store:       ContactStore,
  persistence: P,
  next_id:     ContactId,
  direction:   SortDirection,
  query:       String,
}

impl<P: SnapshotStore> AddressBook<P> {
  /// Load the saved snapshot from `persistence`.
  ///
  /// With nothing saved, the book starts with the sample contacts when
  /// `seed_samples` is set, or empty otherwise. Seeded samples are not
  /// written back until the first mutation.
  pub async fn open(persistence: P, seed_samples: bool) -> BookResult<Self, P::Error> {
    let saved = persistence
      .load()
      .await
      .map_err(AddressBookError::Persistence)?;

    let mut book = Self {
      store: ContactStore::new(),
      persistence,
      next_id: 0,
      direction: SortDirection::default(),
      query: String::new(),
    };

    match saved {
      Some(snapshot) => book.restore(snapshot),
      None if seed_samples => {
        book.restore(Snapshot {
          next_id:  0,
          contacts: sample_contacts(),
        });
        info!(count = book.store.len(), "seeded sample contacts");
      }
      None => debug!("no saved snapshot; starting empty"),
    }

    Ok(book)
  }

  /// Add each record in stored order. The counter is raised past the largest
  /// stored id if the saved one lags behind.
  fn restore(&mut self, snapshot: Snapshot) {
    let Snapshot { contacts, next_id } = snapshot;
    for contact in contacts {
      let id = contact.id;
      if let Err(e) = self.store.add(NewContact::from(contact)) {
        warn!(id, error = %e, "skipping stored contact");
      }
    }
    self.next_id = next_id.max(next_id_after(&self.store.get_all()));
    if self.next_id == ContactId::MAX {
      warn!("id counter is exhausted; new contacts cannot be created");
    }
    debug!(count = self.store.len(), next_id = self.next_id, "restored snapshot");
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn store(&self) -> &ContactStore { &self.store }

  pub fn persistence(&self) -> &P { &self.persistence }

  pub fn next_id(&self) -> ContactId { self.next_id }

  pub fn direction(&self) -> SortDirection { self.direction }

  pub fn query(&self) -> &str { &self.query }

  // ── Mutations (each persists on success) ──────────────────────────────────

  /// Assign the next id to `draft`, store it, and persist.
  ///
  /// Fails with [`crate::Error::IdsExhausted`] once the counter has reached
  /// `ContactId::MAX`, leaving the store untouched.
  pub async fn create(&mut self, draft: ContactDraft) -> BookResult<Contact, P::Error> {
    let id = self.next_id;
    let next_id = id.checked_add(1).ok_or(crate::Error::IdsExhausted)?;
    let record = draft.with_id(id);
    let contact = record.clone().into_contact();

    self.store.add(record)?;
    self.next_id = next_id;
    self.save().await?;

    info!(id, name = %contact.name, "created contact");
    Ok(contact)
  }

  /// Merge `patch` into the contact with `id`. `false` if there is none.
  pub async fn edit(&mut self, id: ContactId, patch: ContactPatch) -> BookResult<bool, P::Error> {
    if !self.store.update(id, patch) {
      debug!(id, "edit: no such contact");
      return Ok(false);
    }
    self.save().await?;
    info!(id, "updated contact");
    Ok(true)
  }

  pub async fn remove(&mut self, id: ContactId) -> BookResult<bool, P::Error> {
    if !self.store.delete(id) {
      debug!(id, "remove: no such contact");
      return Ok(false);
    }
    self.save().await?;
    info!(id, "deleted contact");
    Ok(true)
  }

  pub async fn toggle_favorite(&mut self, id: ContactId) -> BookResult<bool, P::Error> {
    if !self.store.toggle_favorite(id) {
      debug!(id, "toggle_favorite: no such contact");
      return Ok(false);
    }
    self.save().await?;
    info!(id, "toggled favorite");
    Ok(true)
  }

  /// Flip the sort direction and reverse the store to match.
  pub fn toggle_sort(&mut self) -> SortDirection {
    self.direction = self.direction.toggled();
    self.store.reverse();
    debug!(direction = %self.direction, "toggled sort");
    self.direction
  }

  /// Persist the current snapshot.
  pub async fn save(&self) -> BookResult<(), P::Error> {
    self
      .persistence
      .save(&self.snapshot())
      .await
      .map_err(AddressBookError::Persistence)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// Remember `query` (trimmed) for subsequent [`Self::listing`] calls.
  pub fn set_query(&mut self, query: &str) { self.query = query.trim().to_owned(); }

  /// Contacts matching the current query, in display order.
  pub fn listing(&self) -> Vec<Contact> {
    let mut contacts = self.store.search(&self.query);
    sort_for_display(&mut contacts, self.direction);
    contacts
  }

  pub fn stats(&self) -> Stats {
    Stats {
      total:     self.store.len(),
      favorites: self.store.favorites_count(),
    }
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      contacts: self.store.get_all(),
      next_id:  self.next_id,
    }
  }
}
