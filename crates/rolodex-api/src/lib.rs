//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] over a shared [`AddressBook`] backed by any
//! [`SnapshotStore`]. All requests are serialised through one async mutex, so
//! the book sees a single reader/writer at a time. TLS and auth are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rolodex_api::api_router(book.clone()))
//! ```

pub mod contacts;
pub mod error;
pub mod extract;
pub mod overview;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use rolodex_core::{book::AddressBook, snapshot::SnapshotStore};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// The address book as shared between handlers.
pub type SharedBook<S> = Arc<Mutex<AddressBook<S>>>;

/// Wrap `book` for use with [`api_router`].
pub fn share<S>(book: AddressBook<S>) -> SharedBook<S> { Arc::new(Mutex::new(book)) }

/// Build a fully-materialised API router for `book`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(book: SharedBook<S>) -> Router<()>
where
  S: SnapshotStore + 'static,
{
  Router::new()
    // Contacts
    .route(
      "/contacts",
      get(contacts::list::<S>).post(contacts::create::<S>),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .patch(contacts::update::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .route("/contacts/{id}/favorite", post(contacts::toggle_favorite::<S>))
    // Whole book
    .route("/stats", get(overview::stats::<S>))
    .route("/sort/toggle", post(overview::toggle_sort::<S>))
    .route("/export", get(overview::export::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(book)
}

// ─── Integration tests ────────────────────────────────────────────────────────
