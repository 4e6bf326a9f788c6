//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | Optional `?q=`; favorites first, then by name |
//! | `POST`   | `/contacts` | Body: [`ContactDraft`]; returns 201 + stored contact |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `PATCH`  | `/contacts/:id` | Body: [`ContactPatch`]; returns updated contact |
//! | `DELETE` | `/contacts/:id` | 204, or 404 if not found |
//! | `POST`   | `/contacts/:id/favorite` | Toggle; returns updated contact |

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use rolodex_core::{
  contact::{Contact, ContactDraft, ContactId, ContactPatch},
  snapshot::SnapshotStore,
};
use serde::Deserialize;

use crate::{
  SharedBook,
  error::ApiError,
  extract::{JsonBody, PathParams, QueryParams},
};

fn require_name(name: &str) -> Result<(), ApiError> {
  if name.trim().is_empty() {
    return Err(ApiError::InvalidContact("name must not be empty"));
  }
  Ok(())
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Matched case-insensitively against names and verbatim against phones.
  #[serde(default)]
  pub q: String,
}

/// `GET /contacts[?q=<query>]`
pub async fn list<S>(
  State(book): State<SharedBook<S>>,
  QueryParams(params): QueryParams<ListParams>,
) -> Json<Vec<Contact>>
where
  S: SnapshotStore,
{
  let mut book = book.lock().await;
  book.set_query(&params.q);
  Json(book.listing())
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(book): State<SharedBook<S>>,
  JsonBody(draft): JsonBody<ContactDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnapshotStore,
{
  require_name(&draft.name)?;
  let contact = book.lock().await.create(draft).await?;
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(book): State<SharedBook<S>>,
  PathParams(id): PathParams<ContactId>,
) -> Result<Json<Contact>, ApiError>
where
  S: SnapshotStore,
{
  let contact = book
    .lock()
    .await
    .store()
    .get_by_id(id)
    .ok_or(ApiError::ContactNotFound(id))?;
  Ok(Json(contact))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PATCH /contacts/:id` — absent keys are kept, `null` clears optional ones.
pub async fn update<S>(
  State(book): State<SharedBook<S>>,
  PathParams(id): PathParams<ContactId>,
  JsonBody(patch): JsonBody<ContactPatch>,
) -> Result<Json<Contact>, ApiError>
where
  S: SnapshotStore,
{
  if let Some(name) = &patch.name {
    require_name(name)?;
  }

  let mut book = book.lock().await;
  if !book.edit(id, patch).await? {
    return Err(ApiError::ContactNotFound(id));
  }
  let contact = book.store().get_by_id(id).ok_or(ApiError::ContactNotFound(id))?;
  Ok(Json(contact))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn delete_one<S>(
  State(book): State<SharedBook<S>>,
  PathParams(id): PathParams<ContactId>,
) -> Result<StatusCode, ApiError>
where
  S: SnapshotStore,
{
  if !book.lock().await.remove(id).await? {
    return Err(ApiError::ContactNotFound(id));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Favorite ─────────────────────────────────────────────────────────────────

/// `POST /contacts/:id/favorite`
pub async fn toggle_favorite<S>(
  State(book): State<SharedBook<S>>,
  PathParams(id): PathParams<ContactId>,
) -> Result<Json<Contact>, ApiError>
where
  S: SnapshotStore,
{
  let mut book = book.lock().await;
  if !book.toggle_favorite(id).await? {
    return Err(ApiError::ContactNotFound(id));
  }
  let contact = book.store().get_by_id(id).ok_or(ApiError::ContactNotFound(id))?;
  Ok(Json(contact))
}
