//! Handlers for whole-book endpoints: totals, sort order and export.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/stats` | `{"total": n, "favorites": n}` |
//! | `POST` | `/sort/toggle` | Flips name ordering; returns `{"direction": "asc"\|"desc"}` |
//! | `GET`  | `/export` | Saves, then returns the snapshot as `contacts.json` |

use axum::{
  Json,
  extract::State,
  http::header,
  response::IntoResponse,
};
use rolodex_core::{
  book::{SortDirection, Stats},
  snapshot::{SUGGESTED_FILE_NAME, SnapshotStore},
};
use serde::Serialize;

use crate::{SharedBook, error::ApiError};

/// `GET /stats`
pub async fn stats<S>(State(book): State<SharedBook<S>>) -> Json<Stats>
where
  S: SnapshotStore,
{
  Json(book.lock().await.stats())
}

#[derive(Debug, Serialize)]
pub struct SortBody {
  pub direction: SortDirection,
}

/// `POST /sort/toggle`
pub async fn toggle_sort<S>(State(book): State<SharedBook<S>>) -> Json<SortBody>
where
  S: SnapshotStore,
{
  let direction = book.lock().await.toggle_sort();
  Json(SortBody { direction })
}

/// `GET /export` — the same payload a file export writes, as a download.
pub async fn export<S>(
  State(book): State<SharedBook<S>>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SnapshotStore,
{
  let book = book.lock().await;
  book.save().await?;
  let body = book.snapshot().to_pretty_json()?;

  Ok((
    [
      (header::CONTENT_TYPE, "application/json".to_owned()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{SUGGESTED_FILE_NAME}\""),
      ),
    ],
    body,
  ))
}
