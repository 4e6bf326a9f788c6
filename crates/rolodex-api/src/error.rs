//! [`ApiError`]: every failure a handler can report, rendered as
//! `{"error": "<message>"}` with a matching status code.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use rolodex_core::{book::AddressBookError, contact::ContactId};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("contact {0} not found")]
  ContactNotFound(ContactId),

  /// The request was well-formed but the contact it describes is not.
  #[error("{0}")]
  InvalidContact(&'static str),

  /// An extractor could not make sense of the path, query or body.
  #[error("{message}")]
  Rejected { status: StatusCode, message: String },

  #[error(transparent)]
  Core(#[from] rolodex_core::Error),

  #[error("could not save contacts: {0}")]
  Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  fn status(&self) -> StatusCode {
    match self {
      Self::ContactNotFound(_) => StatusCode::NOT_FOUND,
      Self::InvalidContact(_) => StatusCode::BAD_REQUEST,
      Self::Rejected { status, .. } => *status,
      Self::Core(rolodex_core::Error::DuplicateId(_) | rolodex_core::Error::IdsExhausted) => {
        StatusCode::CONFLICT
      }
      Self::Core(rolodex_core::Error::Serialization(_)) | Self::Persistence(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl<E> From<AddressBookError<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: AddressBookError<E>) -> Self {
    match e {
      AddressBookError::Core(e) => Self::Core(e),
      AddressBookError::Persistence(e) => Self::Persistence(Box::new(e)),
    }
  }
}

macro_rules! from_rejection {
  ($($rejection:ty),*) => {$(
    impl From<$rejection> for ApiError {
      fn from(rejection: $rejection) -> Self {
        Self::Rejected {
          status:  rejection.status(),
          message: rejection.body_text(),
        }
      }
    }
  )*};
}

from_rejection!(JsonRejection, PathRejection, QueryRejection);

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
