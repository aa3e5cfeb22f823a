//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error leaves the service as `{"statusCode": <u16>, "error": <msg>}`.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thesaurus_core::{ErrorKind, store::StoreError};
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unsupported media type: {0}")]
  UnsupportedMediaType(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store failure onto a response by its [`ErrorKind`].
  pub fn store<E: StoreError>(err: E) -> Self {
    match err.kind() {
      ErrorKind::InvalidInput => ApiError::BadRequest(err.to_string()),
      ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
      ErrorKind::Conflict => ApiError::Conflict(err.to_string()),
      ErrorKind::Storage => ApiError::Store(Box::new(err)),
    }
  }

  /// Like [`ApiError::store`], but answers uniqueness violations with
  /// `message` instead of the backend's wording.
  pub fn store_or_conflict<E: StoreError>(message: &str) -> impl FnOnce(E) -> Self + '_ {
    move |err| match err.kind() {
      ErrorKind::Conflict => ApiError::Conflict(message.to_owned()),
      _ => ApiError::store(err),
    }
  }

  fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
  status_code: u16,
  error:       String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match self {
      ApiError::BadRequest(m)
      | ApiError::NotFound(m)
      | ApiError::Conflict(m)
      | ApiError::UnsupportedMediaType(m) => m,
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        status
          .canonical_reason()
          .unwrap_or("Internal Server Error")
          .to_owned()
      }
    };
    let body = ErrorBody { status_code: status.as_u16(), error: message };
    (status, Json(body)).into_response()
  }
}
