//! Handlers for word endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/word` | Body: `{"word":"Funny"}`; 409 if it exists |
//! | `GET`  | `/words` | Every stored word |

use axum::{
  Json,
  body::Bytes,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, de::DeserializeOwned};
use thesaurus_core::{store::SynonymGraph, word::WordText};

use crate::{ApiState, error::ApiError};

/// Validate and lowercase a word from a request, answering 400 with
/// `message` if it is not 1 to 50 ASCII letters.
pub(crate) fn parse_word(raw: &str, message: &str) -> Result<WordText, ApiError> {
  WordText::parse(raw).map_err(|_| ApiError::BadRequest(message.to_owned()))
}

/// Decode a JSON request body.
///
/// Bodies are read as raw bytes so that requests without a Content-Type
/// header are still accepted.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
  serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub word: String,
}

/// `POST /word`, body `{"word":"funny"}`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: SynonymGraph,
{
  let body: CreateBody = parse_body(&body)?;
  let text = parse_word(&body.word, "Invalid word value")?;

  if state.store.find(&text).await.map_err(ApiError::store)?.is_some() {
    return Err(ApiError::Conflict("Word already exists".to_owned()));
  }

  // A concurrent insert between the check and here still lands as 409.
  let word = state
    .store
    .add(text)
    .await
    .map_err(ApiError::store_or_conflict("Word already exists"))?;

  tracing::info!(id = word.id, word = %word.text, "word added");
  Ok((StatusCode::CREATED, Json(word)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /words`
pub async fn list<S>(State(state): State<ApiState<S>>) -> Result<Json<Vec<WordText>>, ApiError>
where
  S: SynonymGraph,
{
  let words = state.store.list_all().await.map_err(ApiError::store)?;
  Ok(Json(words))
}
