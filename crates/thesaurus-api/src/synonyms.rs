//! Handlers for synonym endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/synonym/{word}` | Body: `{"synonym":"shadowy"}`; creates missing words |
//! | `GET`  | `/synonyms/{word}` | Out-edges; 404 if the word is unknown |
//! | `GET`  | `/words/{synonym}` | In-edges; 404 if the word is unknown |

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use thesaurus_core::{
  store::SynonymGraph,
  synonym::{Synonyms, WordsForSynonym},
  word::Word,
};

use crate::{
  ApiState,
  error::ApiError,
  words::{parse_body, parse_word},
};

// ─── Link ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LinkBody {
  pub synonym: String,
}

#[derive(Debug, Serialize)]
pub struct Linked {
  pub id: i64,
}

/// `POST /synonym/{word}`, body `{"synonym":"shadowy"}`
///
/// Both words are validated before anything is written; missing words are
/// then created.
pub async fn link<S>(
  State(state): State<ApiState<S>>,
  Path(word): Path<String>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: SynonymGraph,
{
  let word = parse_word(&word, "Invalid word value")?;
  let body: LinkBody = parse_body(&body)?;
  let synonym = parse_word(&body.synonym, "Invalid synonym value")?;

  if word == synonym && !state.policy.allow_self_links {
    return Err(ApiError::BadRequest("A word cannot be its own synonym".to_owned()));
  }

  let word = state.store.get_or_create(word).await.map_err(ApiError::store)?;
  let synonym = state.store.get_or_create(synonym).await.map_err(ApiError::store)?;

  let edge = state
    .store
    .add_edge(word.id, synonym.id)
    .await
    .map_err(ApiError::store_or_conflict("Synonym link already exists"))?;

  tracing::info!(id = edge.id, word = %word.text, synonym = %synonym.text, "synonym linked");
  Ok((StatusCode::CREATED, Json(Linked { id: edge.id })))
}

// ─── Lookups ──────────────────────────────────────────────────────────────────

async fn resolve<S>(state: &ApiState<S>, raw: &str, invalid: &str) -> Result<Word, ApiError>
where
  S: SynonymGraph,
{
  let text = parse_word(raw, invalid)?;
  state
    .store
    .find(&text)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("Word does not exist".to_owned()))
}

/// `GET /synonyms/{word}`
pub async fn synonyms_of<S>(
  State(state): State<ApiState<S>>,
  Path(word): Path<String>,
) -> Result<Json<Synonyms>, ApiError>
where
  S: SynonymGraph,
{
  let word = resolve(&state, &word, "Invalid word value").await?;
  tracing::debug!(word = %word.text, "synonyms lookup");
  let synonyms = state.store.synonyms_of(&word).await.map_err(ApiError::store)?;
  Ok(Json(synonyms))
}

/// `GET /words/{synonym}`
pub async fn words_for_synonym<S>(
  State(state): State<ApiState<S>>,
  Path(synonym): Path<String>,
) -> Result<Json<WordsForSynonym>, ApiError>
where
  S: SynonymGraph,
{
  let synonym = resolve(&state, &synonym, "Invalid synonym value").await?;
  tracing::debug!(synonym = %synonym.text, "reverse synonyms lookup");
  let words = state
    .store
    .words_for_synonym(&synonym)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(words))
}
