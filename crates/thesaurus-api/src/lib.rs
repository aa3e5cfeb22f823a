//! JSON REST API for the thesaurus.
//!
//! Exposes an axum [`Router`] backed by any
//! [`thesaurus_core::store::SynonymGraph`]. CORS, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", thesaurus_api::api_router(store.clone(), GraphPolicy::default()))
//! ```

pub mod content_type;
pub mod error;
pub mod synonyms;
pub mod words;

use std::sync::Arc;

use axum::{
  Router, middleware,
  routing::{get, post},
};
use thesaurus_core::store::SynonymGraph;

pub use error::ApiError;

/// Rules the HTTP layer applies on top of the store.
#[derive(Debug, Clone, Copy)]
pub struct GraphPolicy {
  /// Whether `POST /synonym/{w}` may link `w` to itself.
  pub allow_self_links: bool,
}

impl Default for GraphPolicy {
  fn default() -> Self { Self { allow_self_links: true } }
}

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:  Arc<S>,
  pub policy: GraphPolicy,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), policy: self.policy }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, policy: GraphPolicy) -> Router<()>
where
  S: SynonymGraph + 'static,
{
  Router::new()
    // Words
    .route("/word", post(words::create::<S>))
    .route("/words", get(words::list::<S>))
    // Synonyms
    .route("/synonym/{word}", post(synonyms::link::<S>))
    .route("/synonyms/{word}", get(synonyms::synonyms_of::<S>))
    .route("/words/{synonym}", get(synonyms::words_for_synonym::<S>))
    .fallback(|| async { ApiError::NotFound("Not Found".to_owned()) })
    .layer(middleware::from_fn(content_type::enforce_json))
    .with_state(ApiState { store, policy })
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use thesaurus_core::{
    ErrorKind,
    store::{StoreError, WordStore},
    synonym::{SynonymEdge, Synonyms, WordsForSynonym},
    word::{Word, WordId, WordText},
  };
  use thesaurus_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_router(policy: GraphPolicy) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store), policy)
  }

  async fn router() -> Router { make_router(GraphPolicy::default()).await }

  async fn send(
    router:  &Router,
    method:  &str,
    uri:     &str,
    headers: Vec<(header::HeaderName, &str)>,
    body:    &str,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn post_json(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
      router,
      "POST",
      uri,
      vec![(header::CONTENT_TYPE, "application/json")],
      &body.to_string(),
    )
    .await
  }

  async fn get_json(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, vec![], "").await
  }

  // ── POST /word ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn add_word_returns_201_with_lowercased_word() {
    let r = router().await;
    let (status, body) = post_json(&r, "/word", json!({ "word": "Funny" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1, "word": "funny" }));
  }

  #[tokio::test]
  async fn add_word_twice_case_insensitively_returns_409() {
    let r = router().await;
    post_json(&r, "/word", json!({ "word": "Funny" })).await;
    let (status, body) = post_json(&r, "/word", json!({ "word": "funny" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "statusCode": 409, "error": "Word already exists" }));
  }

  #[tokio::test]
  async fn add_word_with_digits_returns_400() {
    let r = router().await;
    let (status, body) = post_json(&r, "/word", json!({ "word": "a1b2" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["error"], "Invalid word value");
  }

  #[tokio::test]
  async fn add_word_too_long_returns_400() {
    let r = router().await;
    let long = "a".repeat(51);
    let (status, _) = post_json(&r, "/word", json!({ "word": long })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn add_word_with_broken_json_returns_400() {
    let r = router().await;
    let (status, body) = send(
      &r,
      "POST",
      "/word",
      vec![(header::CONTENT_TYPE, "application/json")],
      "{\"word\":",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusCode"], 400);
  }

  #[tokio::test]
  async fn add_word_without_content_type_is_accepted() {
    let r = router().await;
    let (status, _) = send(&r, "POST", "/word", vec![], r#"{"word":"plain"}"#).await;
    assert_eq!(status, StatusCode::CREATED);
  }

  // ── GET /words ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_words() {
    let r = router().await;
    let (status, body) = get_json(&r, "/words").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    post_json(&r, "/word", json!({ "word": "dark" })).await;
    post_json(&r, "/word", json!({ "word": "Shadowy" })).await;

    let (_, body) = get_json(&r, "/words").await;
    let mut words: Vec<String> = serde_json::from_value(body).unwrap();
    words.sort();
    assert_eq!(words, vec!["dark", "shadowy"]);
  }

  // ── Synonyms ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn dark_and_shadowy_scenario() {
    let r = router().await;
    post_json(&r, "/word", json!({ "word": "dark" })).await;
    post_json(&r, "/word", json!({ "word": "shadowy" })).await;

    let (status, body) = post_json(&r, "/synonym/dark", json!({ "synonym": "shadowy" })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_i64(), "body: {body}");

    let (status, body) = get_json(&r, "/synonyms/dark").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "word": "dark", "synonyms": ["shadowy"] }));

    let (status, body) = get_json(&r, "/words/shadowy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "synonym": "shadowy", "words": ["dark"] }));

    let (status, body) = get_json(&r, "/synonyms/shadowy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "word": "shadowy", "synonyms": [] }));
  }

  #[tokio::test]
  async fn link_creates_missing_words() {
    let r = router().await;
    let (status, _) = post_json(&r, "/synonym/Happy", json!({ "synonym": "Glad" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get_json(&r, "/words").await;
    let mut words: Vec<String> = serde_json::from_value(body).unwrap();
    words.sort();
    assert_eq!(words, vec!["glad", "happy"]);

    let (_, body) = get_json(&r, "/synonyms/happy").await;
    assert_eq!(body, json!({ "word": "happy", "synonyms": ["glad"] }));
  }

  #[tokio::test]
  async fn duplicate_link_returns_409() {
    let r = router().await;
    post_json(&r, "/synonym/dark", json!({ "synonym": "dim" })).await;
    let (status, body) = post_json(&r, "/synonym/DARK", json!({ "synonym": "Dim" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "statusCode": 409, "error": "Synonym link already exists" }));
  }

  #[tokio::test]
  async fn reverse_link_is_not_a_duplicate() {
    let r = router().await;
    post_json(&r, "/synonym/dark", json!({ "synonym": "dim" })).await;
    let (status, _) = post_json(&r, "/synonym/dim", json!({ "synonym": "dark" })).await;
    assert_eq!(status, StatusCode::CREATED);
  }

  #[tokio::test]
  async fn invalid_link_writes_nothing() {
    let r = router().await;

    let (status, body) = post_json(&r, "/synonym/dark", json!({ "synonym": "d1m" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid synonym value");

    let (status, _) = post_json(&r, "/synonym/d4rk", json!({ "synonym": "dim" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&r, "/synonym/dark", json!({ "wrong": "dim" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get_json(&r, "/words").await;
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn self_link_allowed_by_default() {
    let r = router().await;
    let (status, _) = post_json(&r, "/synonym/echo", json!({ "synonym": "Echo" })).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = get_json(&r, "/synonyms/echo").await;
    assert_eq!(body, json!({ "word": "echo", "synonyms": ["echo"] }));
  }

  #[tokio::test]
  async fn self_link_rejected_when_disallowed() {
    let r = make_router(GraphPolicy { allow_self_links: false }).await;
    let (status, body) = post_json(&r, "/synonym/echo", json!({ "synonym": "Echo" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "A word cannot be its own synonym");

    let (status, _) = post_json(&r, "/synonym/echo", json!({ "synonym": "repeat" })).await;
    assert_eq!(status, StatusCode::CREATED);
  }

  #[tokio::test]
  async fn lookups_normalise_case() {
    let r = router().await;
    post_json(&r, "/synonym/dark", json!({ "synonym": "shadowy" })).await;

    let (status, body) = get_json(&r, "/synonyms/DARK").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["word"], "dark");

    let (status, body) = get_json(&r, "/words/Shadowy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["words"], json!(["dark"]));
  }

  #[tokio::test]
  async fn lookup_of_unknown_word_returns_404() {
    let r = router().await;
    let (status, body) = get_json(&r, "/synonyms/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusCode"], 404);

    let (status, _) = get_json(&r, "/words/ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Lookups never create.
    let (_, body) = get_json(&r, "/words").await;
    assert_eq!(body, json!([]));
  }

  #[tokio::test]
  async fn lookup_of_invalid_word_returns_400() {
    let r = router().await;
    let (status, _) = get_json(&r, "/synonyms/a1b2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get_json(&r, "/words/a1b2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Content-Type enforcement ────────────────────────────────────────────────

  #[tokio::test]
  async fn non_json_content_type_returns_415() {
    let r = router().await;
    let (status, body) = send(
      &r,
      "POST",
      "/word",
      vec![(header::CONTENT_TYPE, "text/plain")],
      r#"{"word":"dark"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["error"], "Content-Type header must be application/json");
  }

  #[tokio::test]
  async fn malformed_content_type_returns_400() {
    let r = router().await;
    let (status, body) =
      send(&r, "GET", "/words", vec![(header::CONTENT_TYPE, "not a type")], "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Malformed Content-Type header");
  }

  #[tokio::test]
  async fn json_content_type_with_charset_is_accepted() {
    let r = router().await;
    let (status, _) = send(
      &r,
      "POST",
      "/word",
      vec![(header::CONTENT_TYPE, "application/json; charset=utf-8")],
      r#"{"word":"dark"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
  }

  #[tokio::test]
  async fn unknown_route_returns_404_envelope() {
    let r = router().await;
    let (status, body) = get_json(&r, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "statusCode": 404, "error": "Not Found" }));
  }

  // ── Insert races ────────────────────────────────────────────────────────────

  // Reports every word as unseen, as if another request inserted it between
  // the existence check and the insert.
  struct Racy(SqliteStore);

  type SqliteError = thesaurus_store_sqlite::error::Error;

  impl WordStore for Racy {
    type Error = SqliteError;
    async fn add(&self, text: WordText) -> Result<Word, SqliteError> { self.0.add(text).await }
    async fn find(&self, _: &WordText) -> Result<Option<Word>, SqliteError> { Ok(None) }
    async fn find_by_id(&self, id: WordId) -> Result<Option<Word>, SqliteError> {
      self.0.find_by_id(id).await
    }
    async fn get_or_create(&self, text: WordText) -> Result<Word, SqliteError> {
      self.0.get_or_create(text).await
    }
    async fn list_all(&self) -> Result<Vec<WordText>, SqliteError> { self.0.list_all().await }
  }

  impl SynonymGraph for Racy {
    async fn add_edge(
      &self,
      word_id: WordId,
      synonym_id: WordId,
    ) -> Result<SynonymEdge, SqliteError> {
      self.0.add_edge(word_id, synonym_id).await
    }
    async fn synonyms_of(&self, word: &Word) -> Result<Synonyms, SqliteError> {
      self.0.synonyms_of(word).await
    }
    async fn words_for_synonym(&self, word: &Word) -> Result<WordsForSynonym, SqliteError> {
      self.0.words_for_synonym(word).await
    }
  }

  #[tokio::test]
  async fn add_word_losing_insert_race_returns_409() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.add(WordText::parse("dark").unwrap()).await.unwrap();
    let r = api_router(Arc::new(Racy(store)), GraphPolicy::default());

    let (status, body) = post_json(&r, "/word", json!({ "word": "Dark" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "statusCode": 409, "error": "Word already exists" }));

    let (status, body) = get_json(&r, "/words").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["dark"]));
  }

  // ── Storage failures ────────────────────────────────────────────────────────

  #[derive(Debug, thiserror::Error)]
  #[error("disk unavailable")]
  struct Broken;

  impl StoreError for Broken {
    fn kind(&self) -> ErrorKind { ErrorKind::Storage }
  }

  // A store whose every operation fails.
  struct BrokenStore;

  impl WordStore for BrokenStore {
    type Error = Broken;
    async fn add(&self, _: WordText) -> Result<Word, Broken> { Err(Broken) }
    async fn find(&self, _: &WordText) -> Result<Option<Word>, Broken> { Err(Broken) }
    async fn find_by_id(&self, _: WordId) -> Result<Option<Word>, Broken> { Err(Broken) }
    async fn get_or_create(&self, _: WordText) -> Result<Word, Broken> { Err(Broken) }
    async fn list_all(&self) -> Result<Vec<WordText>, Broken> { Err(Broken) }
  }

  impl SynonymGraph for BrokenStore {
    async fn add_edge(&self, _: WordId, _: WordId) -> Result<SynonymEdge, Broken> { Err(Broken) }
    async fn synonyms_of(&self, _: &Word) -> Result<Synonyms, Broken> { Err(Broken) }
    async fn words_for_synonym(&self, _: &Word) -> Result<WordsForSynonym, Broken> { Err(Broken) }
  }

  #[tokio::test]
  async fn storage_failure_returns_500_without_details() {
    let r = api_router(Arc::new(BrokenStore), GraphPolicy::default());

    let (status, body) = get_json(&r, "/words").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "statusCode": 500, "error": "Internal Server Error" }));

    let (status, _) = post_json(&r, "/synonym/dark", json!({ "synonym": "dim" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = get_json(&r, "/synonyms/dark").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  }
}
