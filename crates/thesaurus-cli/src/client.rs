//! Async HTTP client wrapping the thesaurus JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use thesaurus_core::{
  synonym::{Synonyms, WordsForSynonym},
  word::{Word, WordText},
};

/// Connection settings for the thesaurus API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the thesaurus JSON API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Deserialize)]
struct Linked {
  id: i64,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Decode a success body, or turn the error envelope into an error.
  async fn read<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
      let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
      };
      return Err(anyhow!("{what} → {}: {message}", status.as_u16()));
    }
    resp
      .json()
      .await
      .with_context(|| format!("deserialising {what} response"))
  }

  // ── Words ─────────────────────────────────────────────────────────────────

  /// `POST /api/word`
  pub async fn add_word(&self, word: &WordText) -> Result<Word> {
    tracing::debug!(%word, "adding word");
    let resp = self
      .client
      .post(self.url("/word"))
      .json(&serde_json::json!({ "word": word }))
      .send()
      .await
      .context("POST /word failed")?;
    Self::read(resp, "POST /word").await
  }

  /// `GET /api/words`
  pub async fn list_words(&self) -> Result<Vec<WordText>> {
    let resp = self
      .client
      .get(self.url("/words"))
      .send()
      .await
      .context("GET /words failed")?;
    Self::read(resp, "GET /words").await
  }

  // ── Synonyms ──────────────────────────────────────────────────────────────

  /// `POST /api/synonym/{word}`, returning the new link's id.
  pub async fn link(&self, word: &WordText, synonym: &WordText) -> Result<i64> {
    tracing::debug!(%word, %synonym, "linking synonym");
    let resp = self
      .client
      .post(self.url(&format!("/synonym/{word}")))
      .json(&serde_json::json!({ "synonym": synonym }))
      .send()
      .await
      .context("POST /synonym failed")?;
    let linked: Linked = Self::read(resp, "POST /synonym").await?;
    Ok(linked.id)
  }

  /// `GET /api/synonyms/{word}`
  pub async fn synonyms(&self, word: &WordText) -> Result<Synonyms> {
    let resp = self
      .client
      .get(self.url(&format!("/synonyms/{word}")))
      .send()
      .await
      .context("GET /synonyms failed")?;
    Self::read(resp, "GET /synonyms").await
  }

  /// `GET /api/words/{synonym}`
  pub async fn words_for(&self, synonym: &WordText) -> Result<WordsForSynonym> {
    let resp = self
      .client
      .get(self.url(&format!("/words/{synonym}")))
      .send()
      .await
      .context("GET /words/{synonym} failed")?;
    Self::read(resp, "GET /words/{synonym}").await
  }
}
