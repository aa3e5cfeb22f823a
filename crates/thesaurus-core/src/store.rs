//! The `WordStore` and `SynonymGraph` traits.
//!
//! The traits are implemented by storage backends (e.g.
//! `thesaurus-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  ErrorKind,
  synonym::{SynonymEdge, Synonyms, WordsForSynonym},
  word::{Word, WordId, WordText},
};

/// Errors raised by a store backend.
///
/// Backends classify their own failures so that callers never have to
/// inspect messages to tell a constraint violation from a broken database.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

// ─── Words ───────────────────────────────────────────────────────────────────

/// Persistent set of unique, lowercased words.
///
/// Lookups distinguish three outcomes: `Ok(Some(word))`, `Ok(None)` when the
/// word simply does not exist, and `Err` when the lookup itself failed.
pub trait WordStore: Send + Sync {
  type Error: StoreError;

  /// Insert a new word. Fails with an [`ErrorKind::Conflict`] error if the
  /// text is already stored.
  fn add(
    &self,
    text: WordText,
  ) -> impl Future<Output = Result<Word, Self::Error>> + Send + '_;

  /// Exact lookup by normalised text.
  fn find<'a>(
    &'a self,
    text: &'a WordText,
  ) -> impl Future<Output = Result<Option<Word>, Self::Error>> + Send + 'a;

  /// Lookup by identifier.
  fn find_by_id(
    &self,
    id: WordId,
  ) -> impl Future<Output = Result<Option<Word>, Self::Error>> + Send + '_;

  /// Return the stored word, creating it first if needed.
  ///
  /// Idempotent and atomic: concurrent callers with the same unseen text all
  /// receive the same row, and none of them sees a conflict.
  fn get_or_create(
    &self,
    text: WordText,
  ) -> impl Future<Output = Result<Word, Self::Error>> + Send + '_;

  /// Every stored word. Callers must not rely on the order.
  fn list_all(&self)
  -> impl Future<Output = Result<Vec<WordText>, Self::Error>> + Send + '_;
}

// ─── Synonym graph ───────────────────────────────────────────────────────────

/// Directed synonym edges between stored words.
///
/// Both lookups take an already-resolved [`Word`] and never create anything.
pub trait SynonymGraph: WordStore {
  /// Insert the edge `word_id -> synonym_id`.
  ///
  /// Fails with [`ErrorKind::Conflict`] if the edge already exists and with
  /// [`ErrorKind::NotFound`] if either endpoint is not a stored word.
  fn add_edge(
    &self,
    word_id: WordId,
    synonym_id: WordId,
  ) -> impl Future<Output = Result<SynonymEdge, Self::Error>> + Send + '_;

  /// Targets of every edge leaving `word`. Empty when there are none.
  fn synonyms_of<'a>(
    &'a self,
    word: &'a Word,
  ) -> impl Future<Output = Result<Synonyms, Self::Error>> + Send + 'a;

  /// Sources of every edge arriving at `word`. Empty when there are none.
  fn words_for_synonym<'a>(
    &'a self,
    word: &'a Word,
  ) -> impl Future<Output = Result<WordsForSynonym, Self::Error>> + Send + 'a;
}
