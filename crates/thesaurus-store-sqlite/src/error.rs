//! Error type for `thesaurus-store-sqlite`.

use std::ffi::c_int;

use rusqlite::ErrorCode;
use thesaurus_core::{ErrorKind, store::StoreError, word::WordId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A row in `Words` holds text that no longer passes validation.
  #[error("stored word is invalid: {0}")]
  Decode(#[from] thesaurus_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("word already exists: {0}")]
  WordExists(String),

  #[error("synonym link {word_id} -> {synonym_id} already exists")]
  DuplicateEdge { word_id: WordId, synonym_id: WordId },

  #[error("synonym link {word_id} -> {synonym_id} references an unknown word")]
  UnknownWord { word_id: WordId, synonym_id: WordId },
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Error::WordExists(_) | Error::DuplicateEdge { .. } => ErrorKind::Conflict,
      Error::UnknownWord { .. } => ErrorKind::NotFound,
      Error::Decode(_) | Error::Database(_) => ErrorKind::Storage,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Extended result code of `err` if it is a constraint violation, e.g.
/// [`rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE`].
pub(crate) fn constraint_violation(err: &tokio_rusqlite::Error) -> Option<c_int> {
  match err {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.code == ErrorCode::ConstraintViolation =>
    {
      Some(e.extended_code)
    }
    _ => None,
  }
}
