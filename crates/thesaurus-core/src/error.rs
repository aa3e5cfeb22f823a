//! Error types for `thesaurus-core`.

use thiserror::Error;

/// Coarse classification shared by every layer.
///
/// Store backends report their failures through
/// [`StoreError::kind`](crate::store::StoreError::kind); the HTTP layer maps
/// each kind to exactly one status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// Malformed word text or request payload.
  InvalidInput,
  /// A referenced word does not exist.
  NotFound,
  /// Duplicate word or duplicate synonym edge.
  Conflict,
  /// Any other persistence failure.
  Storage,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid word {0:?}: expected 1 to 50 ASCII letters")]
  InvalidWord(String),
}

impl Error {
  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::InvalidWord(_) => ErrorKind::InvalidInput,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
