//! Words and the validated text they carry.
//!
//! Every word is stored lowercased. [`WordText`] is the only way to get text
//! into a store, so an unnormalised string can never reach the `Words` table.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Longest accepted word, in ASCII letters.
pub const MAX_WORD_LEN: usize = 50;

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-Z]{1,50}$").expect("word pattern is a valid regex")
});

/// Surrogate identifier assigned by the store on insert.
pub type WordId = i64;

/// Lowercased word text of 1 to [`MAX_WORD_LEN`] ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WordText(String);

impl WordText {
  /// Validate `raw` against `^[a-zA-Z]{1,50}$` and lowercase it.
  pub fn parse(raw: &str) -> Result<Self> {
    if !WORD_PATTERN.is_match(raw) {
      return Err(Error::InvalidWord(raw.to_owned()));
    }
    Ok(Self(raw.to_ascii_lowercase()))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  pub fn into_string(self) -> String { self.0 }
}

impl TryFrom<String> for WordText {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> { Self::parse(&raw) }
}

impl From<WordText> for String {
  fn from(text: WordText) -> Self { text.0 }
}

impl AsRef<str> for WordText {
  fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for WordText {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// A stored word. Never updated, never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
  pub id:   WordId,
  #[serde(rename = "word")]
  pub text: WordText,
}
