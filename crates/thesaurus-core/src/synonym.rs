//! Directed synonym edges and the two neighbourhood views built from them.
//!
//! The relation is not symmetric: an edge `dark -> shadowy` makes "shadowy" a
//! synonym of "dark" and nothing more. The reverse edge has to be added on
//! its own.

use serde::{Deserialize, Serialize};

use crate::word::{WordId, WordText};

/// A persisted edge from `word_id` to `synonym_id`.
///
/// `(word_id, synonym_id)` is unique. `id` is the row identifier assigned on
/// insert and is what `POST /synonym/{word}` hands back to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymEdge {
  pub id:         i64,
  pub word_id:    WordId,
  pub synonym_id: WordId,
}

/// Out-neighbours of a word: everything it has been linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synonyms {
  pub word:     WordText,
  pub synonyms: Vec<WordText>,
}

/// In-neighbours of a word: everything that lists it as a synonym.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordsForSynonym {
  pub synonym: WordText,
  pub words:   Vec<WordText>,
}
