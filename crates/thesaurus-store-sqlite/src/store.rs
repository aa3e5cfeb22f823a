//! [`SqliteStore`]: the SQLite implementation of [`WordStore`] and
//! [`SynonymGraph`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, ffi};
use thesaurus_core::{
  store::{SynonymGraph, WordStore},
  synonym::{SynonymEdge, Synonyms, WordsForSynonym},
  word::{Word, WordId, WordText},
};
use tracing::debug;

use crate::{Error, Result, error::constraint_violation, schema::SCHEMA};

// ─── Row decoding ────────────────────────────────────────────────────────────

/// A `Words` row as read from SQLite, before validation.
struct RawWord {
  id:   i64,
  word: String,
}

impl RawWord {
  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { id: row.get(0)?, word: row.get(1)? })
  }

  fn into_word(self) -> Result<Word> {
    Ok(Word { id: self.id, text: WordText::parse(&self.word)? })
  }
}

fn decode_texts(raw: Vec<String>) -> Result<Vec<WordText>> {
  raw
    .iter()
    .map(|w| WordText::parse(w).map_err(Error::Decode))
    .collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A thesaurus backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Texts of the words selected by `sql`, which takes a single word id.
  async fn neighbour_texts(&self, sql: &'static str, id: WordId) -> Result<Vec<WordText>> {
    let raws: Vec<String> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map(rusqlite::params![id], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    decode_texts(raws)
  }
}

// ─── WordStore impl ──────────────────────────────────────────────────────────

impl WordStore for SqliteStore {
  type Error = Error;

  async fn add(&self, text: WordText) -> Result<Word> {
    let word = text.as_str().to_owned();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute("INSERT INTO Words (word) VALUES (?1)", rusqlite::params![word])?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| match constraint_violation(&e) {
        Some(ffi::SQLITE_CONSTRAINT_UNIQUE) => Error::WordExists(text.to_string()),
        _ => Error::Database(e),
      })?;

    debug!(id, word = %text, "added word");
    Ok(Word { id, text })
  }

  async fn find(&self, text: &WordText) -> Result<Option<Word>> {
    let word = text.as_str().to_owned();

    let raw: Option<RawWord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, word FROM Words WHERE word = ?1",
            rusqlite::params![word],
            RawWord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawWord::into_word).transpose()
  }

  async fn find_by_id(&self, id: WordId) -> Result<Option<Word>> {
    let raw: Option<RawWord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, word FROM Words WHERE id = ?1",
            rusqlite::params![id],
            RawWord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawWord::into_word).transpose()
  }

  async fn get_or_create(&self, text: WordText) -> Result<Word> {
    let word = text.into_string();

    // Insert-if-absent and the read-back share one transaction on the
    // connection thread, so two callers can never both miss and both insert.
    let raw: RawWord = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO Words (word) VALUES (?1) ON CONFLICT (word) DO NOTHING",
          rusqlite::params![word],
        )?;
        let raw = tx.query_row(
          "SELECT id, word FROM Words WHERE word = ?1",
          rusqlite::params![word],
          RawWord::from_row,
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_word()
  }

  async fn list_all(&self) -> Result<Vec<WordText>> {
    let raws: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT word FROM Words ORDER BY id")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    decode_texts(raws)
  }
}

// ─── SynonymGraph impl ───────────────────────────────────────────────────────

impl SynonymGraph for SqliteStore {
  async fn add_edge(&self, word_id: WordId, synonym_id: WordId) -> Result<SynonymEdge> {
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Synonyms (word_id, synonym_id) VALUES (?1, ?2)",
          rusqlite::params![word_id, synonym_id],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| match constraint_violation(&e) {
        Some(ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => Error::DuplicateEdge { word_id, synonym_id },
        Some(ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => Error::UnknownWord { word_id, synonym_id },
        _ => Error::Database(e),
      })?;

    debug!(id, word_id, synonym_id, "added synonym edge");
    Ok(SynonymEdge { id, word_id, synonym_id })
  }

  async fn synonyms_of(&self, word: &Word) -> Result<Synonyms> {
    let synonyms = self
      .neighbour_texts(
        "SELECT w.word
         FROM Synonyms s
         JOIN Words    w ON w.id = s.synonym_id
         WHERE s.word_id = ?1
         ORDER BY s.rowid",
        word.id,
      )
      .await?;

    Ok(Synonyms { word: word.text.clone(), synonyms })
  }

  async fn words_for_synonym(&self, word: &Word) -> Result<WordsForSynonym> {
    let words = self
      .neighbour_texts(
        "SELECT w.word
         FROM Synonyms s
         JOIN Words    w ON w.id = s.word_id
         WHERE s.synonym_id = ?1
         ORDER BY s.rowid",
        word.id,
      )
      .await?;

    Ok(WordsForSynonym { synonym: word.text.clone(), words })
  }
}
