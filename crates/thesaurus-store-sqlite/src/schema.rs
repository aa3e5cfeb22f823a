//! SQL schema for the thesaurus SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Words are append-only: no UPDATE or DELETE is ever issued.
CREATE TABLE IF NOT EXISTS Words (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    word  TEXT    NOT NULL UNIQUE      -- lowercased, 1-50 ASCII letters
);

-- Directed edge: synonym_id is a synonym of word_id.
CREATE TABLE IF NOT EXISTS Synonyms (
    word_id     INTEGER NOT NULL REFERENCES Words(id),
    synonym_id  INTEGER NOT NULL REFERENCES Words(id),
    PRIMARY KEY (word_id, synonym_id)
);

-- The primary key covers out-edge lookups; this one covers in-edges.
CREATE INDEX IF NOT EXISTS synonyms_synonym_idx ON Synonyms(synonym_id);

PRAGMA user_version = 1;
";
