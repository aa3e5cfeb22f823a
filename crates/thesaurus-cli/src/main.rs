//! `thesaurus`: command-line client for the thesaurus server.
//!
//! # Usage
//!
//! ```
//! thesaurus add Funny
//! thesaurus link dark shadowy
//! thesaurus synonyms dark
//! thesaurus words-for shadowy
//! thesaurus --url http://localhost:8090 list
//! ```

mod client;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use serde::Deserialize;
use thesaurus_core::word::WordText;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_URL: &str = "http://localhost:8090";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "thesaurus", about = "Client for the thesaurus word/synonym server")]
struct Args {
  /// Path to a TOML config file (url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the thesaurus server (default: http://localhost:8090).
  #[arg(long, env = "THESAURUS_URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Add a new word.
  Add {
    #[arg(value_parser = parse_word)]
    word: WordText,
  },
  /// Record SYNONYM as a synonym of WORD, creating either word if needed.
  Link {
    #[arg(value_parser = parse_word)]
    word:    WordText,
    #[arg(value_parser = parse_word)]
    synonym: WordText,
  },
  /// Show the synonyms of WORD.
  Synonyms {
    #[arg(value_parser = parse_word)]
    word: WordText,
  },
  /// Show the words that list SYNONYM as one of their synonyms.
  WordsFor {
    #[arg(value_parser = parse_word)]
    synonym: WordText,
  },
  /// List every stored word.
  List,
}

/// Trim and validate a word before it is sent anywhere.
fn parse_word(raw: &str) -> Result<WordText, String> {
  WordText::parse(raw.trim()).map_err(|e| e.to_string())
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_URL.to_string()),
  };

  let client = ApiClient::new(api_config)?;
  run(&client, args.command).await
}

async fn run(client: &ApiClient, command: Command) -> Result<()> {
  match command {
    Command::Add { word } => {
      let word = client.add_word(&word).await?;
      println!("added {} (id {})", word.text, word.id);
    }
    Command::Link { word, synonym } => {
      let id = client.link(&word, &synonym).await?;
      println!("linked {word} → {synonym} (id {id})");
    }
    Command::Synonyms { word } => {
      let found = client.synonyms(&word).await?;
      print_words(&found.synonyms, || format!("no synonyms for {word}"));
    }
    Command::WordsFor { synonym } => {
      let found = client.words_for(&synonym).await?;
      print_words(&found.words, || format!("no words list {synonym} as a synonym"));
    }
    Command::List => {
      let words = client.list_words().await?;
      print_words(&words, || "no words stored".to_owned());
    }
  }
  Ok(())
}

/// One word per line on stdout; `empty` goes to stderr when there are none.
fn print_words(words: &[WordText], empty: impl FnOnce() -> String) {
  if words.is_empty() {
    eprintln!("{}", empty());
  }
  for word in words {
    println!("{word}");
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_word_trims_and_lowercases() {
    assert_eq!(parse_word("  Funny ").unwrap().as_str(), "funny");
    assert!(parse_word("a1b2").is_err());
  }

  #[test]
  fn args_parse_subcommands() {
    let args = Args::try_parse_from(["thesaurus", "link", "Dark", "shadowy"]).unwrap();
    match args.command {
      Command::Link { word, synonym } => {
        assert_eq!(word.as_str(), "dark");
        assert_eq!(synonym.as_str(), "shadowy");
      }
      other => panic!("unexpected command {other:?}"),
    }

    assert!(Args::try_parse_from(["thesaurus", "add", "no way"]).is_err());
  }

  #[test]
  fn config_file_url() {
    let cfg: ConfigFile = toml::from_str("url = \"http://words.local\"").unwrap();
    assert_eq!(cfg.url, "http://words.local");
  }
}
