//! thesaurus server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus
//! `THESAURUS_*` environment variables, opens the SQLite store, and serves the
//! JSON API over HTTP.
//!
//! ```
//! THESAURUS_DB_PATH=~/words.db cargo run -p thesaurus-server --bin server
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use thesaurus_server::ServerConfig;
use thesaurus_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Word and synonym dictionary server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  // Expand `~` in store path.
  let db_path = expand_tilde(&server_cfg.db_path);

  let store = SqliteStore::open(&db_path)
    .await
    .with_context(|| format!("failed to open store at {db_path:?}"))?;

  let app = thesaurus_server::app(Arc::new(store), server_cfg.policy());
  let address = server_cfg.address();

  tracing::info!(
    db_path = %db_path.display(),
    allow_self_links = server_cfg.allow_self_links,
    "Listening on http://{address}/api"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
