//! HTTP server wiring for the thesaurus.
//!
//! Mounts [`thesaurus_api::api_router`] under `/api` and wraps it with the
//! cross-cutting layers: permissive CORS and request tracing.

use std::{path::Path, sync::Arc};

use axum::{
  Router,
  http::{HeaderName, Method, header},
};
use serde::Deserialize;
use thesaurus_api::{ApiError, GraphPolicy};
use thesaurus_core::store::SynonymGraph;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file, then
/// `THESAURUS_*` environment variables (e.g. `THESAURUS_DB_PATH`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub db_path:          std::path::PathBuf,
  pub allow_self_links: bool,
}

impl ServerConfig {
  /// Load configuration from `file` (which may be absent) and the
  /// environment.
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    Self::load_with_env(file, None)
  }

  /// As [`load`](Self::load), reading `THESAURUS_*` variables from `env`
  /// instead of the process environment when given.
  fn load_with_env(
    file: &Path,
    env: Option<config::Map<String, String>>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8090)?
      .set_default("db_path", "thesaurus.db")?
      .set_default("allow_self_links", true)?
      .add_source(config::File::from(file).required(false))
      .add_source(
        config::Environment::with_prefix("THESAURUS")
          .try_parsing(true)
          .source(env),
      )
      .build()?
      .try_deserialize()
  }

  pub fn policy(&self) -> GraphPolicy {
    GraphPolicy { allow_self_links: self.allow_self_links }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application: the JSON API under `/api`, CORS for any
/// origin, and a trace span per request.
pub fn app<S>(store: Arc<S>, policy: GraphPolicy) -> Router
where
  S: SynonymGraph + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::HEAD])
    .allow_headers([
      header::ORIGIN,
      header::ACCEPT,
      header::CONTENT_TYPE,
      HeaderName::from_static("x-requested-with"),
    ]);

  Router::new()
    .nest("/api", thesaurus_api::api_router(store, policy))
    .fallback(|| async { ApiError::NotFound("Not Found".to_owned()) })
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
