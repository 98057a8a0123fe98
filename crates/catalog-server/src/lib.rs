//! HTTP server assembly for the product catalog.
//!
//! Wires the JSON API from [`catalog_api`] to a [`SqliteStore`], optionally
//! serving the browser frontend from a static directory, and provides the
//! sample catalog used by `--seed`.

pub mod seed;

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::Router;
use catalog_store_sqlite::{SqliteStore, StoreOptions};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CATALOG_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub store_path:           PathBuf,
  /// Directory holding the browser frontend; unset disables static serving.
  pub static_dir:           Option<PathBuf>,
  pub busy_timeout_ms:      u64,
  pub operation_timeout_ms: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let store = StoreOptions::default();
    Self {
      host:                 "127.0.0.1".to_owned(),
      port:                 3000,
      store_path:           PathBuf::from("catalog.db"),
      static_dir:           None,
      busy_timeout_ms:      millis(store.busy_timeout),
      operation_timeout_ms: millis(store.operation_timeout),
    }
  }
}

fn millis(d: Duration) -> u64 { u64::try_from(d.as_millis()).unwrap_or(u64::MAX) }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_options(&self) -> StoreOptions {
    StoreOptions {
      busy_timeout:      Duration::from_millis(self.busy_timeout_ms),
      operation_timeout: Duration::from_millis(self.operation_timeout_ms),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: API routes, optional static frontend as the
/// fallback, and request tracing.
pub fn app(store: Arc<SqliteStore>, config: &ServerConfig) -> Router {
  let mut router = catalog_api::api_router(store);
  if let Some(dir) = &config.static_dir {
    router = router.fallback_service(ServeDir::new(dir));
  }
  router.layer(TraceLayer::new_for_http())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
