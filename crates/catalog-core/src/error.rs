//! Error types for `catalog-core`.
//!
//! Every backend error converts into this taxonomy so that callers (the HTTP
//! layer in particular) can decide on a response without knowing which store
//! is in use.

use thiserror::Error;

use crate::product::ProductId;

#[derive(Debug, Error)]
pub enum Error {
  /// The caller supplied input that cannot be turned into a valid request.
  #[error("{0}")]
  InvalidArgument(String),

  #[error("product not found: {0}")]
  NotFound(ProductId),

  /// The store could not be reached in time (closed, busy, timed out).
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The store rejected or failed a well-formed statement.
  #[error("store query failed: {0}")]
  StoreQueryFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidArgument(message.into())
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
