//! Error type for `catalog-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] catalog_core::Error),

  /// The connection is gone, the database stayed locked past the busy
  /// timeout, or a call exceeded the operation timeout.
  #[error("store unavailable: {0}")]
  Unavailable(String),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(err: tokio_rusqlite::Error) -> Self {
    if is_unavailable(&err) {
      Self::Unavailable(err.to_string())
    } else {
      Self::Database(err)
    }
  }
}

impl From<rusqlite::Error> for Error {
  fn from(err: rusqlite::Error) -> Self { tokio_rusqlite::Error::from(err).into() }
}

fn is_unavailable(err: &tokio_rusqlite::Error) -> bool {
  match err {
    tokio_rusqlite::Error::ConnectionClosed => true,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _)) => {
      matches!(
        e.code,
        ErrorCode::DatabaseBusy
          | ErrorCode::DatabaseLocked
          | ErrorCode::CannotOpen
      )
    }
    _ => false,
  }
}

impl From<Error> for catalog_core::Error {
  fn from(err: Error) -> Self {
    match err {
      Error::Core(e) => e,
      e @ Error::Unavailable(_) => Self::StoreUnavailable(Box::new(e)),
      other => Self::StoreQueryFailure(Box::new(other)),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
