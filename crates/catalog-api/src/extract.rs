//! Extractors whose rejections answer with [`ApiError`], so malformed ids,
//! bodies, and query strings get the same `{"error": ...}` 400 as every other
//! client mistake.

use axum::{
  extract::{FromRequest, FromRequestParts, Path, Query, Request},
  http::request::Parts,
};
use catalog_core::product::ProductId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
    Ok(JsonBody(value))
  }
}

/// The `{id}` segment of `/products/{id}`.
pub struct IdPath(pub ProductId);

impl<S> FromRequestParts<S> for IdPath
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(id) = Path::<ProductId>::from_request_parts(parts, state).await?;
    Ok(IdPath(id))
  }
}

/// Query-string parameters.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
    Ok(QueryParams(params))
  }
}
