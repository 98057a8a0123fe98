//! Handler for `GET /products/search`.
//!
//! Unlike the `search` filter on `GET /products`, results here are ordered by
//! relevance and carry a `rank` field.

use std::sync::Arc;

use axum::{Json, extract::State};
use catalog_core::{
  product::RankedProduct,
  query::SearchQuery,
  store::CatalogStore,
};
use serde::Deserialize;

use crate::{error::ApiError, extract::QueryParams};

#[derive(Debug, Deserialize, Default)]
pub struct SearchParams {
  /// Free text; required and must not be blank.
  pub q: Option<String>,
}

/// `GET /products/search?q=...`
pub async fn handler<S>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Vec<RankedProduct>>, ApiError>
where
  S: CatalogStore,
{
  let query = SearchQuery::parse(params.q.unwrap_or_default())?;

  let hits = store.search(&query).await.map_err(ApiError::from_store)?;
  Ok(Json(hits))
}
