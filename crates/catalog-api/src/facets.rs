//! Handlers for the facet listings `GET /categories` and `GET /tags`.

use std::sync::Arc;

use axum::{Json, extract::State};
use catalog_core::store::CatalogStore;

use crate::error::ApiError;

/// `GET /categories`: distinct categories, ascending.
pub async fn categories<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: CatalogStore,
{
  let categories = store.categories().await.map_err(ApiError::from_store)?;
  Ok(Json(categories))
}

/// `GET /tags`: distinct tags across all products, ascending.
pub async fn tags<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: CatalogStore,
{
  let tags = store.tags().await.map_err(ApiError::from_store)?;
  Ok(Json(tags))
}
