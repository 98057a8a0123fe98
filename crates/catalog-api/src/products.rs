//! Handlers for `/products` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/products` | Optional `category`, `tag`, `search`, `attribute` + `attrValue` |
//! | `POST`   | `/products` | Body: [`ProductBody`]; returns 201 + stored product |
//! | `GET`    | `/products/{id}` | 404 if not found |
//! | `PUT`    | `/products/{id}` | Body: [`ProductBody`]; omitted fields are kept |
//! | `DELETE` | `/products/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use catalog_core::{
  product::{Attributes, NewProduct, Product, ProductId, ProductPatch},
  query::{AttributeFilter, ProductQuery, SearchQuery},
  store::CatalogStore,
};
use serde::{Deserialize, Serialize};

use crate::{
  error::ApiError,
  extract::{IdPath, JsonBody, QueryParams},
};

fn not_found(id: ProductId) -> ApiError {
  ApiError::from(catalog_core::Error::NotFound(id))
}

/// Empty query-string values count as absent.
fn present(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub category:   Option<String>,
  pub tag:        Option<String>,
  /// Full-text filter over descriptions; results stay newest first.
  pub search:     Option<String>,
  /// Attribute key; only applied together with `attrValue`.
  pub attribute:  Option<String>,
  #[serde(rename = "attrValue")]
  pub attr_value: Option<String>,
}

impl TryFrom<ListParams> for ProductQuery {
  type Error = catalog_core::Error;

  fn try_from(p: ListParams) -> Result<Self, Self::Error> {
    let attribute = match (present(p.attribute), present(p.attr_value)) {
      (Some(key), Some(value)) => Some(AttributeFilter::new(key, value)?),
      _ => None,
    };
    Ok(ProductQuery {
      category: present(p.category),
      tag: present(p.tag),
      text: present(p.search).map(SearchQuery::filter),
      attribute,
    })
  }
}

/// `GET /products[?category=...][&tag=...][&search=...][&attribute=...&attrValue=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: CatalogStore,
{
  let query = ProductQuery::try_from(params)?;
  let products = store.list(&query).await.map_err(ApiError::from_store)?;
  Ok(Json(products))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /products/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  IdPath(id): IdPath,
) -> Result<Json<Product>, ApiError>
where
  S: CatalogStore,
{
  let product = store
    .get(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(product))
}

// ─── Create / update body ─────────────────────────────────────────────────────

/// JSON body accepted by `POST /products` and `PUT /products/{id}`.
///
/// Every field is optional at the wire level; creation enforces the required
/// ones, updates treat absent or `null` fields as "unchanged".
#[derive(Debug, Default, Deserialize)]
pub struct ProductBody {
  pub name:        Option<String>,
  pub category:    Option<String>,
  pub price:       Option<f64>,
  pub image_url:   Option<String>,
  pub attributes:  Option<Attributes>,
  pub tags:        Option<Vec<String>>,
  pub description: Option<String>,
}

impl TryFrom<ProductBody> for NewProduct {
  type Error = catalog_core::Error;

  fn try_from(b: ProductBody) -> Result<Self, Self::Error> {
    let (Some(name), Some(category), Some(price)) =
      (present(b.name), present(b.category), b.price)
    else {
      return Err(catalog_core::Error::invalid(
        "Name, category, and price are required",
      ));
    };
    let product = NewProduct {
      name,
      category,
      price,
      image_url: present(b.image_url),
      attributes: b.attributes.unwrap_or_default(),
      tags: b.tags.unwrap_or_default(),
      description: b.description.unwrap_or_default(),
    };
    product.validate()?;
    Ok(product)
  }
}

impl From<ProductBody> for ProductPatch {
  fn from(b: ProductBody) -> Self {
    ProductPatch {
      name:        b.name,
      category:    b.category,
      price:       b.price,
      image_url:   b.image_url,
      attributes:  b.attributes,
      tags:        b.tags,
      description: b.description,
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /products`; returns 201 + the stored [`Product`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<ProductBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
{
  let input = NewProduct::try_from(body)?;
  let product = store.create(input).await.map_err(ApiError::from_store)?;
  tracing::info!(id = product.id, name = %product.name, "product created");
  Ok((StatusCode::CREATED, Json(product)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /products/{id}`: partial update; returns the stored [`Product`].
pub async fn update<S>(
  State(store): State<Arc<S>>,
  IdPath(id): IdPath,
  JsonBody(body): JsonBody<ProductBody>,
) -> Result<Json<Product>, ApiError>
where
  S: CatalogStore,
{
  let product = store
    .update(id, ProductPatch::from(body))
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(product))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct Deleted {
  pub message: String,
  pub id:      ProductId,
}

/// `DELETE /products/{id}`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  IdPath(id): IdPath,
) -> Result<Json<Deleted>, ApiError>
where
  S: CatalogStore,
{
  let id = store
    .delete(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(id, "product deleted");
  Ok(Json(Deleted {
    message: "Product deleted successfully".to_owned(),
    id,
  }))
}
