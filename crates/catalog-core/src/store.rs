//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `catalog-store-sqlite`). The HTTP layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  product::{NewProduct, Product, ProductId, ProductPatch, RankedProduct},
  query::{ProductQuery, SearchQuery},
};

/// Abstraction over a product catalog backend.
///
/// Each mutating method is a single atomic write touching exactly one record.
/// Concurrent updates to the same record are last-write-wins.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  /// Backend error; must map onto the shared [`crate::Error`] taxonomy.
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All products matching every predicate in `query`, newest first.
  fn list<'a>(
    &'a self,
    query: &'a ProductQuery,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + 'a;

  /// Products whose description matches `query`, most relevant first and
  /// newest first among equals.
  fn search<'a>(
    &'a self,
    query: &'a SearchQuery,
  ) -> impl Future<Output = Result<Vec<RankedProduct>, Self::Error>> + Send + 'a;

  /// Retrieve a product by id. Returns `None` if not found.
  fn get(
    &self,
    id: ProductId,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  /// Every distinct category, ascending.
  fn categories(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// Every distinct tag across all products, ascending.
  fn tags(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new product. The store assigns `id` and `created_at`.
  fn create(
    &self,
    input: NewProduct,
  ) -> impl Future<Output = Result<Product, Self::Error>> + Send + '_;

  /// Apply `patch` with coalesce semantics and return the updated record, or
  /// `None` if no product has this id.
  fn update(
    &self,
    id: ProductId,
    patch: ProductPatch,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + '_;

  /// Remove a product. Returns the deleted id, or `None` if it did not exist.
  fn delete(
    &self,
    id: ProductId,
  ) -> impl Future<Output = Result<Option<ProductId>, Self::Error>> + Send + '_;
}
