//! JSON REST API for the product catalog.
//!
//! Exposes an axum [`Router`] backed by any [`catalog_core::store::CatalogStore`].
//! Static files, tracing layers, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = catalog_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
//! ```

pub mod error;
pub mod extract;
pub mod facets;
pub mod products;
pub mod search;

use std::sync::Arc;

use axum::{Router, routing::get};
use catalog_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  Router::new()
    // Products
    .route(
      "/products",
      get(products::list::<S>).post(products::create::<S>),
    )
    .route("/products/search", get(search::handler::<S>))
    .route(
      "/products/{id}",
      get(products::get_one::<S>)
        .put(products::update::<S>)
        .delete(products::delete_one::<S>),
    )
    // Facets
    .route("/categories", get(facets::categories::<S>))
    .route("/tags", get(facets::tags::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use catalog_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(json) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, req).await
  }

  async fn dispatch(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
  }

  async fn create(app: &Router, body: Value) -> Value {
    let (status, created) = send(app, "POST", "/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    created
  }

  async fn seed(app: &Router) {
    create(app, json!({
      "name": "iPhone 17 Pro",
      "category": "Electronics",
      "price": 1099.00,
      "attributes": { "brand": "Apple", "storage": "256GB" },
      "tags": ["smartphone", "premium", "apple"],
      "description": "Latest iPhone with a professional camera system"
    }))
    .await;
    create(app, json!({
      "name": "AirPods Pro",
      "category": "Electronics",
      "price": 249.00,
      "attributes": { "brand": "Apple", "noise_cancellation": true },
      "tags": ["audio", "premium", "apple", "wireless"],
      "description": "Premium wireless earbuds with active noise cancellation"
    }))
    .await;
    create(app, json!({
      "name": "1984",
      "category": "Books",
      "price": 14.99,
      "attributes": { "author": "George Orwell", "year": 1949 },
      "tags": ["fiction", "dystopian", "classic"],
      "description": "Dystopian novel about totalitarianism and surveillance"
    }))
    .await;
  }

  fn names(value: &Value) -> Vec<&str> {
    value
      .as_array()
      .unwrap()
      .iter()
      .map(|p| p["name"].as_str().unwrap())
      .collect()
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_defaults() {
    let app = app().await;
    let created = create(&app, json!({
      "name": "Widget", "category": "Tools", "price": 9.99
    }))
    .await;

    assert!(created["id"].as_i64().unwrap() > 0);
    assert_eq!(created["attributes"], json!({}));
    assert_eq!(created["tags"], json!([]));
    assert_eq!(created["description"], json!(""));
    assert_eq!(created["image_url"], Value::Null);
    assert!(created["created_at"].is_string());
  }

  #[tokio::test]
  async fn create_missing_fields_returns_400() {
    let app = app().await;
    for body in [
      json!({ "category": "Tools", "price": 9.99 }),
      json!({ "name": "Widget", "price": 9.99 }),
      json!({ "name": "Widget", "category": "Tools" }),
      json!({ "name": "", "category": "Tools", "price": 9.99 }),
      json!({ "name": "Widget", "category": "Tools", "price": null }),
    ] {
      let (status, err) = send(&app, "POST", "/products", Some(body)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert_eq!(err["error"], json!("Name, category, and price are required"));
    }

    let (_, all) = send(&app, "GET", "/products", None).await;
    assert_eq!(all, json!([]));
  }

  #[tokio::test]
  async fn create_out_of_range_price_returns_400() {
    let app = app().await;
    let (status, err) = send(
      &app,
      "POST",
      "/products",
      Some(json!({ "name": "Widget", "category": "Tools", "price": 1e307 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("price"));
  }

  #[tokio::test]
  async fn malformed_body_returns_400_json() {
    let app = app().await;

    let (status, err) = send(
      &app,
      "POST",
      "/products",
      Some(json!({ "name": "Widget", "category": "Tools", "price": "9.99" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!err["error"].as_str().unwrap().is_empty());

    let req = Request::builder()
      .method("POST")
      .uri("/products")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let (status, err) = dispatch(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let req = Request::builder()
      .method("POST")
      .uri("/products")
      .body(Body::from(r#"{"name":"Widget","category":"Tools","price":1}"#))
      .unwrap();
    let (status, err) = dispatch(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());
  }

  // ── Get ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn get_unknown_returns_404() {
    let app = app().await;
    let (status, err) = send(&app, "GET", "/products/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"], json!("Product not found"));
  }

  #[tokio::test]
  async fn non_numeric_id_returns_400_json() {
    let app = app().await;
    for method in ["GET", "DELETE"] {
      let (status, err) = send(&app, method, "/products/abc", None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
      assert!(err["error"].as_str().unwrap().contains("abc"), "{err}");
    }
    let (status, err) =
      send(&app, "PUT", "/products/abc", Some(json!({ "price": 1.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_is_partial() {
    let app = app().await;
    let created = create(&app, json!({
      "name": "Widget", "category": "Tools", "price": 9.99, "tags": ["metal"]
    }))
    .await;
    let uri = format!("/products/{}", created["id"]);

    let (status, updated) = send(
      &app,
      "PUT",
      &uri,
      Some(json!({ "price": 12.50, "name": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], json!(12.5));

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched["price"], json!(12.5));
    assert_eq!(fetched["name"], json!("Widget"));
    assert_eq!(fetched["tags"], json!(["metal"]));
    assert_eq!(fetched["created_at"], created["created_at"]);
  }

  #[tokio::test]
  async fn update_unknown_returns_404() {
    let app = app().await;
    let (status, _) =
      send(&app, "PUT", "/products/7", Some(json!({ "price": 1.0 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn update_blank_name_returns_400() {
    let app = app().await;
    let created = create(&app, json!({
      "name": "Widget", "category": "Tools", "price": 9.99
    }))
    .await;
    let (status, _) = send(
      &app,
      "PUT",
      &format!("/products/{}", created["id"]),
      Some(json!({ "name": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_get_returns_404() {
    let app = app().await;
    let created = create(&app, json!({
      "name": "Widget", "category": "Tools", "price": 9.99
    }))
    .await;
    let uri = format!("/products/{}", created["id"]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Product deleted successfully"));
    assert_eq!(body["id"], created["id"]);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_applies_query_filters() {
    let app = app().await;
    seed(&app).await;

    let (_, all) = send(&app, "GET", "/products", None).await;
    assert_eq!(names(&all), ["1984", "AirPods Pro", "iPhone 17 Pro"]);

    let (_, books) = send(&app, "GET", "/products?category=Books", None).await;
    assert_eq!(names(&books), ["1984"]);

    let (_, wireless) = send(&app, "GET", "/products?tag=wireless", None).await;
    assert_eq!(names(&wireless), ["AirPods Pro"]);

    let (_, apple) = send(
      &app,
      "GET",
      "/products?category=Electronics&attribute=brand&attrValue=Apple",
      None,
    )
    .await;
    assert_eq!(names(&apple), ["AirPods Pro", "iPhone 17 Pro"]);

    let (_, found) = send(&app, "GET", "/products?search=surveillance", None).await;
    assert_eq!(names(&found), ["1984"]);
  }

  #[tokio::test]
  async fn list_ignores_empty_and_incomplete_filters() {
    let app = app().await;
    seed(&app).await;

    let (status, all) = send(
      &app,
      "GET",
      "/products?category=&tag=&search=&attribute=brand",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, all) = send(&app, "GET", "/products?attrValue=Apple", None).await;
    assert_eq!(all.as_array().unwrap().len(), 3);
  }

  #[tokio::test]
  async fn list_blank_search_matches_nothing() {
    let app = app().await;
    seed(&app).await;

    for uri in ["/products?search=%20", "/products?search=%21%3F"] {
      let (status, found) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::OK, "{uri}");
      assert_eq!(found, json!([]), "{uri}");
    }
  }

  #[tokio::test]
  async fn list_rejects_malformed_attribute_key() {
    let app = app().await;
    seed(&app).await;

    let (status, err) = send(
      &app,
      "GET",
      "/products?attribute=brand%27%20OR%20%271%27%3D%271&attrValue=x",
      None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("attribute key"));
  }

  // ── Search ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn search_requires_query() {
    let app = app().await;
    for uri in ["/products/search", "/products/search?q=", "/products/search?q=%20"] {
      let (status, err) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
      assert_eq!(err["error"], json!("Search query required"));
    }
  }

  #[tokio::test]
  async fn search_returns_ranked_hits() {
    let app = app().await;
    seed(&app).await;

    let (status, hits) = send(&app, "GET", "/products/search?q=camera", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&hits), ["iPhone 17 Pro"]);
    assert!(hits[0]["rank"].is_number());

    let (_, none) = send(&app, "GET", "/products/search?q=submarine", None).await;
    assert_eq!(none, json!([]));
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn closed_store_returns_500() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let app = api_router(Arc::new(store.clone()));
    store.close().await.unwrap();

    for uri in ["/categories", "/products", "/products/1"] {
      let (status, err) = send(&app, "GET", uri, None).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
      assert!(!err["error"].as_str().unwrap().is_empty(), "{uri}");
    }
  }

  // ── Facets ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn facets_are_sorted_and_distinct() {
    let app = app().await;
    seed(&app).await;

    let (_, categories) = send(&app, "GET", "/categories", None).await;
    assert_eq!(categories, json!(["Books", "Electronics"]));

    let (_, tags) = send(&app, "GET", "/tags", None).await;
    assert_eq!(
      tags,
      json!([
        "apple",
        "audio",
        "classic",
        "dystopian",
        "fiction",
        "premium",
        "smartphone",
        "wireless"
      ])
    );
  }
}
