//! [`SqliteStore`], the SQLite implementation of [`CatalogStore`].

use std::{path::Path, time::Duration};

use catalog_core::{
  product::{NewProduct, Product, ProductId, ProductPatch, RankedProduct},
  query::{ProductQuery, SearchQuery},
  store::CatalogStore,
};
use chrono::Utc;
use rusqlite::OptionalExtension as _;

use crate::{
  encode::{
    PRODUCT_COLUMNS, RawProduct, RawRankedProduct, encode_attributes,
    encode_dt, encode_price, encode_tags,
  },
  schema::{DROP_SCHEMA, SCHEMA},
  sql, Error, Result,
};

// ─── Options ─────────────────────────────────────────────────────────────────

/// Bounds on how long a caller may wait on the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
  /// How long SQLite retries while another writer holds the lock.
  pub busy_timeout:      Duration,
  /// Upper bound on a whole store call, queueing included.
  pub operation_timeout: Duration,
}

impl Default for StoreOptions {
  fn default() -> Self {
    Self {
      busy_timeout:      Duration::from_secs(5),
      operation_timeout: Duration::from_secs(10),
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A product catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted and all
/// statements run in order on its dedicated thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn:    tokio_rusqlite::Connection,
  options: StoreOptions,
}

impl SqliteStore {
  /// Open (or create) a store at `path` with default [`StoreOptions`].
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::open_with(path, StoreOptions::default()).await
  }

  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open_with(
    path: impl AsRef<Path>,
    options: StoreOptions,
  ) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, options };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, options: StoreOptions::default() };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let busy_timeout = self.options.busy_timeout;
    self
      .call(move |conn| {
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Run `f` on the connection thread, bounded by the operation timeout.
  async fn call<F, R>(&self, f: F) -> Result<R>
  where
    F: FnOnce(&mut rusqlite::Connection) -> tokio_rusqlite::Result<R>
      + Send
      + 'static,
    R: Send + 'static,
  {
    let timeout = self.options.operation_timeout;
    tokio::time::timeout(timeout, self.conn.call(f))
      .await
      .map_err(|_| {
        Error::Unavailable(format!("no response from store within {timeout:?}"))
      })?
      .map_err(Error::from)
  }

  /// Round-trip a trivial statement to prove the database is usable.
  pub async fn ping(&self) -> Result<()> {
    self
      .call(|conn| {
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
      })
      .await
  }

  /// Drop every product and recreate the schema from scratch.
  pub async fn reset(&self) -> Result<()> {
    self
      .call(|conn| {
        conn.execute_batch(DROP_SCHEMA)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::info!("catalog schema reset");
    Ok(())
  }

  /// Shut the connection down after queued statements finish. Other clones
  /// of this store fail with [`Error::Unavailable`] afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn query_products(&self, stmt: sql::Statement) -> Result<Vec<Product>> {
    let raws: Vec<RawProduct> = self
      .call(move |conn| {
        let mut prepared = conn.prepare(&stmt.sql)?;
        let rows = prepared
          .query_map(
            rusqlite::params_from_iter(stmt.params.iter()),
            RawProduct::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProduct::into_product).collect()
  }

  async fn query_strings(&self, sql: &'static str) -> Result<Vec<String>> {
    self
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>> {
    let stmt = sql::list_products(query);
    tracing::debug!(
      sql = %stmt.sql,
      unfiltered = query.is_unfiltered(),
      params = stmt.params.len(),
      "listing products"
    );
    self.query_products(stmt).await
  }

  async fn search(&self, query: &SearchQuery) -> Result<Vec<RankedProduct>> {
    let Some(expr) = sql::fts_expression(query) else {
      return Ok(Vec::new());
    };
    let stmt = sql::search_products(expr);

    let raws: Vec<RawRankedProduct> = self
      .call(move |conn| {
        let mut prepared = conn.prepare(&stmt.sql)?;
        let rows = prepared
          .query_map(
            rusqlite::params_from_iter(stmt.params.iter()),
            RawRankedProduct::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRankedProduct::into_ranked).collect()
  }

  async fn get(&self, id: ProductId) -> Result<Option<Product>> {
    let raw: Option<RawProduct> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"),
              rusqlite::params![id],
              RawProduct::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProduct::into_product).transpose()
  }

  async fn categories(&self) -> Result<Vec<String>> {
    self
      .query_strings("SELECT DISTINCT category FROM products ORDER BY category")
      .await
  }

  async fn tags(&self) -> Result<Vec<String>> {
    self
      .query_strings(
        "SELECT DISTINCT t.value AS tag
         FROM products, json_each(products.tags) AS t
         ORDER BY tag",
      )
      .await
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&self, input: NewProduct) -> Result<Product> {
    input.validate()?;

    let attributes_str = encode_attributes(&input.attributes)?;
    let tags_str       = encode_tags(&input.tags)?;
    let price          = encode_price(input.price);
    let created_at_str = encode_dt(Utc::now());
    let NewProduct { name, category, image_url, description, .. } = input;

    let raw: RawProduct = self
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO products (
               name, category, price, image_url,
               attributes, tags, description, created_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING {PRODUCT_COLUMNS}"
          ),
          rusqlite::params![
            name,
            category,
            price,
            image_url,
            attributes_str,
            tags_str,
            description,
            created_at_str,
          ],
          RawProduct::from_row,
        )?)
      })
      .await?;

    let product = raw.into_product()?;
    tracing::debug!(id = product.id, "product created");
    Ok(product)
  }

  async fn update(
    &self,
    id:    ProductId,
    patch: ProductPatch,
  ) -> Result<Option<Product>> {
    patch.validate()?;
    if patch.is_empty() {
      return self.get(id).await;
    }

    let attributes_str = patch.attributes.as_ref().map(encode_attributes).transpose()?;
    let tags_str       = patch.tags.as_deref().map(encode_tags).transpose()?;
    let price          = patch.price.map(encode_price);
    let ProductPatch { name, category, image_url, description, .. } = patch;

    let raw: Option<RawProduct> = self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE products
                 SET name        = COALESCE(?1, name),
                     category    = COALESCE(?2, category),
                     price       = COALESCE(?3, price),
                     image_url   = COALESCE(?4, image_url),
                     attributes  = COALESCE(?5, attributes),
                     tags        = COALESCE(?6, tags),
                     description = COALESCE(?7, description)
                 WHERE id = ?8
                 RETURNING {PRODUCT_COLUMNS}"
              ),
              rusqlite::params![
                name,
                category,
                price,
                image_url,
                attributes_str,
                tags_str,
                description,
                id,
              ],
              RawProduct::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProduct::into_product).transpose()
  }

  async fn delete(&self, id: ProductId) -> Result<Option<ProductId>> {
    self
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "DELETE FROM products WHERE id = ?1 RETURNING id",
              rusqlite::params![id],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await
  }
}
