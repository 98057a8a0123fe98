//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that lexical order equals chronological order.
//! Attributes and tags are stored as compact JSON.

use catalog_core::product::{Attributes, Product, ProductId, RankedProduct};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{Error, Result};

/// Column list shared by every statement that yields a product row. The
/// indices used by [`RawProduct::from_row`] follow this order.
pub const PRODUCT_COLUMNS: &str =
  "id, name, category, price, image_url, attributes, tags, description, created_at";

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Price ───────────────────────────────────────────────────────────────────

/// Round to cents, matching a `DECIMAL(10,2)` column.
pub fn encode_price(price: f64) -> f64 { (price * 100.0).round() / 100.0 }

// ─── Attributes ──────────────────────────────────────────────────────────────

pub fn encode_attributes(attributes: &Attributes) -> Result<String> {
  Ok(serde_json::to_string(attributes)?)
}

pub fn decode_attributes(s: &str) -> Result<Attributes> {
  Ok(serde_json::from_str(s)?)
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `products` row.
pub struct RawProduct {
  pub id:          ProductId,
  pub name:        String,
  pub category:    String,
  pub price:       f64,
  pub image_url:   Option<String>,
  pub attributes:  String,
  pub tags:        String,
  pub description: String,
  pub created_at:  String,
}

impl RawProduct {
  /// Read the [`PRODUCT_COLUMNS`] prefix of a row.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      category:    row.get(2)?,
      price:       row.get(3)?,
      image_url:   row.get(4)?,
      attributes:  row.get(5)?,
      tags:        row.get(6)?,
      description: row.get(7)?,
      created_at:  row.get(8)?,
    })
  }

  pub fn into_product(self) -> Result<Product> {
    Ok(Product {
      id:          self.id,
      name:        self.name,
      category:    self.category,
      price:       self.price,
      image_url:   self.image_url,
      attributes:  decode_attributes(&self.attributes)?,
      tags:        decode_tags(&self.tags)?,
      description: self.description,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// A product row followed by a `rank` column.
pub struct RawRankedProduct {
  pub product: RawProduct,
  pub rank:    f64,
}

impl RawRankedProduct {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self { product: RawProduct::from_row(row)?, rank: row.get(9)? })
  }

  pub fn into_ranked(self) -> Result<RankedProduct> {
    Ok(RankedProduct { product: self.product.into_product()?, rank: self.rank })
  }
}
