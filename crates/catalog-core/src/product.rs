//! Product types: the single entity of the catalog.
//!
//! A product is a flat record with two open-ended parts: an attribute mapping
//! for category-specific facets (brand, storage size, author, …) and an
//! ordered tag sequence used for faceted filtering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned product identifier.
pub type ProductId = i64;

/// Open-ended facet mapping. Keys vary per category; values are arbitrary
/// JSON, usually scalars.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Largest price magnitude a `DECIMAL(10,2)` column can hold.
pub const MAX_PRICE: f64 = 99_999_999.99;

// ─── Product ─────────────────────────────────────────────────────────────────

/// A persisted product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id:          ProductId,
  pub name:        String,
  pub category:    String,
  pub price:       f64,
  pub image_url:   Option<String>,
  pub attributes:  Attributes,
  pub tags:        Vec<String>,
  pub description: String,
  /// Server-assigned; never changes after creation.
  pub created_at:  DateTime<Utc>,
}

/// A search hit: the product plus its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
  #[serde(flatten)]
  pub product: Product,
  /// Higher is more relevant.
  pub rank:    f64,
}

// ─── NewProduct ──────────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::create`].
/// `id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
  pub name:        String,
  pub category:    String,
  pub price:       f64,
  pub image_url:   Option<String>,
  pub attributes:  Attributes,
  pub tags:        Vec<String>,
  pub description: String,
}

impl NewProduct {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(
    name: impl Into<String>,
    category: impl Into<String>,
    price: f64,
  ) -> Self {
    Self {
      name: name.into(),
      category: category.into(),
      price,
      image_url: None,
      attributes: Attributes::new(),
      tags: Vec::new(),
      description: String::new(),
    }
  }

  /// Check the presence rules for creation: non-blank name and category and a
  /// finite price within [`MAX_PRICE`].
  pub fn validate(&self) -> Result<()> {
    require_text("name", &self.name)?;
    require_text("category", &self.category)?;
    require_price(self.price)
  }
}

// ─── ProductPatch ────────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::update`].
///
/// `None` means "keep the stored value"; there is no way to clear a field
/// through a patch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
  pub name:        Option<String>,
  pub category:    Option<String>,
  pub price:       Option<f64>,
  pub image_url:   Option<String>,
  pub attributes:  Option<Attributes>,
  pub tags:        Option<Vec<String>>,
  pub description: Option<String>,
}

impl ProductPatch {
  /// Supplied values must satisfy the same rules as on creation.
  pub fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      require_text("name", name)?;
    }
    if let Some(category) = &self.category {
      require_text("category", category)?;
    }
    if let Some(price) = self.price {
      require_price(price)?;
    }
    Ok(())
  }

  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

fn require_text(field: &str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::invalid(format!("{field} must not be empty")));
  }
  Ok(())
}

fn require_price(price: f64) -> Result<()> {
  if !price.is_finite() || price.abs() > MAX_PRICE {
    return Err(Error::invalid(format!(
      "price must be a number between -{MAX_PRICE} and {MAX_PRICE}"
    )));
  }
  Ok(())
}
