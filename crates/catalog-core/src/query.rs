//! Filter and search parameters accepted by [`crate::store::CatalogStore`].
//!
//! Everything here is validated on construction. A backend receiving a
//! [`ProductQuery`] or a [`SearchQuery`] can embed it in a statement without
//! re-checking user input.

use std::fmt;

use crate::{Error, Result};

/// Longest attribute key accepted in a filter.
pub const MAX_ATTRIBUTE_KEY_LEN: usize = 64;

// ─── AttributeKey ────────────────────────────────────────────────────────────

/// A user-supplied attribute name restricted to `[A-Za-z0-9_-]{1,64}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeKey(String);

impl AttributeKey {
  pub fn parse(key: impl Into<String>) -> Result<Self> {
    let key = key.into();
    if key.is_empty() || key.len() > MAX_ATTRIBUTE_KEY_LEN {
      return Err(Error::invalid(format!(
        "attribute key must be 1 to {MAX_ATTRIBUTE_KEY_LEN} characters"
      )));
    }
    if let Some(bad) = key
      .chars()
      .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
      return Err(Error::invalid(format!(
        "attribute key contains invalid character {bad:?}"
      )));
    }
    Ok(Self(key))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for AttributeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── AttributeFilter ─────────────────────────────────────────────────────────

/// Matches products whose attribute `key` holds a value equal, as text, to
/// `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFilter {
  pub key:   AttributeKey,
  pub value: String,
}

impl AttributeFilter {
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
    Ok(Self { key: AttributeKey::parse(key)?, value: value.into() })
  }
}

// ─── SearchQuery ─────────────────────────────────────────────────────────────

/// Free text matched against product descriptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
  /// Fails with [`Error::InvalidArgument`] when `text` is blank.
  pub fn parse(text: impl Into<String>) -> Result<Self> {
    let text = text.into();
    if text.trim().is_empty() {
      return Err(Error::invalid("Search query required"));
    }
    Ok(Self(text))
  }

  /// Build the listing filter form, which never fails: text without word
  /// tokens (blank included) matches nothing.
  pub fn filter(text: impl Into<String>) -> Self { Self(text.into()) }

  pub fn as_str(&self) -> &str { &self.0 }

  /// The word tokens of the query: maximal runs of alphanumeric characters.
  /// A product matches when its description contains every term.
  pub fn terms(&self) -> Vec<&str> {
    self
      .0
      .split(|c: char| !c.is_alphanumeric())
      .filter(|t| !t.is_empty())
      .collect()
  }
}

// ─── ProductQuery ────────────────────────────────────────────────────────────

/// Parameters for [`crate::store::CatalogStore::list`]. Every set field is a
/// predicate; predicates are combined with AND. The default query matches
/// every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
  /// Exact category match.
  pub category:  Option<String>,
  /// The tag must appear somewhere in the product's tag sequence.
  pub tag:       Option<String>,
  /// Full-text match over the description. Ordering stays by recency.
  pub text:      Option<SearchQuery>,
  pub attribute: Option<AttributeFilter>,
}

impl ProductQuery {
  pub fn is_unfiltered(&self) -> bool { *self == Self::default() }
}
