//! Query construction for product reads.
//!
//! Every user-supplied value, attribute keys included, is passed as a bound
//! parameter. Only fixed SQL fragments are concatenated.

use catalog_core::query::{ProductQuery, SearchQuery};
use rusqlite::types::Value;

use crate::encode::PRODUCT_COLUMNS;

/// SQL text plus the parameters bound to its `?N` placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
  pub sql:    String,
  pub params: Vec<Value>,
}

impl Statement {
  fn bind(&mut self, value: impl Into<Value>) -> String {
    self.params.push(value.into());
    format!("?{}", self.params.len())
  }
}

/// Translate a search query into an FTS5 match expression: each term quoted
/// as a literal string, all terms required. Returns `None` when the query has
/// no word tokens and so cannot match anything.
pub fn fts_expression(query: &SearchQuery) -> Option<String> {
  let terms = query.terms();
  if terms.is_empty() {
    return None;
  }
  Some(
    terms
      .iter()
      .map(|t| format!("\"{t}\""))
      .collect::<Vec<_>>()
      .join(" "),
  )
}

/// Text form of an attribute value for comparison: JSON booleans become
/// `true`/`false`, numbers their decimal text, strings their content.
const ATTRIBUTE_TEXT: &str = "CASE a.type \
   WHEN 'true' THEN 'true' \
   WHEN 'false' THEN 'false' \
   ELSE CAST(a.value AS TEXT) END";

/// Build the `list` statement: conjunctive filters, newest first.
pub fn list_products(query: &ProductQuery) -> Statement {
  let mut stmt = Statement { sql: String::new(), params: Vec::new() };
  let mut conds: Vec<String> = Vec::new();

  if let Some(category) = &query.category {
    let p = stmt.bind(category.clone());
    conds.push(format!("category = {p}"));
  }

  if let Some(tag) = &query.tag {
    let p = stmt.bind(tag.clone());
    conds.push(format!(
      "EXISTS (SELECT 1 FROM json_each(products.tags) AS t WHERE t.value = {p})"
    ));
  }

  if let Some(text) = &query.text {
    match fts_expression(text) {
      Some(expr) => {
        let p = stmt.bind(expr);
        conds.push(format!(
          "id IN (SELECT rowid FROM products_fts WHERE products_fts MATCH {p})"
        ));
      }
      None => conds.push("FALSE".to_owned()),
    }
  }

  if let Some(attr) = &query.attribute {
    let key = stmt.bind(attr.key.as_str().to_owned());
    let value = stmt.bind(attr.value.clone());
    conds.push(format!(
      "EXISTS (SELECT 1 FROM json_each(products.attributes) AS a \
       WHERE a.key = {key} AND {ATTRIBUTE_TEXT} = {value})"
    ));
  }

  let where_clause = if conds.is_empty() {
    String::new()
  } else {
    format!(" WHERE {}", conds.join(" AND "))
  };

  stmt.sql = format!(
    "SELECT {PRODUCT_COLUMNS} FROM products{where_clause} \
     ORDER BY created_at DESC, id DESC"
  );
  stmt
}

/// Build the ranked search statement for an FTS5 match expression.
///
/// `bm25()` is lower for better matches, so it is negated into a score where
/// higher is more relevant.
pub fn search_products(expr: String) -> Statement {
  let columns = PRODUCT_COLUMNS
    .split(", ")
    .map(|c| format!("p.{c}"))
    .collect::<Vec<_>>()
    .join(", ");

  Statement {
    sql:    format!(
      "SELECT {columns}, -bm25(products_fts) AS relevance
       FROM products_fts
       JOIN products p ON p.id = products_fts.rowid
       WHERE products_fts MATCH ?1
       ORDER BY relevance DESC, p.created_at DESC, p.id DESC"
    ),
    params: vec![Value::Text(expr)],
  }
}
