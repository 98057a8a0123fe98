//! The sample catalog loaded by `catalog-server --seed`.

use catalog_core::{
  product::{Attributes, NewProduct},
  store::CatalogStore as _,
};
use catalog_store_sqlite::SqliteStore;
use serde_json::{Value, json};

fn attributes(value: Value) -> Attributes {
  match value {
    Value::Object(map) => map,
    _ => Attributes::new(),
  }
}

fn product(
  name: &str,
  category: &str,
  price: f64,
  image_url: &str,
  attrs: Value,
  tags: &[&str],
  description: &str,
) -> NewProduct {
  NewProduct {
    image_url: Some(image_url.to_owned()),
    attributes: attributes(attrs),
    tags: tags.iter().map(|t| (*t).to_owned()).collect(),
    description: description.to_owned(),
    ..NewProduct::new(name, category, price)
  }
}

/// Ten products across electronics and books, in insertion order.
pub fn sample_catalog() -> Vec<NewProduct> {
  vec![
    product(
      "iPhone 17 Pro",
      "Electronics",
      1099.00,
      "https://images.unsplash.com/photo-1764746218363-6cb017fcd926?w=400",
      json!({
        "brand": "Apple", "screen": "6.3 inches", "storage": "256GB",
        "color": "Cosmic Orange", "chip": "A19 Pro"
      }),
      &["smartphone", "premium", "apple", "5g"],
      "Latest iPhone with A19 Pro chip and professional camera system for stunning photos",
    ),
    product(
      "MacBook Pro M4 14-inch",
      "Electronics",
      1999.00,
      "https://m.media-amazon.com/images/I/61eA9PkZ07L._AC_UY436_FMwebp_QL65_.jpg?w=400",
      json!({
        "brand": "Apple", "cpu": "M4", "ram": "16GB", "storage": "512GB",
        "display": "Liquid Retina XDR"
      }),
      &["laptop", "premium", "apple", "professional"],
      "Powerful laptop for professionals with M4 chip and stunning Liquid Retina XDR display",
    ),
    product(
      "AirPods Pro",
      "Electronics",
      249.00,
      "https://images.unsplash.com/photo-1588156979435-379b9d365296?w=400",
      json!({
        "brand": "Apple", "noise_cancellation": true,
        "battery_life": "6 hours", "charging_case": "MagSafe"
      }),
      &["audio", "premium", "apple", "wireless"],
      "Premium wireless earbuds with active noise cancellation and spatial audio support",
    ),
    product(
      "Samsung Galaxy S23 Ultra",
      "Electronics",
      1100.00,
      "https://images.unsplash.com/photo-1678911820864-e2c567c655d7?w=400",
      json!({
        "brand": "Samsung", "screen": "6.8 inches", "storage": "256GB",
        "camera": "200MP", "s_pen": true
      }),
      &["smartphone", "premium", "samsung", "android"],
      "Flagship Android smartphone with 200MP camera, S Pen, and powerful performance",
    ),
    product(
      "The Great Gatsby",
      "Books",
      12.99,
      "https://images.unsplash.com/photo-1615413833480-6e8427dbcc5e?w=400",
      json!({
        "author": "F. Scott Fitzgerald", "pages": 180, "year": 1925,
        "publisher": "Scribner", "isbn": "978-0743273565"
      }),
      &["fiction", "classic", "american", "literature"],
      "Classic American novel about the Jazz Age, wealth, and the American Dream in the 1920s",
    ),
    product(
      "1984",
      "Books",
      14.99,
      "https://images.unsplash.com/photo-1622609184693-58079bb6742f?w=400",
      json!({
        "author": "George Orwell", "pages": 328, "year": 1949,
        "publisher": "Secker & Warburg", "isbn": "978-0451524935"
      }),
      &["fiction", "dystopian", "classic", "political"],
      "Dystopian novel about totalitarianism, surveillance, and the dangers of authoritarian government",
    ),
    product(
      "Atomic Habits",
      "Books",
      12.99,
      "https://images.unsplash.com/photo-1686764288887-dae4e7d50d58?w=400",
      json!({
        "author": "James Clear", "pages": 320, "year": 2018,
        "publisher": "Avery", "isbn": "978-0735211292"
      }),
      &["self-help", "productivity", "non-fiction", "bestseller"],
      "Proven framework for improving every day by building better habits and breaking bad ones",
    ),
    product(
      "Sony WH-1000XM4",
      "Electronics",
      349.99,
      "https://images.unsplash.com/photo-1758118107816-ddddfa3a1f44?w=400",
      json!({
        "brand": "Sony", "noise_cancellation": true, "battery_life": "30 hours",
        "type": "Over-ear", "bluetooth": "5.0"
      }),
      &["audio", "premium", "wireless", "headphones"],
      "Industry-leading noise canceling headphones with exceptional sound quality and comfort",
    ),
    product(
      "Dell XPS 15",
      "Electronics",
      1599.99,
      "https://images.unsplash.com/photo-1622286346003-c5c7e63b1088?w=400",
      json!({
        "brand": "Dell", "cpu": "Intel i7-13700H", "ram": "16GB",
        "storage": "512GB SSD", "gpu": "RTX 4060"
      }),
      &["laptop", "windows", "professional", "gaming"],
      "Premium Windows laptop with stunning display and powerful performance for creative professionals",
    ),
    product(
      "Thinking, Fast and Slow",
      "Books",
      18.99,
      "https://images.unsplash.com/photo-1558025623-2aafbebe8daf?w=400",
      json!({
        "author": "Daniel Kahneman", "pages": 512, "year": 2011,
        "publisher": "Farrar, Straus and Giroux", "isbn": "978-0374533557"
      }),
      &["psychology", "non-fiction", "science", "bestseller"],
      "Explores the two systems that drive the way we think and make decisions",
    ),
  ]
}

/// Drop and recreate the schema, then insert [`sample_catalog`].
/// Returns the number of products inserted.
pub async fn seed(store: &SqliteStore) -> catalog_store_sqlite::Result<usize> {
  store.reset().await?;
  let mut inserted = 0;
  for input in sample_catalog() {
    store.create(input).await?;
    inserted += 1;
  }
  tracing::info!(count = inserted, "sample products inserted");
  Ok(inserted)
}

#[cfg(test)]
mod tests {
  use catalog_core::{
    query::{AttributeFilter, ProductQuery, SearchQuery},
    store::CatalogStore,
  };

  use super::*;

  #[test]
  fn sample_catalog_is_valid() {
    let catalog = sample_catalog();
    assert_eq!(catalog.len(), 10);
    for p in &catalog {
      p.validate().unwrap();
      assert!(!p.attributes.is_empty(), "{}", p.name);
      assert_eq!(p.tags.len(), 4, "{}", p.name);
    }
  }

  #[tokio::test]
  async fn seeding_twice_replaces_catalog() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    assert_eq!(seed(&store).await.unwrap(), 10);
    assert_eq!(seed(&store).await.unwrap(), 10);

    let all = store.list(&ProductQuery::default()).await.unwrap();
    assert_eq!(all.len(), 10);
    assert_eq!(all.iter().map(|p| p.id).min(), Some(1));

    let categories = store.categories().await.unwrap();
    assert_eq!(categories, ["Books", "Electronics"]);
  }

  #[tokio::test]
  async fn seeded_catalog_answers_typical_queries() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    seed(&store).await.unwrap();

    let apple = store
      .list(&ProductQuery {
        attribute: Some(AttributeFilter::new("brand", "Apple").unwrap()),
        ..ProductQuery::default()
      })
      .await
      .unwrap();
    assert_eq!(apple.len(), 3);

    let wireless = store
      .list(&ProductQuery {
        tag: Some("wireless".to_owned()),
        ..ProductQuery::default()
      })
      .await
      .unwrap();
    let mut names: Vec<_> = wireless.iter().map(|p| p.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["AirPods Pro", "Sony WH-1000XM4"]);

    let hits = store
      .search(&SearchQuery::parse("camera").unwrap())
      .await
      .unwrap();
    let mut names: Vec<_> = hits.iter().map(|h| h.product.name.as_str()).collect();
    names.sort();
    assert_eq!(names, ["Samsung Galaxy S23 Ultra", "iPhone 17 Pro"]);
  }
}
