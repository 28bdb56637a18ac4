//! Catalog domain types: categories, products and their images.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orchard_core::{CategoryId, ProductId, ProductImageId};

/// A product category.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// An image attached to a product.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductImage {
    pub id: ProductImageId,
    pub url: String,
}

/// A catalog product as stored.
///
/// `stock` is kept non-negative by a database CHECK constraint; `slug` is
/// globally unique and derived from the title at creation time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub title: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub description: String,
    pub stock: i32,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

/// A product with its category name and images, as served by the catalog
/// endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub description: String,
    pub stock: i32,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub images: Vec<ProductImage>,
}

/// Input for creating a product (CLI seed and tests).
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub title: String,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub description: String,
    pub stock: i32,
}
