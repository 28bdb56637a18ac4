//! Catalog repository: categories, products and images.
//!
//! Slugs are derived from titles at creation time; on collision a numeric
//! suffix is appended until a free slug is found, with the unique index as
//! the final arbiter.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use orchard_core::{CategoryId, ProductId, ProductImageId, slug, slugify};

use super::RepositoryError;
use crate::models::{Category, NewProduct, Product, ProductDetail, ProductImage};

/// Internal row for products joined with their category name.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    category_id: CategoryId,
    title: String,
    price: Decimal,
    old_price: Option<Decimal>,
    description: String,
    stock: i32,
    slug: String,
    created_at: DateTime<Utc>,
    category: String,
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: ProductImageId,
    product_id: ProductId,
    url: String,
}

/// Repository for catalog database operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug FROM categories ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Create a category, deriving a unique slug from its name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    pub async fn create_category(&self, name: &str) -> Result<Category, RepositoryError> {
        let slug = self
            .unique_slug("categories", &slugify_or_fallback(name))
            .await?;

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, slug) VALUES ($1, $2) RETURNING id, name, slug",
        )
        .bind(name)
        .bind(&slug)
        .fetch_one(self.pool)
        .await
        .map_err(|e| conflict_on_unique(e, "category name or slug already exists"))?;

        Ok(category)
    }

    /// List products with category names and images, newest first.
    /// Optionally filtered by category slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_products(
        &self,
        category_slug: Option<&str>,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let rows = match category_slug {
            Some(cat) => {
                sqlx::query_as::<_, ProductRow>(
                    r"
                    SELECT p.id, p.category_id, p.title, p.price, p.old_price,
                           p.description, p.stock, p.slug, p.created_at,
                           c.name AS category
                    FROM products p
                    JOIN categories c ON c.id = p.category_id
                    WHERE c.slug = $1
                    ORDER BY p.created_at DESC, p.id DESC
                    ",
                )
                .bind(cat)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductRow>(
                    r"
                    SELECT p.id, p.category_id, p.title, p.price, p.old_price,
                           p.description, p.stock, p.slug, p.created_at,
                           c.name AS category
                    FROM products p
                    JOIN categories c ON c.id = p.category_id
                    ORDER BY p.created_at DESC, p.id DESC
                    ",
                )
                .fetch_all(self.pool)
                .await?
            }
        };

        self.attach_images(rows).await
    }

    /// Get a single product by slug, with category name and images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the slug is unknown.
    pub async fn get_by_slug(&self, slug: &str) -> Result<ProductDetail, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id, p.category_id, p.title, p.price, p.old_price,
                   p.description, p.stock, p.slug, p.created_at,
                   c.name AS category
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let mut details = self.attach_images(vec![row]).await?;
        details.pop().ok_or(RepositoryError::NotFound)
    }

    /// Load products by id, with category names and images.
    ///
    /// Used by the wishlist view; preserves no particular ordering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list_by_ids(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i32> = ids.iter().map(ProductId::as_i32).collect();
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT p.id, p.category_id, p.title, p.price, p.old_price,
                   p.description, p.stock, p.slug, p.created_at,
                   c.name AS category
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.id = ANY($1)
            ",
        )
        .bind(&raw_ids)
        .fetch_all(self.pool)
        .await?;

        self.attach_images(rows).await
    }

    /// Create a product, deriving a unique slug from its title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist and
    /// `RepositoryError::Conflict` if the derived slug loses a creation race.
    pub async fn create_product(&self, input: &NewProduct) -> Result<Product, RepositoryError> {
        let slug = self
            .unique_slug("products", &slugify_or_fallback(&input.title))
            .await?;

        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (category_id, title, price, old_price, description, stock, slug)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, category_id, title, price, old_price, description, stock, slug, created_at
            ",
        )
        .bind(input.category_id)
        .bind(&input.title)
        .bind(input.price)
        .bind(input.old_price)
        .bind(&input.description)
        .bind(input.stock)
        .bind(&slug)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            conflict_on_unique(e, "product slug already exists")
        })?;

        Ok(product)
    }

    /// Attach an image URL to a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn add_image(
        &self,
        product_id: ProductId,
        url: &str,
    ) -> Result<ProductImage, RepositoryError> {
        let image = sqlx::query_as::<_, ProductImage>(
            "INSERT INTO product_images (product_id, url) VALUES ($1, $2) RETURNING id, url",
        )
        .bind(product_id)
        .bind(url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(image)
    }

    /// Delete a product.
    ///
    /// Cart items, images and wishlist entries cascade; order items RESTRICT,
    /// so a product referenced by any order cannot be deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if order items reference the
    /// product and `RepositoryError::NotFound` if it does not exist.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_foreign_key_violation()
                {
                    return RepositoryError::Conflict(
                        "product is referenced by existing orders".to_owned(),
                    );
                }
                RepositoryError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Find the first free slug for `base` in `table` (`base`, `base-1`, ...).
    async fn unique_slug(&self, table: &str, base: &str) -> Result<String, RepositoryError> {
        let query = format!("SELECT 1 FROM {table} WHERE slug = $1");
        let mut n = 0;
        loop {
            let candidate = slug::candidate(base, n);
            let taken = sqlx::query_scalar::<_, i32>(&query)
                .bind(&candidate)
                .fetch_optional(self.pool)
                .await?;
            if taken.is_none() {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Bulk-load images for the given product rows and assemble details.
    async fn attach_images(
        &self,
        rows: Vec<ProductRow>,
    ) -> Result<Vec<ProductDetail>, RepositoryError> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id.as_i32()).collect();

        let mut images_by_product: std::collections::HashMap<ProductId, Vec<ProductImage>> =
            std::collections::HashMap::new();
        if !ids.is_empty() {
            let images = sqlx::query_as::<_, ImageRow>(
                "SELECT id, product_id, url FROM product_images WHERE product_id = ANY($1) ORDER BY id",
            )
            .bind(&ids)
            .fetch_all(self.pool)
            .await?;

            for img in images {
                images_by_product
                    .entry(img.product_id)
                    .or_default()
                    .push(ProductImage {
                        id: img.id,
                        url: img.url,
                    });
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let images = images_by_product.remove(&row.id).unwrap_or_default();
                ProductDetail {
                    id: row.id,
                    title: row.title,
                    category: row.category,
                    price: row.price,
                    old_price: row.old_price,
                    description: row.description,
                    stock: row.stock,
                    slug: row.slug,
                    created_at: row.created_at,
                    images,
                }
            })
            .collect())
    }
}

/// Untitled entities still need a usable slug base.
fn slugify_or_fallback(text: &str) -> String {
    let base = slugify(text);
    if base.is_empty() {
        "item".to_owned()
    } else {
        base
    }
}

fn conflict_on_unique(e: sqlx::Error, message: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(message.to_owned());
    }
    RepositoryError::Database(e)
}
