//! Wishlist repository.
//!
//! One wishlist per user (lazy upsert like the cart), holding a plain set of
//! product references: no quantities, no ordering guarantee.

use sqlx::PgPool;

use orchard_core::{ProductId, UserId, WishlistId};

use super::RepositoryError;

/// Result of toggling wishlist membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    /// Wire form used in the toggle response.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

/// Repository for wishlist database operations.
pub struct WishlistRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WishlistRepository<'a> {
    /// Create a new wishlist repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's wishlist id, creating the wishlist on first access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user: UserId) -> Result<WishlistId, RepositoryError> {
        let id = sqlx::query_scalar::<_, WishlistId>(
            r"
            INSERT INTO wishlists (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id
            ",
        )
        .bind(user)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// The product ids currently on the user's wishlist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn product_ids(&self, user: UserId) -> Result<Vec<ProductId>, RepositoryError> {
        let wishlist_id = self.get_or_create(user).await?;

        let ids = sqlx::query_scalar::<_, ProductId>(
            "SELECT product_id FROM wishlist_products WHERE wishlist_id = $1",
        )
        .bind(wishlist_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }

    /// Toggle a product's wishlist membership.
    ///
    /// Removes the product if present, adds it otherwise. Toggling twice is a
    /// no-op overall.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn toggle(
        &self,
        user: UserId,
        product_id: ProductId,
    ) -> Result<ToggleOutcome, RepositoryError> {
        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(self.pool)
            .await?;
        if exists.is_none() {
            return Err(RepositoryError::NotFound);
        }

        let wishlist_id = self.get_or_create(user).await?;

        let removed = sqlx::query(
            "DELETE FROM wishlist_products WHERE wishlist_id = $1 AND product_id = $2",
        )
        .bind(wishlist_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        if removed.rows_affected() > 0 {
            return Ok(ToggleOutcome::Removed);
        }

        sqlx::query(
            r"
            INSERT INTO wishlist_products (wishlist_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(wishlist_id)
        .bind(product_id)
        .execute(self.pool)
        .await?;

        Ok(ToggleOutcome::Added)
    }
}
