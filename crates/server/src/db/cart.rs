//! Cart repository.
//!
//! One cart per user, created lazily by an idempotent upsert on the
//! `user_id` unique key. Lines are unique per (cart, product); adding an
//! already-carted product merges quantities in a single statement. Stock is
//! never checked here, only at checkout.

use sqlx::PgPool;

use orchard_core::{CartId, CartItemId, ProductId, UserId};

use super::RepositoryError;
use crate::models::{CartContents, CartLine};

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart id, creating the cart on first access.
    ///
    /// Idempotent: concurrent first access cannot create two carts because
    /// the upsert targets the `user_id` unique constraint.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_or_create(&self, user: UserId) -> Result<CartId, RepositoryError> {
        let id = sqlx::query_scalar::<_, CartId>(
            r"
            INSERT INTO carts (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET updated_at = now()
            RETURNING id
            ",
        )
        .bind(user)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Load the user's cart with its lines, ordered by insertion.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn contents(&self, user: UserId) -> Result<CartContents, RepositoryError> {
        let cart_id = self.get_or_create(user).await?;

        let lines = sqlx::query_as::<_, CartLine>(
            r"
            SELECT ci.id, ci.product_id, p.title, p.slug, p.price, ci.quantity
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            ",
        )
        .bind(cart_id)
        .fetch_all(self.pool)
        .await?;

        Ok(CartContents {
            id: cart_id,
            lines,
        })
    }

    /// Add `quantity` units of a product to the user's cart.
    ///
    /// If a line for this product already exists its quantity is incremented
    /// by `quantity`; otherwise a new line is created.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub async fn add_item(
        &self,
        user: UserId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let cart_id = self.get_or_create(user).await?;

        sqlx::query(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity
            ",
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        Ok(())
    }

    /// Overwrite a cart line's quantity; a quantity of zero or less deletes
    /// the line instead.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not belong to the
    /// user's cart.
    pub async fn set_item_quantity(
        &self,
        user: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        if quantity <= 0 {
            return self.remove_item(user, item_id).await;
        }

        let result = sqlx::query(
            r"
            UPDATE cart_items ci
            SET quantity = $3
            FROM carts c
            WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Remove a line from the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the line does not belong to the
    /// user's cart.
    pub async fn remove_item(
        &self,
        user: UserId,
        item_id: CartItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.id = $1 AND ci.cart_id = c.id AND c.user_id = $2
            ",
        )
        .bind(item_id)
        .bind(user)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
