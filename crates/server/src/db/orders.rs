//! Order repository: the checkout transaction, order reads, and the payment
//! ledger.
//!
//! Checkout is the one place in the backend where strict atomicity is a hard
//! contract: stock validation, order/item creation, total computation, stock
//! decrement and cart clearing all commit together or not at all. Product
//! rows are locked (`FOR UPDATE OF p`) for the duration of the transaction so
//! concurrent checkouts of the same product serialize and the stock check can
//! never be stale relative to the decrement.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use orchard_core::{AddressId, CartId, OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProductId, UserId};

use super::RepositoryError;
use crate::models::{CheckoutReceipt, Order, OrderDetail, OrderLine, PaymentRecord};

/// Failure modes of the checkout transaction.
///
/// Any of these aborts the whole transaction; no order, order item or stock
/// mutation from the failed invocation persists.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The chosen address does not exist or belongs to another user.
    #[error("address not found")]
    AddressNotFound,

    /// The cart has no items (or was never created).
    #[error("cart is empty")]
    EmptyCart,

    /// A cart line asked for more units than the product has in stock.
    #[error("not enough stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: String,
        requested: i32,
        available: i32,
    },

    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Failure modes of payment recording.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The referenced order does not exist.
    #[error("order not found")]
    OrderNotFound,

    /// A payment with this external identifier was already recorded.
    #[error("payment {0} already recorded")]
    Duplicate(String),

    /// Underlying database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A cart line joined with the live product row, as seen inside the checkout
/// transaction while the product row is locked.
#[derive(Debug, sqlx::FromRow)]
struct CheckoutLine {
    product_id: ProductId,
    quantity: i32,
    title: String,
    price: Decimal,
    stock: i32,
}

impl CheckoutLine {
    /// Fail if the requested quantity exceeds the available stock.
    fn ensure_available(&self) -> Result<(), CheckoutError> {
        if self.quantity > self.stock {
            return Err(CheckoutError::InsufficientStock {
                product: self.title.clone(),
                requested: self.quantity,
                available: self.stock,
            });
        }
        Ok(())
    }

    /// Line subtotal at the price being snapshotted.
    fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// Sum of line subtotals; the order total written at step 3 of checkout.
fn order_total(lines: &[CheckoutLine]) -> Decimal {
    lines.iter().map(CheckoutLine::subtotal).sum()
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Convert the user's cart into an order, atomically.
    ///
    /// In one transaction: verifies address ownership, loads the cart lines
    /// with their product rows locked, creates the order (PENDING), snapshots
    /// each line into an order item at the product's current price, decrements
    /// stock (floored at zero), writes the accumulated total, and empties the
    /// cart. Iteration order is by cart item id, so a given cart snapshot
    /// always produces the same result.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::AddressNotFound`, `CheckoutError::EmptyCart` or
    /// `CheckoutError::InsufficientStock`; on any error every write from this
    /// invocation is rolled back.
    pub async fn checkout(
        &self,
        user: UserId,
        address_id: AddressId,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        let mut tx = self.pool.begin().await?;

        let address = sqlx::query_scalar::<_, AddressId>(
            "SELECT id FROM addresses WHERE id = $1 AND user_id = $2",
        )
        .bind(address_id)
        .bind(user)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(address_id) = address else {
            return Err(CheckoutError::AddressNotFound);
        };

        let cart = sqlx::query_scalar::<_, CartId>("SELECT id FROM carts WHERE user_id = $1")
            .bind(user)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(cart_id) = cart else {
            return Err(CheckoutError::EmptyCart);
        };

        // Locks the product rows until commit/rollback, so the stock check
        // below cannot go stale and concurrent checkouts serialize per product.
        let lines = sqlx::query_as::<_, CheckoutLine>(
            r"
            SELECT ci.product_id, ci.quantity, p.title, p.price, p.stock
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            FOR UPDATE OF p
            ",
        )
        .bind(cart_id)
        .fetch_all(&mut *tx)
        .await?;

        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let order_id = sqlx::query_scalar::<_, OrderId>(
            r"
            INSERT INTO orders (user_id, address_id, status, total)
            VALUES ($1, $2, $3, 0)
            RETURNING id
            ",
        )
        .bind(user)
        .bind(address_id)
        .bind(OrderStatus::Pending)
        .fetch_one(&mut *tx)
        .await?;

        for line in &lines {
            line.ensure_available()?;

            sqlx::query(
                r"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await?;

            // GREATEST floors at zero; unreachable given the check above, but
            // the stock column must never go negative.
            sqlx::query("UPDATE products SET stock = GREATEST(stock - $2, 0) WHERE id = $1")
                .bind(line.product_id)
                .bind(line.quantity)
                .execute(&mut *tx)
                .await?;
        }

        let total = order_total(&lines);

        sqlx::query("UPDATE orders SET total = $2, updated_at = now() WHERE id = $1")
            .bind(order_id)
            .bind(total)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(CheckoutReceipt { order_id, total })
    }

    /// List the user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, address_id, status, total, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get one of the user's orders with its lines.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order does not exist or
    /// belongs to another user.
    pub async fn get_for_user(
        &self,
        user: UserId,
        id: OrderId,
    ) -> Result<OrderDetail, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(
            r"
            SELECT id, user_id, address_id, status, total, created_at, updated_at
            FROM orders
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(id)
        .bind(user)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        let items = sqlx::query_as::<_, OrderLine>(
            r"
            SELECT oi.id, oi.product_id, p.title, p.slug, oi.quantity, oi.price
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            ",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(OrderDetail { order, items })
    }

    /// Append a payment-result event from the external payment collaborator
    /// to the ledger.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::OrderNotFound` for an unknown order and
    /// `PaymentError::Duplicate` when the external payment id was already
    /// recorded; existing rows are never overwritten.
    pub async fn record_payment(
        &self,
        order_id: OrderId,
        payment_id: &str,
        method: PaymentMethod,
        status: PaymentStatus,
        amount: Decimal,
    ) -> Result<PaymentRecord, PaymentError> {
        let record = sqlx::query_as::<_, PaymentRecord>(
            r"
            INSERT INTO payment_records (order_id, payment_id, method, status, amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, order_id, payment_id, method, status, amount, created_at
            ",
        )
        .bind(order_id)
        .bind(payment_id)
        .bind(method)
        .bind(status)
        .bind(amount)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return PaymentError::Duplicate(payment_id.to_owned());
                }
                if db_err.is_foreign_key_violation() {
                    return PaymentError::OrderNotFound;
                }
            }
            PaymentError::Database(e)
        })?;

        Ok(record)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(quantity: i32, price: &str, stock: i32, title: &str) -> CheckoutLine {
        CheckoutLine {
            product_id: ProductId::new(1),
            quantity,
            title: title.to_owned(),
            price: price.parse().unwrap(),
            stock,
        }
    }

    #[test]
    fn test_order_total_is_sum_of_line_subtotals() {
        // Product A: 3 x 10.00, Product B: 2 x 20.00 => 70.00
        let lines = vec![line(3, "10.00", 5, "A"), line(2, "20.00", 2, "B")];
        assert_eq!(order_total(&lines), "70.00".parse().unwrap());
    }

    #[test]
    fn test_order_total_uses_exact_decimal_arithmetic() {
        // 0.1 + 0.2 style drift must not appear
        let lines = vec![line(1, "0.10", 10, "A"), line(1, "0.20", 10, "B")];
        assert_eq!(order_total(&lines), "0.30".parse().unwrap());
    }

    #[test]
    fn test_ensure_available_passes_at_exact_stock() {
        assert!(line(2, "5.00", 2, "B").ensure_available().is_ok());
    }

    #[test]
    fn test_ensure_available_names_product_and_quantities() {
        let err = line(2, "5.00", 1, "B").ensure_available().unwrap_err();
        match err {
            CheckoutError::InsufficientStock {
                product,
                requested,
                available,
            } => {
                assert_eq!(product, "B");
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
    }
}
