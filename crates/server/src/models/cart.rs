//! Cart domain types.

use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{CartId, CartItemId, ProductId};

/// A cart line joined with its product's live title, slug and price.
///
/// The price here is the product's current price, not a snapshot; it tracks
/// price changes until checkout copies it into an order item.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CartLine {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub title: String,
    pub slug: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl CartLine {
    /// Line subtotal: quantity times the live product price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// A user's cart with its lines, ordered by insertion.
#[derive(Debug, Clone)]
pub struct CartContents {
    pub id: CartId,
    pub lines: Vec<CartLine>,
}

impl CartContents {
    /// Cart subtotal, always recomputed from the lines, never stored.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn line(id: i32, quantity: i32, price: &str) -> CartLine {
        CartLine {
            id: CartItemId::new(id),
            product_id: ProductId::new(id),
            title: format!("Product {id}"),
            slug: format!("product-{id}"),
            price: price.parse().unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_line_subtotal_is_exact_decimal() {
        let l = line(1, 3, "19.99");
        assert_eq!(l.subtotal(), Decimal::new(5997, 2));
    }

    #[test]
    fn test_cart_subtotal_sums_lines() {
        let cart = CartContents {
            id: CartId::new(1),
            lines: vec![line(1, 3, "10.00"), line(2, 2, "20.00")],
        };
        assert_eq!(cart.subtotal(), "70.00".parse().unwrap());
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = CartContents {
            id: CartId::new(1),
            lines: vec![],
        };
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
