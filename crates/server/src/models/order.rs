//! Order and payment domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use orchard_core::{
    AddressId, OrderId, OrderItemId, OrderStatus, PaymentMethod, PaymentRecordId, PaymentStatus,
    ProductId, UserId,
};

/// An order header.
///
/// Created by checkout with status `PENDING` and a total computed once from
/// its items; never deleted afterwards, only status transitions. The address
/// reference goes NULL if the address is later deleted.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub address_id: Option<AddressId>,
    pub status: OrderStatus,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order line: immutable snapshot of (product, quantity, price) taken at
/// checkout. `price` never changes even if the product is repriced.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderLine {
    pub id: OrderItemId,
    pub product_id: ProductId,
    pub title: String,
    pub slug: String,
    pub quantity: i32,
    pub price: Decimal,
}

impl OrderLine {
    /// Line subtotal at the snapshotted price.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// An order with its lines.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLine>,
}

/// What checkout hands back to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub total: Decimal,
}

/// One row of the payment ledger, keyed by the externally issued payment id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PaymentRecord {
    pub id: PaymentRecordId,
    pub order_id: OrderId,
    pub payment_id: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}
