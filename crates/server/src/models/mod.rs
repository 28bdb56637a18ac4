//! Domain models for the store backend.
//!
//! Row-shaped types decoded straight from sqlx queries, plus the input
//! payloads the repositories accept. Presentation-only view types live next
//! to their route handlers instead.

pub mod address;
pub mod cart;
pub mod catalog;
pub mod order;

pub use address::{Address, AddressInput};
pub use cart::{CartContents, CartLine};
pub use catalog::{Category, NewProduct, Product, ProductDetail, ProductImage};
pub use order::{CheckoutReceipt, Order, OrderDetail, OrderLine, PaymentRecord};
