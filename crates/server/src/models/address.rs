//! Address book domain types.

use serde::{Deserialize, Serialize};

use orchard_core::{AddressId, UserId};

/// A user's shipping address.
///
/// At most one address per user carries `is_default = true`; the repository
/// clears the others on write (last write wins, see `db::addresses`).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Address {
    pub id: AddressId,
    pub user_id: UserId,
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub is_default: bool,
}

/// Input payload for creating or updating an address.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressInput {
    pub full_name: String,
    pub phone: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(default)]
    pub is_default: bool,
}
