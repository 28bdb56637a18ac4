//! Address book repository.
//!
//! Every statement is filtered by the owning user; a row belonging to someone
//! else is indistinguishable from a missing one (`NotFound`, never a
//! "forbidden" that would leak existence).
//!
//! Default handling mirrors the source system: when a written row is marked
//! default, the user's other defaults are cleared first with a separate
//! statement, outside any transaction. Two concurrent "set default" requests
//! by the same user can therefore both land as default. This is a known,
//! documented gap, kept as-is rather than silently strengthened.

use sqlx::PgPool;

use orchard_core::{AddressId, UserId};

use super::RepositoryError;
use crate::models::{Address, AddressInput};

const ADDRESS_COLUMNS: &str = "id, user_id, full_name, phone, address_line1, address_line2, \
                               city, state, postal_code, is_default";

/// Repository for address database operations.
pub struct AddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user: UserId) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user)
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }

    /// Get one of the user's addresses.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// belongs to another user.
    pub async fn get(&self, user: UserId, id: AddressId) -> Result<Address, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM addresses WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(address)
    }

    /// Create an address for the user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn create(
        &self,
        user: UserId,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        if input.is_default {
            self.clear_defaults(user, None).await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            r"
            INSERT INTO addresses
                (user_id, full_name, phone, address_line1, address_line2,
                 city, state, postal_code, is_default)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(user)
        .bind(&input.full_name)
        .bind(&input.phone)
        .bind(&input.address_line1)
        .bind(&input.address_line2)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.postal_code)
        .bind(input.is_default)
        .fetch_one(self.pool)
        .await?;

        Ok(address)
    }

    /// Update one of the user's addresses, overwriting every field.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// belongs to another user.
    pub async fn update(
        &self,
        user: UserId,
        id: AddressId,
        input: &AddressInput,
    ) -> Result<Address, RepositoryError> {
        if input.is_default {
            self.clear_defaults(user, Some(id)).await?;
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            r"
            UPDATE addresses
            SET full_name = $3, phone = $4, address_line1 = $5, address_line2 = $6,
                city = $7, state = $8, postal_code = $9, is_default = $10
            WHERE id = $1 AND user_id = $2
            RETURNING {ADDRESS_COLUMNS}
            "
        ))
        .bind(id)
        .bind(user)
        .bind(&input.full_name)
        .bind(&input.phone)
        .bind(&input.address_line1)
        .bind(&input.address_line2)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.postal_code)
        .bind(input.is_default)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(address)
    }

    /// Delete one of the user's addresses. Orders referencing it keep a NULL
    /// address (FK SET NULL).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the address does not exist or
    /// belongs to another user.
    pub async fn delete(&self, user: UserId, id: AddressId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM addresses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Clear the user's other default flags before a default write.
    async fn clear_defaults(
        &self,
        user: UserId,
        keep: Option<AddressId>,
    ) -> Result<(), RepositoryError> {
        match keep {
            Some(id) => {
                sqlx::query(
                    "UPDATE addresses SET is_default = FALSE \
                     WHERE user_id = $1 AND is_default AND id <> $2",
                )
                .bind(user)
                .bind(id)
                .execute(self.pool)
                .await?;
            }
            None => {
                sqlx::query("UPDATE addresses SET is_default = FALSE WHERE user_id = $1 AND is_default")
                    .bind(user)
                    .execute(self.pool)
                    .await?;
            }
        }

        Ok(())
    }
}
