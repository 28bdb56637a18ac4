//! Payment recording route handler.
//!
//! The backend never initiates payments. The external payment collaborator
//! (webhook) posts payment results here; request authenticity is verified
//! upstream before the request reaches this service.

use axum::{Json, extract::State, http::StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use orchard_core::{OrderId, PaymentMethod, PaymentStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::PaymentRecord;
use crate::state::AppState;

/// Payment-result event payload.
#[derive(Debug, Deserialize)]
pub struct PaymentPayload {
    pub order_id: OrderId,
    pub payment_id: String,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub amount: Decimal,
}

/// Append a payment-result event to the ledger.
#[instrument(skip(state))]
pub async fn record(
    State(state): State<AppState>,
    Json(payload): Json<PaymentPayload>,
) -> Result<(StatusCode, Json<PaymentRecord>)> {
    if payload.payment_id.trim().is_empty() {
        return Err(AppError::Validation("payment_id must not be empty".to_owned()));
    }
    if payload.amount.is_sign_negative() {
        return Err(AppError::Validation("amount must not be negative".to_owned()));
    }

    let record = OrderRepository::new(state.pool())
        .record_payment(
            payload.order_id,
            &payload.payment_id,
            payload.method,
            payload.status,
            payload.amount,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::extract::State;

    use crate::test_support::lazy_state;

    fn payload(payment_id: &str, amount: &str) -> PaymentPayload {
        PaymentPayload {
            order_id: OrderId::new(1),
            payment_id: payment_id.to_owned(),
            method: PaymentMethod::Card,
            status: PaymentStatus::Success,
            amount: amount.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_record_rejects_negative_amount() {
        // The guard runs before any query; the lazy pool is never used.
        let err = record(State(lazy_state()), Json(payload("pay_123", "-1.00")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "validation_error");
    }

    #[tokio::test]
    async fn test_record_rejects_blank_payment_id() {
        let err = record(State(lazy_state()), Json(payload("  ", "1.00")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
