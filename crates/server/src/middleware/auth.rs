//! Authenticated-user extractor.
//!
//! Authentication itself lives upstream (a reverse proxy or gateway that
//! terminates sessions); by the time a request reaches this service the
//! verified identity travels in the `x-user-id` header. The extractor makes
//! that identity an explicit argument of every handler that needs one, so no
//! ambient "current user" state exists anywhere in the backend.

use axum::{extract::FromRequestParts, http::request::Parts};

use orchard_core::UserId;

use crate::error::AppError;

/// Header carrying the upstream-verified user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated user's id.
///
/// Rejects with 401 when the header is absent or not a valid id.
///
/// # Example
///
/// ```rust,ignore
/// async fn show_cart(
///     State(state): State<AppState>,
///     CurrentUser(user): CurrentUser,
/// ) -> Result<Json<CartView>> { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing user identity".to_owned()))?;

        let id = raw
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized("malformed user identity".to_owned()))?;

        Ok(Self(UserId::new(id)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<CurrentUser, AppError> {
        let (mut parts, ()) = request.into_parts();
        CurrentUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_user_id() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "42")
            .body(())
            .unwrap();
        let CurrentUser(user) = extract(request).await.unwrap();
        assert_eq!(user, UserId::new(42));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_malformed_header_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, "not-a-number")
            .body(())
            .unwrap();
        let err = extract(request).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
