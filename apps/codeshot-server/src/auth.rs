//! Caller identity extraction.
//!
//! Authentication itself is an external collaborator: requests reach this
//! service with an already-verified identity, injected by the edge proxy as
//! the `x-codeshot-user` header. The extractor only reads that header; a
//! request without it was never authenticated and is rejected with 401.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use codeshot_storage::UserId;

use crate::error::ApiError;

/// Header carrying the authenticated caller's user id.
pub const USER_HEADER: &str = "x-codeshot-user";

/// Authenticated caller identity.
#[derive(Clone, Debug)]
pub struct AuthUser(pub UserId);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if value.is_empty() {
            return Err(ApiError::Unauthenticated(
                "missing authenticated user identity".to_string(),
            ));
        }

        Ok(AuthUser(UserId(value.to_string())))
    }
}
