//! Authentication middleware and extractors.
//!
//! The API sits behind an identity-aware proxy that terminates the
//! session and forwards the resolved subject in a request header.
//! These extractors read that header; this service never sees
//! credentials.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};

use shopkeeper_core::UserId;

use crate::error::{self, AppError};

/// The HTTP header carrying the resolved caller identity.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor that requires a resolved caller identity.
///
/// Rejects with Unauthenticated when the header is absent or doesn't
/// hold a plausible subject.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(caller): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {caller}!")
/// }
/// ```
pub struct RequireAuth(pub UserId);

/// Error returned when authentication is required but no identity was
/// forwarded.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        AppError::Unauthenticated.into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = resolve_identity(parts).ok_or(AuthRejection)?;

        error::set_sentry_user(&caller);

        Ok(Self(caller))
    }
}

/// Extractor that optionally resolves the caller identity.
///
/// Unlike `RequireAuth`, this does not reject the request when no
/// identity is present. Public catalog reads use it so the owner's own
/// requests still carry their identity in error reports.
pub struct OptionalAuth(pub Option<UserId>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = resolve_identity(parts);
        if let Some(caller) = &caller {
            error::set_sentry_user(caller);
        }

        Ok(Self(caller))
    }
}

/// Read the identity header. A malformed value counts as no identity.
fn resolve_identity(parts: &Parts) -> Option<UserId> {
    parts
        .headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| UserId::parse(s).ok())
}
