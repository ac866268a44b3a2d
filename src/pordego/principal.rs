//! Bearer token verification.
//!
//! Handlers that need an authenticated caller resolve the `Authorization`
//! header into a [`Principal`] before doing any other work. The resolved
//! identity is passed explicitly to downstream logic, never stored in
//! ambient state, so request handling stays safe under concurrent dispatch.

use crate::pordego::handlers::{error_response, ApiError};
use crate::provider::{IdentityProvider, ProviderError, User};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use tracing::{debug, error};

/// Verified caller context: the resolved user plus the token that proved it.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user: User,
    pub access_token: String,
}

/// Resolve the bearer token into a principal, or the response that ends the
/// request: 401 with no provider call when the token is absent or malformed,
/// 403 when the provider rejects it, 500 when the provider cannot answer.
pub(crate) async fn require_bearer(
    headers: &HeaderMap,
    provider: &dyn IdentityProvider,
) -> Result<Principal, ApiError> {
    let Some(token) = extract_bearer_token(headers) else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "No token provided",
        ));
    };

    match provider.get_user(&token).await {
        Ok(user) => Ok(Principal {
            user,
            access_token: token,
        }),
        Err(ProviderError::Rejected(message)) => {
            debug!("Token rejected by provider: {}", message);

            Err(error_response(StatusCode::FORBIDDEN, "Invalid token"))
        }
        Err(ProviderError::Unavailable(message)) => {
            error!("Token verification failed: {}", message);

            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication failed",
            ))
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
