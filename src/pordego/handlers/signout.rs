use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{error, instrument};

use super::types::{ErrorResponse, MessageResponse};
use crate::pordego::config::GatewayState;
use crate::pordego::cookies;
use crate::pordego::principal::require_bearer;
use crate::provider::ProviderError;

#[utoipa::path(
    post,
    path = "/auth/signout",
    responses(
        (status = 200, description = "Signed out, cookies cleared", body = MessageResponse),
        (status = 400, description = "Provider rejected the sign-out", body = ErrorResponse),
        (status = 401, description = "No bearer token provided", body = ErrorResponse),
        (status = 403, description = "Bearer token rejected", body = ErrorResponse),
        (status = 500, description = "Identity provider unreachable", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(state, headers))]
pub async fn signout(
    state: Extension<Arc<GatewayState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let principal = match require_bearer(&headers, state.provider()).await {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    // Cookies are cleared on every outcome, even when the provider refuses
    let response_headers = cookies::clear_session(state.config());

    match state.provider().sign_out(&principal.access_token).await {
        Ok(()) => (
            StatusCode::OK,
            response_headers,
            Json(MessageResponse {
                message: "Signed out successfully".to_string(),
            }),
        )
            .into_response(),
        Err(ProviderError::Rejected(message)) => (
            StatusCode::BAD_REQUEST,
            response_headers,
            Json(ErrorResponse { error: message }),
        )
            .into_response(),
        Err(ProviderError::Unavailable(message)) => {
            error!("Identity provider unavailable: {}", message);

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                response_headers,
                Json(ErrorResponse {
                    error: "Internal server error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
