use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::{error, instrument};

use super::error_response;
use super::types::{AuthResponse, ErrorResponse};
use crate::pordego::config::GatewayState;
use crate::pordego::cookies;
use crate::provider::ProviderError;

#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "Session refreshed", body = AuthResponse),
        (status = 401, description = "Missing or rejected refresh token", body = ErrorResponse),
        (status = 500, description = "Identity provider unreachable", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(state, headers))]
pub async fn refresh(
    state: Extension<Arc<GatewayState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    // The refresh token travels in the cookie, not the request body
    let Some(refresh_token) = cookies::cookie_value(&headers, cookies::REFRESH_TOKEN_COOKIE)
    else {
        return error_response(StatusCode::UNAUTHORIZED, "No refresh token found").into_response();
    };

    match state.provider().refresh_session(&refresh_token).await {
        Ok(authenticated) => {
            // Refresh tokens may rotate, so both cookies are set again
            let response_headers = cookies::apply_session(state.config(), &authenticated.session);

            (
                StatusCode::OK,
                response_headers,
                Json(AuthResponse {
                    message: "Token refreshed successfully".to_string(),
                    user: authenticated.user,
                    access_token: Some(authenticated.session.access_token),
                }),
            )
                .into_response()
        }
        Err(ProviderError::Rejected(message)) => {
            // A rejected refresh token must not linger client-side
            let response_headers = cookies::clear_session(state.config());

            (
                StatusCode::UNAUTHORIZED,
                response_headers,
                Json(ErrorResponse { error: message }),
            )
                .into_response()
        }
        Err(ProviderError::Unavailable(message)) => {
            error!("Identity provider unavailable: {}", message);

            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                .into_response()
        }
    }
}
