use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::instrument;

use super::types::{ErrorResponse, ProtectedResponse};
use crate::pordego::config::GatewayState;
use crate::pordego::principal::require_bearer;

#[utoipa::path(
    get,
    path = "/api/protected",
    responses(
        (status = 200, description = "Caller is authenticated", body = ProtectedResponse),
        (status = 401, description = "No bearer token provided", body = ErrorResponse),
        (status = 403, description = "Bearer token rejected", body = ErrorResponse),
        (status = 500, description = "Identity provider unreachable", body = ErrorResponse),
    ),
    tag = "protected"
)]
#[instrument(skip(state, headers))]
pub async fn protected(
    state: Extension<Arc<GatewayState>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    match require_bearer(&headers, state.provider()).await {
        Ok(principal) => (
            StatusCode::OK,
            Json(ProtectedResponse {
                message: "Protected route accessed successfully".to_string(),
                user: principal.user,
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}
