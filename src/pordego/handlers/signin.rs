use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::instrument;

use super::types::{AuthResponse, ErrorResponse, SignInRequest};
use super::{error_response, provider_error_response};
use crate::pordego::config::GatewayState;
use crate::pordego::cookies;

#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 400, description = "Missing credentials", body = ErrorResponse),
        (status = 401, description = "Credentials rejected by the provider", body = ErrorResponse),
        (status = 500, description = "Identity provider unreachable", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(state, payload))]
pub async fn signin(
    state: Extension<Arc<GatewayState>>,
    payload: Option<Json<SignInRequest>>,
) -> impl IntoResponse {
    let request: SignInRequest = match payload {
        Some(Json(payload)) => payload,
        None => {
            return error_response(StatusCode::BAD_REQUEST, "Email and password are required")
                .into_response()
        }
    };

    if request.email.trim().is_empty() || request.password.expose_secret().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Email and password are required")
            .into_response();
    }

    match state
        .provider()
        .sign_in_with_password(&request.email, &request.password)
        .await
    {
        Ok(authenticated) => {
            let headers = cookies::apply_session(state.config(), &authenticated.session);

            (
                StatusCode::OK,
                headers,
                Json(AuthResponse {
                    message: "Signed in successfully".to_string(),
                    user: authenticated.user,
                    access_token: Some(authenticated.session.access_token),
                }),
            )
                .into_response()
        }
        // Credentials rejected, distinct from the malformed-request 400
        Err(err) => provider_error_response(&err, StatusCode::UNAUTHORIZED).into_response(),
    }
}
