use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use secrecy::ExposeSecret;
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::types::{AuthResponse, ErrorResponse, SignUpRequest};
use super::{error_response, provider_error_response};
use crate::pordego::config::GatewayState;
use crate::pordego::cookies;

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created; logged in unless email confirmation is pending", body = AuthResponse),
        (status = 400, description = "Missing credentials or provider rejection", body = ErrorResponse),
        (status = 500, description = "Identity provider unreachable", body = ErrorResponse),
    ),
    tag = "auth"
)]
#[instrument(skip(state, payload))]
pub async fn signup(
    state: Extension<Arc<GatewayState>>,
    payload: Option<Json<SignUpRequest>>,
) -> impl IntoResponse {
    let request: SignUpRequest = match payload {
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

    let metadata = request.name.as_ref().map(|name| json!({ "name": name }));

    let outcome = match state
        .provider()
        .sign_up(&request.email, &request.password, metadata)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => return provider_error_response(&err, StatusCode::BAD_REQUEST).into_response(),
    };

    match outcome.session {
        Some(session) => {
            let headers = cookies::apply_session(state.config(), &session);

            (
                StatusCode::CREATED,
                headers,
                Json(AuthResponse {
                    message: "User created and logged in".to_string(),
                    user: outcome.user,
                    access_token: Some(session.access_token),
                }),
            )
                .into_response()
        }
        // Confirmation pending: no session yet, so no cookies either
        None => (
            StatusCode::CREATED,
            Json(AuthResponse {
                message: "Please check your email to confirm your account".to_string(),
                user: outcome.user,
                access_token: None,
            }),
        )
            .into_response(),
    }
}
