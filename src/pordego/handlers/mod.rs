pub mod health;
pub use self::health::health;

pub mod signup;
pub use self::signup::signup;

pub mod signin;
pub use self::signin::signin;

pub mod refresh;
pub use self::refresh::refresh;

pub mod signout;
pub use self::signout::signout;

pub mod protected;
pub use self::protected::protected;

pub mod types;


// common functions for the handlers
use crate::provider::ProviderError;
use axum::{http::StatusCode, Json};
use tracing::error;

use self::types::ErrorResponse;

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a provider failure onto the operation's rejection status. Transport
/// failures never surface provider detail; they are logged and answered with
/// a generic 500.
pub(crate) fn provider_error_response(
    err: &ProviderError,
    rejected_status: StatusCode,
) -> ApiError {
    match err {
        ProviderError::Rejected(message) => error_response(rejected_status, message.clone()),
        ProviderError::Unavailable(message) => {
            error!("Identity provider unavailable: {}", message);

            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}
