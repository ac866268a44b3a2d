//! `OpenAPI` document for the gateway API.

use utoipa::OpenApi;

use crate::pordego::handlers;
use crate::pordego::handlers::types::{
    AuthResponse, ErrorResponse, MessageResponse, ProtectedResponse, SignInRequest, SignUpRequest,
};
use crate::provider::User;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::signup::signup,
        handlers::signin::signin,
        handlers::refresh::refresh,
        handlers::signout::signout,
        handlers::protected::protected,
    ),
    components(schemas(
        SignUpRequest,
        SignInRequest,
        AuthResponse,
        MessageResponse,
        ProtectedResponse,
        ErrorResponse,
        User
    )),
    tags(
        (name = "auth", description = "Authentication gateway endpoints"),
        (name = "protected", description = "Bearer-token protected example"),
        (name = "health", description = "Service health")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
