//! Identity provider boundary.
//!
//! Every trust decision (password hashing, token issuance, verification,
//! revocation) lives with an external hosted identity provider. This module
//! defines the data the provider hands back, the error contract, and the
//! object-safe trait the handlers depend on, so tests can swap in a scripted
//! provider without a live network call.

pub mod gotrue;

#[cfg(test)]
pub(crate) mod mock;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt, future::Future, pin::Pin};
use utoipa::ToSchema;
use uuid::Uuid;

/// Account resolved by the provider, request-scoped and never cached.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct User {
    #[schema(value_type = String)]
    pub id: Uuid,
    #[serde(default)]
    pub email: String,
    #[schema(value_type = Object)]
    #[serde(default)]
    pub user_metadata: Value,
    #[serde(default)]
    pub role: String,
}

/// Token pair issued by the provider after successful authentication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign-up result; the session is absent while email confirmation is pending.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: User,
    pub session: Option<Session>,
}

/// Sign-in and refresh always yield a user together with a session.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub session: Session,
}

/// Provider failure, split by whether the provider actually answered.
#[derive(Debug, Clone)]
pub enum ProviderError {
    /// The provider processed the request and refused it. The message is the
    /// provider's own text and is safe to surface to the client.
    Rejected(String),
    /// The provider could not be reached or returned an unreadable response.
    /// Never surfaced verbatim; callers log it and answer with a generic 500.
    Unavailable(String),
}

impl ProviderError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Rejected(message) | Self::Unavailable(message) => message,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(message) => write!(f, "rejected by identity provider: {message}"),
            Self::Unavailable(message) => write!(f, "identity provider unavailable: {message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

pub type ProviderFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// The five operations the gateway forwards. An `Err` is authoritative: any
/// data accompanying it must be discarded.
pub trait IdentityProvider: Send + Sync {
    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a SecretString,
        metadata: Option<Value>,
    ) -> ProviderFuture<'a, SignUpOutcome>;

    fn sign_in_with_password<'a>(
        &'a self,
        email: &'a str,
        password: &'a SecretString,
    ) -> ProviderFuture<'a, AuthenticatedSession>;

    fn refresh_session<'a>(&'a self, refresh_token: &'a str)
        -> ProviderFuture<'a, AuthenticatedSession>;

    fn sign_out<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, ()>;

    fn get_user<'a>(&'a self, token: &'a str) -> ProviderFuture<'a, User>;
}
