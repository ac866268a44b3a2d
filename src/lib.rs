//! # Pordego (Authentication Gateway)
//!
//! `pordego` is a thin HTTP gateway in front of a hosted identity provider.
//! It forwards sign-up, sign-in, token-refresh, and sign-out requests to the
//! provider, manages the `access_token`/`refresh_token` cookie pair, and
//! exposes a minimal protected route for clients presenting a bearer token.
//!
//! The gateway keeps no session state of its own: password hashing, token
//! issuance, verification, and revocation all live with the provider. What
//! this crate owns is the cookie lifecycle (set and clear always use the
//! same attribute set), the error-to-status mapping, and the CORS/security
//! header surface.

pub mod cli;
pub mod pordego;
pub mod provider;
