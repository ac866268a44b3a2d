//! Session cookie policy.
//!
//! The access and refresh cookies always carry one shared attribute set, and
//! a clear uses exactly the attributes used when setting, so clearing is
//! guaranteed to remove a cookie this gateway set. An attribute mismatch
//! would leave orphaned cookies in the browser.

use crate::pordego::config::GatewayConfig;
use crate::provider::Session;
use axum::http::{
    header::{InvalidHeaderValue, ACCESS_CONTROL_EXPOSE_HEADERS, AUTHORIZATION, COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use tracing::error;

pub(crate) const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub(crate) const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Attribute set shared by set and clear.
fn cookie_attributes(secure: bool) -> String {
    let mut attributes = "Path=/; HttpOnly; SameSite=Lax".to_string();
    if secure {
        attributes.push_str("; Secure");
    }
    attributes
}

fn session_cookie(
    name: &str,
    value: &str,
    max_age: i64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let attributes = cookie_attributes(secure);
    HeaderValue::from_str(&format!("{name}={value}; {attributes}; Max-Age={max_age}"))
}

fn clearing_cookie(name: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    session_cookie(name, "", 0, secure)
}

/// Set both session cookies and expose the access token for clients that
/// read it from headers instead of cookies.
pub(crate) fn apply_session(config: &GatewayConfig, session: &Session) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let max_age = config.session_max_age_seconds();
    let secure = config.cookie_secure();

    for (name, value) in [
        (ACCESS_TOKEN_COOKIE, session.access_token.as_str()),
        (REFRESH_TOKEN_COOKIE, session.refresh_token.as_str()),
    ] {
        match session_cookie(name, value, max_age, secure) {
            Ok(cookie) => {
                headers.append(SET_COOKIE, cookie);
            }
            Err(err) => error!("Failed to encode {} cookie: {}", name, err),
        }
    }

    match HeaderValue::from_str(&format!("Bearer {}", session.access_token)) {
        Ok(bearer) => {
            headers.insert(AUTHORIZATION, bearer);
            headers.insert(
                ACCESS_CONTROL_EXPOSE_HEADERS,
                HeaderValue::from_static("Authorization"),
            );
        }
        Err(err) => error!("Failed to encode Authorization header: {}", err),
    }

    headers
}

/// Remove both session cookies using the attribute set they were set with.
pub(crate) fn clear_session(config: &GatewayConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let secure = config.cookie_secure();

    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        match clearing_cookie(name, secure) {
            Ok(cookie) => {
                headers.append(SET_COOKIE, cookie);
            }
            Err(err) => error!("Failed to encode {} clearing cookie: {}", name, err),
        }
    }

    headers
}

/// Read a cookie value from an inbound request's `Cookie` header.
pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == name {
            return Some(val.to_string());
        }
    }
    None
}
