//! Client for hosted identity providers speaking the `GoTrue` dialect
//! (Supabase Auth, self-hosted `GoTrue`).

use crate::pordego::APP_USER_AGENT;
use crate::provider::{
    AuthenticatedSession, IdentityProvider, ProviderError, ProviderFuture, Session, SignUpOutcome,
    User,
};
use anyhow::Result;
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

pub struct GoTrue {
    base_url: Url,
    api_key: SecretString,
    client: Client,
}

impl GoTrue {
    /// Create a client for the provider at `base_url`.
    /// # Errors
    /// Returns an error if the URL does not parse or the HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: SecretString) -> Result<Self> {
        let base_url = Url::parse(base_url)?;

        let client = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, ProviderError> {
        let response = request
            .header("apikey", self.api_key.expose_secret())
            .send()
            .await
            .map_err(|err| ProviderError::Unavailable(err.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = provider_message(status, &body);

            debug!("Provider refused request: {} {}", status, message);

            return Err(ProviderError::Rejected(message));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        response
            .json()
            .await
            .map_err(|err| ProviderError::Unavailable(err.to_string()))
    }
}

impl IdentityProvider for GoTrue {
    fn sign_up<'a>(
        &'a self,
        email: &'a str,
        password: &'a SecretString,
        metadata: Option<Value>,
    ) -> ProviderFuture<'a, SignUpOutcome> {
        Box::pin(async move {
            let mut payload = json!({
                "email": email,
                "password": password.expose_secret(),
            });

            if let Some(metadata) = metadata {
                payload["data"] = metadata;
            }

            let url = self.endpoint("signup");
            let body = self.send(self.client.post(&url).json(&payload)).await?;

            parse_signup_body(body)
        })
    }

    fn sign_in_with_password<'a>(
        &'a self,
        email: &'a str,
        password: &'a SecretString,
    ) -> ProviderFuture<'a, AuthenticatedSession> {
        Box::pin(async move {
            let payload = json!({
                "email": email,
                "password": password.expose_secret(),
            });

            let url = format!("{}?grant_type=password", self.endpoint("token"));
            let body = self.send(self.client.post(&url).json(&payload)).await?;

            parse_session_body(body)
        })
    }

    fn refresh_session<'a>(
        &'a self,
        refresh_token: &'a str,
    ) -> ProviderFuture<'a, AuthenticatedSession> {
        Box::pin(async move {
            let payload = json!({ "refresh_token": refresh_token });

            let url = format!("{}?grant_type=refresh_token", self.endpoint("token"));
            let body = self.send(self.client.post(&url).json(&payload)).await?;

            parse_session_body(body)
        })
    }

    fn sign_out<'a>(&'a self, access_token: &'a str) -> ProviderFuture<'a, ()> {
        Box::pin(async move {
            let url = self.endpoint("logout");

            self.send(
                self.client
                    .post(&url)
                    .header(AUTHORIZATION, format!("Bearer {access_token}")),
            )
            .await?;

            Ok(())
        })
    }

    fn get_user<'a>(&'a self, token: &'a str) -> ProviderFuture<'a, User> {
        Box::pin(async move {
            let url = self.endpoint("user");

            let body = self
                .send(
                    self.client
                        .get(&url)
                        .header(AUTHORIZATION, format!("Bearer {token}")),
                )
                .await?;

            parse_user(body)
        })
    }
}

// GoTrue error bodies vary by endpoint and version
fn provider_message(status: StatusCode, body: &Value) -> String {
    body["error_description"]
        .as_str()
        .or_else(|| body["msg"].as_str())
        .or_else(|| body["message"].as_str())
        .or_else(|| body["error"].as_str())
        .map_or_else(
            || format!("Identity provider rejected the request ({status})"),
            str::to_string,
        )
}

// A sign-up against a provider with email confirmation enabled returns the
// bare user; with autoconfirm it returns a full session with the user nested.
fn parse_signup_body(body: Value) -> Result<SignUpOutcome, ProviderError> {
    if body.get("access_token").is_some() {
        let authenticated = parse_session_body(body)?;

        Ok(SignUpOutcome {
            user: authenticated.user,
            session: Some(authenticated.session),
        })
    } else {
        let user = parse_user(body)?;

        Ok(SignUpOutcome {
            user,
            session: None,
        })
    }
}

fn parse_session_body(mut body: Value) -> Result<AuthenticatedSession, ProviderError> {
    let user_value = body.get_mut("user").map(Value::take).unwrap_or(Value::Null);

    let user = parse_user(user_value)?;
    let session = parse_session(body)?;

    Ok(AuthenticatedSession { user, session })
}

fn parse_user(value: Value) -> Result<User, ProviderError> {
    serde_json::from_value(value)
        .map_err(|err| ProviderError::Unavailable(format!("unexpected user payload: {err}")))
}

fn parse_session(value: Value) -> Result<Session, ProviderError> {
    serde_json::from_value(value)
        .map_err(|err| ProviderError::Unavailable(format!("unexpected session payload: {err}")))
}
