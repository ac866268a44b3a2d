//! Scripted provider used by handler and verification tests.

use crate::provider::{
    AuthenticatedSession, IdentityProvider, ProviderError, ProviderFuture, SignUpOutcome, User,
};
use secrecy::SecretString;
use serde_json::Value;
use std::sync::Mutex;

/// Each operation answers with its scripted result; unscripted calls fail as
/// unavailable so a test cannot silently pass on a path it never staged. The
/// call log lets tests assert that an operation was (or was not) reached.
#[derive(Default)]
pub(crate) struct MockProvider {
    pub(crate) sign_up_result: Mutex<Option<Result<SignUpOutcome, ProviderError>>>,
    pub(crate) sign_in_result: Mutex<Option<Result<AuthenticatedSession, ProviderError>>>,
    pub(crate) refresh_result: Mutex<Option<Result<AuthenticatedSession, ProviderError>>>,
    pub(crate) sign_out_result: Mutex<Option<Result<(), ProviderError>>>,
    pub(crate) get_user_result: Mutex<Option<Result<User, ProviderError>>>,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    fn record(&self, operation: &str) {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(operation.to_string());
    }

    fn scripted<T: Clone>(
        slot: &Mutex<Option<Result<T, ProviderError>>>,
        operation: &str,
    ) -> Result<T, ProviderError> {
        slot.lock()
            .expect("mock result poisoned")
            .clone()
            .unwrap_or_else(|| {
                Err(ProviderError::Unavailable(format!(
                    "no scripted response for {operation}"
                )))
            })
    }
}

impl IdentityProvider for MockProvider {
    fn sign_up<'a>(
        &'a self,
        _email: &'a str,
        _password: &'a SecretString,
        _metadata: Option<Value>,
    ) -> ProviderFuture<'a, SignUpOutcome> {
        Box::pin(async move {
            self.record("sign_up");
            Self::scripted(&self.sign_up_result, "sign_up")
        })
    }

    fn sign_in_with_password<'a>(
        &'a self,
        _email: &'a str,
        _password: &'a SecretString,
    ) -> ProviderFuture<'a, AuthenticatedSession> {
        Box::pin(async move {
            self.record("sign_in_with_password");
            Self::scripted(&self.sign_in_result, "sign_in_with_password")
        })
    }

    fn refresh_session<'a>(
        &'a self,
        _refresh_token: &'a str,
    ) -> ProviderFuture<'a, AuthenticatedSession> {
        Box::pin(async move {
            self.record("refresh_session");
            Self::scripted(&self.refresh_result, "refresh_session")
        })
    }

    fn sign_out<'a>(&'a self, _access_token: &'a str) -> ProviderFuture<'a, ()> {
        Box::pin(async move {
            self.record("sign_out");
            Self::scripted(&self.sign_out_result, "sign_out")
        })
    }

    fn get_user<'a>(&'a self, _token: &'a str) -> ProviderFuture<'a, User> {
        Box::pin(async move {
            self.record("get_user");
            Self::scripted(&self.get_user_result, "get_user")
        })
    }
}
