//! Gateway configuration and shared per-process state.

use crate::provider::IdentityProvider;
use std::sync::Arc;

const DEFAULT_SESSION_MAX_AGE_SECONDS: i64 = 7 * 24 * 60 * 60;

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    production: bool,
    session_max_age_seconds: i64,
    allowed_origins: Vec<String>,
}

impl GatewayConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            production: false,
            session_max_age_seconds: DEFAULT_SESSION_MAX_AGE_SECONDS,
            allowed_origins: default_origins(),
        }
    }

    #[must_use]
    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    #[must_use]
    pub fn with_session_max_age_seconds(mut self, seconds: i64) -> Self {
        self.session_max_age_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    #[must_use]
    pub fn production(&self) -> bool {
        self.production
    }

    #[must_use]
    pub fn session_max_age_seconds(&self) -> i64 {
        self.session_max_age_seconds
    }

    #[must_use]
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    // Cookies are HTTPS-only in production; local HTTP testing keeps working
    pub(crate) fn cookie_secure(&self) -> bool {
        self.production
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct GatewayState {
    config: GatewayConfig,
    provider: Arc<dyn IdentityProvider>,
}

impl GatewayState {
    #[must_use]
    pub fn new(config: GatewayConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        Self { config, provider }
    }

    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub(crate) fn provider(&self) -> &dyn IdentityProvider {
        self.provider.as_ref()
    }
}
