use crate::cli::actions::Action;
use crate::pordego::{
    self,
    config::{GatewayConfig, GatewayState},
};
use crate::provider::gotrue::GoTrue;
use anyhow::Result;
use std::sync::Arc;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            provider_url,
            provider_key,
            origins,
            production,
        } => {
            let provider = GoTrue::new(&provider_url, provider_key)?;

            let config = GatewayConfig::new()
                .with_production(production)
                .with_allowed_origins(origins);

            let state = GatewayState::new(config, Arc::new(provider));

            pordego::new(port, state).await?;
        }
    }

    Ok(())
}
