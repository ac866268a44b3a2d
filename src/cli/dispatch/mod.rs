use crate::cli::actions::Action;
use anyhow::Result;
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(3002),
        provider_url: matches
            .get_one("provider-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --provider-url"))?,
        provider_key: matches
            .get_one("provider-key")
            .map(|s: &String| SecretString::from(s.to_string()))
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --provider-key"))?,
        origins: matches
            .get_many::<String>("origin")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        production: matches.get_flag("production"),
    })
}
