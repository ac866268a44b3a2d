pub mod server;

use secrecy::SecretString;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        provider_url: String,
        provider_key: SecretString,
        origins: Vec<String>,
        production: bool,
    },
}
