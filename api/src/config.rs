use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::adapters::inference::client::DEFAULT_SENTIMENT_MODEL;

#[derive(Clone)]
pub struct Config {
    /// Contract gateway fronting the social and governance contracts
    pub provider_url: String,
    pub provider_api_key: Option<String>,
    pub pinata_url: String,
    pub pinata_jwt: String,
    /// Public gateway used to render content-addressed references
    pub ipfs_gateway_url: String,
    pub inference_url: String,
    pub inference_token: Option<String>,
    pub sentiment_model: String,
    /// Refresh interval of the proposal stream
    pub proposal_poll_interval: Duration,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let proposal_poll_secs = match env::var("PROPOSAL_POLL_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("PROPOSAL_POLL_SECS must be a whole number of seconds")?,
            Err(_) => 10,
        };
        if proposal_poll_secs == 0 {
            anyhow::bail!("PROPOSAL_POLL_SECS must be greater than zero");
        }

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().context("PORT must be a valid port number")?,
            Err(_) => 8080,
        };

        Ok(Self {
            provider_url: env::var("PROVIDER_URL").context("PROVIDER_URL must be set")?,
            provider_api_key: env::var("PROVIDER_API_KEY").ok().filter(|k| !k.is_empty()),
            pinata_url: env::var("PINATA_URL")
                .unwrap_or_else(|_| "https://api.pinata.cloud".to_string()),
            pinata_jwt: env::var("PINATA_JWT").unwrap_or_default(),
            ipfs_gateway_url: env::var("IPFS_GATEWAY_URL")
                .unwrap_or_else(|_| "https://gateway.pinata.cloud".to_string()),
            inference_url: env::var("INFERENCE_URL")
                .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
            inference_token: env::var("INFERENCE_TOKEN").ok().filter(|t| !t.is_empty()),
            sentiment_model: env::var("SENTIMENT_MODEL")
                .unwrap_or_else(|_| DEFAULT_SENTIMENT_MODEL.to_string()),
            proposal_poll_interval: Duration::from_secs(proposal_poll_secs),
            port,
        })
    }

    /// Check if image pinning is configured
    pub fn pinning_enabled(&self) -> bool {
        !self.pinata_jwt.is_empty()
    }
}
