/// Upstream token list providers
use super::types::RawTokenEntry;
use crate::config::TokensConfig;
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};

#[async_trait]
pub trait TokenListSource: Send + Sync {
    /// Fetch the whole list in one request
    async fn fetch_token_list(&self) -> KitResult<Vec<RawTokenEntry>>;
}

/// Jupiter verified token list over HTTP
pub struct JupiterTokenList {
    client: Client,
    url: String,
}

impl JupiterTokenList {
    pub fn new(config: &TokensConfig) -> KitResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| KitError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.token_list_url.clone(),
        })
    }
}

#[async_trait]
impl TokenListSource for JupiterTokenList {
    async fn fetch_token_list(&self) -> KitResult<Vec<RawTokenEntry>> {
        let start = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KitError::HttpStatus {
                endpoint: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let tokens: Vec<RawTokenEntry> = response.json().await?;

        logger::debug(
            LogTag::Tokens,
            &format!(
                "Fetched {} tokens from {} in {}ms",
                tokens.len(),
                self.url,
                start.elapsed().as_millis()
            ),
        );

        Ok(tokens)
    }
}
