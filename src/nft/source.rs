/// Upstream NFT metadata providers
use super::types::RawAsset;
use crate::config::NftConfig;
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use crate::rpc::types::RpcResponse;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

#[async_trait]
pub trait NftMetadataSource: Send + Sync {
    /// `Ok(None)` when the provider has no asset for this mint
    async fn fetch_asset(&self, mint: &str) -> KitResult<Option<RawAsset>>;
}

/// Digital Asset Standard `getAsset` over JSON-RPC
pub struct DasMetadataSource {
    client: Client,
    url: String,
}

impl DasMetadataSource {
    pub fn new(config: &NftConfig) -> KitResult<Self> {
        if config.das_url.trim().is_empty() {
            return Err(KitError::Config("DAS RPC URL not configured".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| KitError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.das_url.trim().to_string(),
        })
    }
}

#[async_trait]
impl NftMetadataSource for DasMetadataSource {
    async fn fetch_asset(&self, mint: &str) -> KitResult<Option<RawAsset>> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getAsset",
            "params": { "id": mint }
        });

        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(KitError::HttpStatus {
                endpoint: self.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let body: RpcResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(KitError::Rpc {
                method: "getAsset".to_string(),
                message: error.message,
            });
        }

        if body.result.is_null() {
            logger::debug(LogTag::Nft, &format!("getAsset returned no asset for {}", mint));
            return Ok(None);
        }

        let asset: RawAsset = serde_json::from_value(body.result)
            .map_err(|e| KitError::InvalidResponse(format!("getAsset: {}", e)))?;
        Ok(Some(asset))
    }
}
