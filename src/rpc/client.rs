//! Chain RPC collaborator
//!
//! `ChainClient` is the black-box seam the tracked actions call through.
//! `RpcClient` implements it with raw JSON-RPC 2.0 payloads over reqwest.

use super::types::{
    RpcContextValue, RpcKeyedTokenAccount, RpcResponse, TokenAccountBalance, TransactionRecord,
};
use crate::constants::SPL_TOKEN_PROGRAM_ID;
use crate::config::RpcConfig;
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta, TransactionConfirmationStatus, TransactionStatus,
};
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[async_trait]
pub trait ChainClient: Send + Sync {
    fn endpoint(&self) -> &str;

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> KitResult<Signature>;

    /// Wait until the transaction reaches at least `confirmed`
    async fn confirm_transaction(&self, signature: &Signature) -> KitResult<()>;

    /// Balance in lamports
    async fn get_balance(&self, pubkey: &Pubkey) -> KitResult<u64>;

    /// `None` when the node does not know the transaction at `confirmed`
    async fn get_parsed_transaction(
        &self,
        signature: &Signature,
    ) -> KitResult<Option<TransactionRecord>>;

    async fn get_latest_blockhash(&self) -> KitResult<Hash>;

    /// Token accounts owned by `owner` under the classic token program
    async fn get_token_accounts_by_owner(&self, owner: &Pubkey) -> KitResult<Vec<TokenAccountBalance>>;

    /// Submit an already signed transaction
    async fn send_transaction(&self, transaction: &Transaction) -> KitResult<Signature>;
}

pub struct RpcClient {
    http: Client,
    url: String,
    request_id: AtomicU64,
    confirm_poll_interval: Duration,
    confirm_timeout: Duration,
}

impl RpcClient {
    pub fn new(config: &RpcConfig) -> KitResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| KitError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.url.clone(),
            request_id: AtomicU64::new(1),
            confirm_poll_interval: Duration::from_millis(config.confirm_poll_interval_ms.max(1)),
            confirm_timeout: Duration::from_secs(config.confirm_timeout_secs),
        })
    }

    /// Perform one JSON-RPC call and return the raw `result` (may be `null`)
    pub async fn call(&self, method: &str, params: Value) -> KitResult<Value> {
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params
        });

        logger::debug(LogTag::Rpc, &format!("-> {} (id {})", method, id));
        logger::verbose(LogTag::Rpc, &format!("{} params: {}", method, payload["params"]));

        let response = self
            .http
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
                method: method.to_string(),
                message: format!("{} (code {})", error.message, error.code),
            });
        }

        Ok(body.result)
    }

    async fn signature_status(&self, signature: &Signature) -> KitResult<Option<TransactionStatus>> {
        let result = self
            .call(
                "getSignatureStatuses",
                json!([[signature.to_string()], { "searchTransactionHistory": true }]),
            )
            .await?;

        let statuses: RpcContextValue<Vec<Option<TransactionStatus>>> =
            serde_json::from_value(result).map_err(|e| {
                KitError::InvalidResponse(format!("getSignatureStatuses: {}", e))
            })?;
        Ok(statuses.value.into_iter().next().flatten())
    }
}

/// True once `status` reached at least `confirmed`
pub(crate) fn is_confirmed(status: &TransactionStatus) -> bool {
    matches!(
        status.confirmation_status,
        Some(TransactionConfirmationStatus::Confirmed) | Some(TransactionConfirmationStatus::Finalized)
    )
}

fn parse_signature(method: &str, value: &Value) -> KitResult<Signature> {
    let text = value.as_str().ok_or_else(|| {
        KitError::InvalidResponse(format!("{} returned a non-string signature", method))
    })?;
    Signature::from_str(text)
        .map_err(|e| KitError::InvalidResponse(format!("{} returned bad signature: {}", method, e)))
}

#[async_trait]
impl ChainClient for RpcClient {
    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> KitResult<Signature> {
        let result = self
            .call("requestAirdrop", json!([pubkey.to_string(), lamports]))
            .await?;
        parse_signature("requestAirdrop", &result)
    }

    async fn confirm_transaction(&self, signature: &Signature) -> KitResult<()> {
        let started = Instant::now();

        loop {
            if let Some(status) = self.signature_status(signature).await? {
                if let Some(err) = &status.err {
                    return Err(KitError::Rpc {
                        method: "getSignatureStatuses".to_string(),
                        message: format!("Transaction {} failed: {:?}", signature, err),
                    });
                }

                if is_confirmed(&status) {
                    logger::debug(LogTag::Rpc, &format!("{} confirmed", signature));
                    return Ok(());
                }
            }

            if started.elapsed() >= self.confirm_timeout {
                return Err(KitError::Timeout {
                    seconds: self.confirm_timeout.as_secs(),
                });
            }
            tokio::time::sleep(self.confirm_poll_interval).await;
        }
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> KitResult<u64> {
        let result = self
            .call(
                "getBalance",
                json!([pubkey.to_string(), { "commitment": "confirmed" }]),
            )
            .await?;

        result
            .get("value")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| KitError::InvalidResponse("getBalance returned no value".to_string()))
    }

    async fn get_parsed_transaction(
        &self,
        signature: &Signature,
    ) -> KitResult<Option<TransactionRecord>> {
        let text = signature.to_string();
        let result = self
            .call(
                "getTransaction",
                json!([text, {
                    "encoding": "jsonParsed",
                    "commitment": "confirmed",
                    "maxSupportedTransactionVersion": 0
                }]),
            )
            .await?;

        if result.is_null() {
            return Ok(None);
        }

        let tx: EncodedConfirmedTransactionWithStatusMeta = serde_json::from_value(result.clone())
            .map_err(|e| KitError::InvalidResponse(format!("getTransaction: {}", e)))?;
        Ok(Some(TransactionRecord::from_encoded(&text, &tx, result)))
    }


    async fn get_latest_blockhash(&self) -> KitResult<Hash> {
        let result = self
            .call("getLatestBlockhash", json!([{ "commitment": "confirmed" }]))
            .await?;

        let text = result
            .get("value")
            .and_then(|v| v.get("blockhash"))
            .and_then(|b| b.as_str())
            .ok_or_else(|| {
                KitError::InvalidResponse("getLatestBlockhash returned no blockhash".to_string())
            })?;

        Hash::from_str(text)
            .map_err(|e| KitError::InvalidResponse(format!("bad blockhash '{}': {}", text, e)))
    }

    async fn get_token_accounts_by_owner(&self, owner: &Pubkey) -> KitResult<Vec<TokenAccountBalance>> {
        let result = self
            .call(
                "getTokenAccountsByOwner",
                json!([
                    owner.to_string(),
                    { "programId": SPL_TOKEN_PROGRAM_ID },
                    { "encoding": "jsonParsed", "commitment": "confirmed" }
                ]),
            )
            .await?;

        let accounts: RpcContextValue<Vec<RpcKeyedTokenAccount>> = serde_json::from_value(result)
            .map_err(|e| KitError::InvalidResponse(format!("getTokenAccountsByOwner: {}", e)))?;
        Ok(accounts.value.into_iter().map(TokenAccountBalance::from).collect())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> KitResult<Signature> {
        let bytes = bincode::serialize(transaction)
            .map_err(|e| KitError::Encoding(format!("Failed to serialize transaction: {}", e)))?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

        let result = self
            .call(
                "sendTransaction",
                json!([encoded, {
                    "encoding": "base64",
                    "preflightCommitment": "confirmed"
                }]),
            )
            .await?;

        parse_signature("sendTransaction", &result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_response(confirmation: &str, err: Value) -> Value {
        json!({
            "context": { "slot": 100 },
            "value": [{
                "slot": 99,
                "confirmations": null,
                "err": err.clone(),
                "status": if err.is_null() { json!({ "Ok": null }) } else { json!({ "Err": err }) },
                "confirmationStatus": confirmation
            }, null]
        })
    }

    #[test]
    fn test_signature_statuses_parse_into_status_types() {
        let parsed: RpcContextValue<Vec<Option<TransactionStatus>>> =
            serde_json::from_value(status_response("confirmed", Value::Null)).expect("parsable");

        assert_eq!(parsed.value.len(), 2);
        assert!(parsed.value[1].is_none());
        let status = parsed.value[0].as_ref().expect("first status");
        assert!(status.err.is_none());
        assert!(is_confirmed(status));
    }

    #[test]
    fn test_processed_is_not_confirmed() {
        let parsed: RpcContextValue<Vec<Option<TransactionStatus>>> =
            serde_json::from_value(status_response("processed", Value::Null)).expect("parsable");
        assert!(!is_confirmed(parsed.value[0].as_ref().expect("status")));
    }

    #[test]
    fn test_failed_status_carries_error() {
        let err = json!({ "InstructionError": [0, { "Custom": 6001 }] });
        let parsed: RpcContextValue<Vec<Option<TransactionStatus>>> =
            serde_json::from_value(status_response("finalized", err)).expect("parsable");
        assert!(parsed.value[0].as_ref().expect("status").err.is_some());
    }
}
