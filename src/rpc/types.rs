use serde::{Deserialize, Serialize};
use serde_json::Value;
use solana_account_decoder::parse_token::UiTokenAmount;
use solana_transaction_status::{
    option_serializer::OptionSerializer, EncodedConfirmedTransactionWithStatusMeta,
};

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// JSON-RPC 2.0 response envelope; `result` stays raw because `null` is a valid answer
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

/// `{ context, value }` wrapper used by most account and status methods
#[derive(Debug, Clone, Deserialize)]
pub struct RpcContextValue<T> {
    pub value: T,
}

// ============================================================================
// getParsedTokenAccountsByOwner (jsonParsed)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RpcKeyedTokenAccount {
    pub pubkey: String,
    pub account: RpcTokenAccount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcTokenAccount {
    pub data: RpcTokenAccountData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcTokenAccountData {
    pub parsed: RpcParsedTokenAccount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcParsedTokenAccount {
    pub info: RpcTokenAccountInfo,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTokenAccountInfo {
    pub mint: String,
    pub token_amount: UiTokenAmount,
}

/// One SPL token account of an owner with its balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenAccountBalance {
    pub account: String,
    pub mint: String,
    /// Balance in whole tokens (`uiAmount`), 0 when the node omits it
    pub ui_amount: f64,
    pub decimals: u8,
}

impl From<RpcKeyedTokenAccount> for TokenAccountBalance {
    fn from(keyed: RpcKeyedTokenAccount) -> Self {
        let info = keyed.account.data.parsed.info;
        Self {
            account: keyed.pubkey,
            mint: info.mint,
            ui_amount: info.token_amount.ui_amount.unwrap_or(0.0),
            decimals: info.token_amount.decimals,
        }
    }
}

// ============================================================================
// getTransaction (jsonParsed)
// ============================================================================

/// Summary of a confirmed transaction
///
/// The commonly displayed fields are lifted out; `raw` keeps the full node
/// response for callers that need instructions or balances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub signature: String,
    pub slot: u64,
    pub block_time: Option<i64>,
    pub fee: Option<u64>,
    /// Rendered on-chain error, `None` when the transaction succeeded
    pub error: Option<String>,
    pub log_messages: Vec<String>,
    pub raw: Value,
}

impl TransactionRecord {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn from_encoded(
        signature: &str,
        tx: &EncodedConfirmedTransactionWithStatusMeta,
        raw: Value,
    ) -> Self {
        let meta = tx.transaction.meta.as_ref();

        Self {
            signature: signature.to_string(),
            slot: tx.slot,
            block_time: tx.block_time,
            fee: meta.map(|meta| meta.fee),
            error: meta
                .and_then(|meta| meta.err.as_ref())
                .map(|err| format!("{:?}", err)),
            log_messages: meta
                .map(|meta| match &meta.log_messages {
                    OptionSerializer::Some(logs) => logs.clone(),
                    _ => Vec::new(),
                })
                .unwrap_or_default(),
            raw,
        }
    }

    /// Build from a getTransaction `result` object
    pub fn from_rpc_result(signature: &str, result: Value) -> serde_json::Result<Self> {
        let tx: EncodedConfirmedTransactionWithStatusMeta =
            serde_json::from_value(result.clone())?;
        Ok(Self::from_encoded(signature, &tx, result))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// Minimal getTransaction result as a node returns it
    pub fn transaction_result(slot: u64, err: Value, logs: &[&str]) -> Value {
        let status = if err.is_null() {
            json!({ "Ok": null })
        } else {
            json!({ "Err": err.clone() })
        };
        json!({
            "slot": slot,
            "blockTime": 1_700_000_000i64,
            "transaction": ["", "base64"],
            "meta": {
                "err": err,
                "status": status,
                "fee": 5000,
                "preBalances": [],
                "postBalances": [],
                "logMessages": logs
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::transaction_result;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_rpc_result() {
        let result = transaction_result(
            250_000_000,
            Value::Null,
            &["Program 11111111111111111111111111111111 invoke [1]"],
        );

        let record = TransactionRecord::from_rpc_result("abc", result).expect("parsable");
        assert_eq!(record.slot, 250_000_000);
        assert_eq!(record.block_time, Some(1_700_000_000));
        assert_eq!(record.fee, Some(5000));
        assert!(record.succeeded());
        assert_eq!(record.log_messages.len(), 1);
    }

    #[test]
    fn test_failed_transaction_keeps_error() {
        let result = transaction_result(1, json!({ "InstructionError": [0, { "Custom": 1 }] }), &[]);
        let record = TransactionRecord::from_rpc_result("x", result).expect("parsable");
        assert!(!record.succeeded());
        assert!(record.error.as_deref().unwrap_or_default().contains("InstructionError"));
    }

    #[test]
    fn test_missing_slot_is_rejected() {
        assert!(TransactionRecord::from_rpc_result("x", json!({ "meta": {} })).is_err());
    }

    #[test]
    fn test_token_account_from_parsed_response() {
        let value = json!([{
            "pubkey": "Acct111",
            "account": {
                "data": {
                    "program": "spl-token",
                    "parsed": {
                        "type": "account",
                        "info": {
                            "mint": "Mint111",
                            "owner": "Owner111",
                            "tokenAmount": {
                                "amount": "1500000",
                                "decimals": 6,
                                "uiAmount": 1.5,
                                "uiAmountString": "1.5"
                            }
                        }
                    }
                },
                "lamports": 2039280
            }
        }]);

        let accounts: Vec<RpcKeyedTokenAccount> = serde_json::from_value(value).expect("parsable");
        let balance = TokenAccountBalance::from(accounts[0].clone());
        assert_eq!(balance.mint, "Mint111");
        assert_eq!(balance.ui_amount, 1.5);
        assert_eq!(balance.decimals, 6);
    }
}
