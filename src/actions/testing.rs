//! In-memory chain client and wallet for action tests
use crate::errors::{KitError, KitResult};
use crate::rpc::types::fixtures::transaction_result;
use crate::rpc::{ChainClient, TokenAccountBalance, TransactionRecord, TransactionSender};
use crate::tokens::{RawTokenEntry, TokenListSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub(crate) struct FakeChain {
    calls: AtomicUsize,
    balance: u64,
    transaction: Option<TransactionRecord>,
    token_accounts: Vec<TokenAccountBalance>,
    failure: Option<String>,
    token_accounts_failure: Option<String>,
    pub airdrops: Mutex<Vec<(Pubkey, u64)>>,
    pub sent: Mutex<Vec<Transaction>>,
}

impl FakeChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_balance(lamports: u64) -> Arc<Self> {
        Arc::new(Self {
            balance: lamports,
            ..Default::default()
        })
    }

    pub fn with_transaction(signature: &str) -> Arc<Self> {
        let record =
            TransactionRecord::from_rpc_result(signature, transaction_result(42, Value::Null, &[]))
                .ok();
        Arc::new(Self {
            transaction: record,
            ..Default::default()
        })
    }

    pub fn with_holdings(lamports: u64, accounts: Vec<TokenAccountBalance>) -> Arc<Self> {
        Arc::new(Self {
            balance: lamports,
            token_accounts: accounts,
            ..Default::default()
        })
    }

    /// Balance works, the token account listing fails
    pub fn failing_token_accounts(lamports: u64, message: &str) -> Arc<Self> {
        Arc::new(Self {
            balance: lamports,
            token_accounts_failure: Some(message.to_string()),
            ..Default::default()
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(message.to_string()),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> KitResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(KitError::Network(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    fn endpoint(&self) -> &str {
        "http://localhost:8899"
    }

    async fn request_airdrop(&self, pubkey: &Pubkey, lamports: u64) -> KitResult<Signature> {
        self.record_call()?;
        self.airdrops.lock().push((*pubkey, lamports));
        Ok(Signature::new_unique())
    }

    async fn confirm_transaction(&self, _signature: &Signature) -> KitResult<()> {
        self.record_call()
    }

    async fn get_balance(&self, _pubkey: &Pubkey) -> KitResult<u64> {
        self.record_call()?;
        Ok(self.balance)
    }

    async fn get_parsed_transaction(
        &self,
        _signature: &Signature,
    ) -> KitResult<Option<TransactionRecord>> {
        self.record_call()?;
        Ok(self.transaction.clone())
    }

    async fn get_latest_blockhash(&self) -> KitResult<Hash> {
        self.record_call()?;
        Ok(Hash::new_unique())
    }

    async fn get_token_accounts_by_owner(
        &self,
        _owner: &Pubkey,
    ) -> KitResult<Vec<TokenAccountBalance>> {
        self.record_call()?;
        match &self.token_accounts_failure {
            Some(message) => Err(KitError::Network(message.clone())),
            None => Ok(self.token_accounts.clone()),
        }
    }

    async fn send_transaction(&self, transaction: &Transaction) -> KitResult<Signature> {
        self.record_call()?;
        self.sent.lock().push(transaction.clone());
        Ok(Signature::new_unique())
    }
}

/// Submits without signing
pub(crate) struct FakeWallet {
    pubkey: Pubkey,
}

impl FakeWallet {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pubkey: Pubkey::new_unique(),
        })
    }
}

#[async_trait]
impl TransactionSender for FakeWallet {
    fn public_key(&self) -> Pubkey {
        self.pubkey
    }

    async fn send_transaction(
        &self,
        transaction: Transaction,
        client: &dyn ChainClient,
    ) -> KitResult<Signature> {
        client.send_transaction(&transaction).await
    }
}

pub(crate) fn token_account(mint: &str, ui_amount: f64, decimals: u8) -> TokenAccountBalance {
    TokenAccountBalance {
        account: Pubkey::new_unique().to_string(),
        mint: mint.to_string(),
        ui_amount,
        decimals,
    }
}

/// Token list served from memory, or a fixed failure
pub(crate) struct StaticTokenList {
    entries: Option<Vec<RawTokenEntry>>,
}

impl StaticTokenList {
    pub fn new(entries: Vec<RawTokenEntry>) -> Arc<Self> {
        Arc::new(Self {
            entries: Some(entries),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self { entries: None })
    }
}

#[async_trait]
impl TokenListSource for StaticTokenList {
    async fn fetch_token_list(&self) -> KitResult<Vec<RawTokenEntry>> {
        self.entries
            .clone()
            .ok_or_else(|| KitError::HttpStatus {
                endpoint: "https://tokens.test".to_string(),
                status: 503,
            })
    }
}
