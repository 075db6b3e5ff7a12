/// Wallet adapter seam: something that can sign and submit a transaction
use super::client::ChainClient;
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::path::Path;

#[async_trait]
pub trait TransactionSender: Send + Sync {
    fn public_key(&self) -> Pubkey;

    /// Sign `transaction` and submit it through `client`
    async fn send_transaction(
        &self,
        transaction: Transaction,
        client: &dyn ChainClient,
    ) -> KitResult<Signature>;
}

/// Local keypair signer
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Load a JSON byte-array keypair file (solana CLI format)
    pub fn from_file(path: &Path) -> KitResult<Self> {
        let keypair = solana_sdk::signature::read_keypair_file(path).map_err(|e| {
            KitError::Config(format!("Failed to read keypair '{}': {}", path.display(), e))
        })?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl TransactionSender for KeypairWallet {
    fn public_key(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn send_transaction(
        &self,
        mut transaction: Transaction,
        client: &dyn ChainClient,
    ) -> KitResult<Signature> {
        let blockhash = client.get_latest_blockhash().await?;
        transaction
            .try_sign(&[&self.keypair], blockhash)
            .map_err(|e| KitError::Validation(format!("Failed to sign transaction: {}", e)))?;

        let signature = client.send_transaction(&transaction).await?;
        logger::info(LogTag::Wallet, &format!("Submitted transaction {}", signature));
        Ok(signature)
    }
}
