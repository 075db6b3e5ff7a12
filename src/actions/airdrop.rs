/// Devnet/testnet SOL airdrop for the connected wallet
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use crate::operation::AsyncOperation;
use crate::rpc::ChainClient;
use crate::utils::sol_to_lamports;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::future::Future;
use std::sync::Arc;

pub const DEFAULT_AIRDROP_SOL: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AirdropResult {
    pub signature: String,
}

pub struct RequestAirdrop {
    client: Arc<dyn ChainClient>,
    wallet: Option<Pubkey>,
    operation: AsyncOperation<AirdropResult>,
}

impl RequestAirdrop {
    pub fn new(client: Arc<dyn ChainClient>, wallet: Option<Pubkey>) -> Self {
        Self {
            client,
            wallet,
            operation: AsyncOperation::new("request_airdrop"),
        }
    }

    tracked_accessors!(AirdropResult);

    fn precheck(&self, sol: f64) -> KitResult<(Pubkey, u64)> {
        let wallet = self.wallet.ok_or(KitError::WalletNotConnected)?;
        if !sol.is_finite() || sol <= 0.0 {
            return Err(KitError::Validation(
                "Airdrop amount must be greater than zero".to_string(),
            ));
        }
        Ok((wallet, sol_to_lamports(sol)))
    }

    /// Request `sol` SOL and wait for the airdrop to confirm
    pub fn request_airdrop(&self, sol: f64) -> impl Future<Output = Option<AirdropResult>> {
        let client = Arc::clone(&self.client);
        self.operation
            .run_checked(self.precheck(sol), move |(wallet, lamports)| async move {
                logger::info(
                    LogTag::Wallet,
                    &format!("Requesting {} lamports for {}", lamports, wallet),
                );
                let signature = client.request_airdrop(&wallet, lamports).await?;
                client.confirm_transaction(&signature).await?;
                Ok::<_, KitError>(AirdropResult {
                    signature: signature.to_string(),
                })
            })
    }
}

deactivate_on_drop!(RequestAirdrop);
