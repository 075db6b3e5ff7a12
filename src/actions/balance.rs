/// Connected wallet balance in SOL
use crate::errors::{KitError, KitResult};
use crate::operation::AsyncOperation;
use crate::rpc::ChainClient;
use crate::utils::lamports_to_sol;
use solana_sdk::pubkey::Pubkey;
use std::future::Future;
use std::sync::Arc;

pub const SUPPORTED_SYMBOL: &str = "SOL";

pub struct WalletBalance {
    client: Arc<dyn ChainClient>,
    wallet: Option<Pubkey>,
    operation: AsyncOperation<f64>,
}

impl WalletBalance {
    pub fn new(client: Arc<dyn ChainClient>, wallet: Option<Pubkey>) -> Self {
        Self {
            client,
            wallet,
            operation: AsyncOperation::with_empty("wallet_balance", 0.0),
        }
    }

    tracked_accessors!(f64);

    fn precheck(&self, symbol: &str) -> KitResult<Pubkey> {
        let wallet = self.wallet.ok_or(KitError::WalletNotConnected)?;
        if symbol != SUPPORTED_SYMBOL {
            return Err(KitError::Validation("Only SOL is supported".to_string()));
        }
        Ok(wallet)
    }

    /// Balance in SOL, rounded to `digits` decimal places when given and non-zero
    pub fn fetch_balance(
        &self,
        symbol: &str,
        digits: Option<u32>,
    ) -> impl Future<Output = Option<f64>> {
        let client = Arc::clone(&self.client);
        self.operation
            .run_checked(self.precheck(symbol), move |wallet| async move {
                let lamports = client.get_balance(&wallet).await?;
                Ok::<_, KitError>(lamports_to_sol(lamports, digits))
            })
    }
}

deactivate_on_drop!(WalletBalance);
