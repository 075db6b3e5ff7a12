/// SOL and SPL token transfers signed by the connected wallet
use crate::constants::ASSOCIATED_TOKEN_PROGRAM_ID;
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use crate::operation::AsyncOperation;
use crate::rpc::{ChainClient, TransactionSender};
use crate::utils::sol_to_lamports;
use serde::Serialize;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    system_instruction,
    transaction::Transaction,
};
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAsset {
    /// Amount in SOL
    Sol,
    /// Amount in the mint's base units
    Spl { mint: Pubkey },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferResult {
    pub signature: String,
}

fn program_id(address: &str) -> KitResult<Pubkey> {
    Pubkey::from_str(address)
        .map_err(|e| KitError::Config(format!("Invalid program id '{}': {}", address, e)))
}

/// Associated token account of `owner` for `mint` under the classic token program
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> KitResult<Pubkey> {
    let token_program = spl_token::id();
    let associated_program = program_id(ASSOCIATED_TOKEN_PROGRAM_ID)?;

    // PDA seeds: [owner, token_program, mint]
    let (address, _bump) = Pubkey::find_program_address(
        &[owner.as_ref(), token_program.as_ref(), mint.as_ref()],
        &associated_program,
    );
    Ok(address)
}

/// Token program `Transfer` from `source` to `destination`, signed by `owner`
pub fn spl_transfer_instruction(
    source: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> KitResult<Instruction> {
    spl_token::instruction::transfer(&spl_token::id(), source, destination, owner, &[], amount)
        .map_err(|e| KitError::Encoding(format!("Failed to build token transfer: {}", e)))
}

pub struct TransferTokens {
    client: Arc<dyn ChainClient>,
    wallet: Option<Arc<dyn TransactionSender>>,
    operation: AsyncOperation<TransferResult>,
}

impl TransferTokens {
    pub fn new(client: Arc<dyn ChainClient>, wallet: Option<Arc<dyn TransactionSender>>) -> Self {
        Self {
            client,
            wallet,
            operation: AsyncOperation::new("transfer_tokens"),
        }
    }

    tracked_accessors!(TransferResult);

    fn build_transaction(
        &self,
        recipient: &str,
        asset: TransferAsset,
        amount: f64,
    ) -> KitResult<(Arc<dyn TransactionSender>, Transaction)> {
        let wallet = self.wallet.clone().ok_or(KitError::WalletNotConnected)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(KitError::Validation(
                "Transfer amount must be greater than zero".to_string(),
            ));
        }
        let recipient = Pubkey::from_str(recipient.trim())
            .map_err(|e| KitError::Validation(format!("Invalid recipient address: {}", e)))?;
        let sender = wallet.public_key();

        let instruction = match asset {
            TransferAsset::Sol => {
                system_instruction::transfer(&sender, &recipient, sol_to_lamports(amount))
            }
            TransferAsset::Spl { mint } => {
                // 2^64 is the first float that does not fit a u64
                if amount.fract() != 0.0 || amount >= u64::MAX as f64 {
                    return Err(KitError::Validation(
                        "Token amount must be a whole number of base units".to_string(),
                    ));
                }
                let source = associated_token_address(&sender, &mint)?;
                let destination = associated_token_address(&recipient, &mint)?;
                spl_transfer_instruction(&source, &destination, &sender, amount as u64)?
            }
        };

        let transaction = Transaction::new_with_payer(&[instruction], Some(&sender));
        Ok((wallet, transaction))
    }

    /// Send `amount` of `asset` to `recipient` and wait for confirmation
    pub fn transfer(
        &self,
        recipient: &str,
        asset: TransferAsset,
        amount: f64,
    ) -> impl Future<Output = Option<TransferResult>> {
        let client = Arc::clone(&self.client);
        let precheck = self.build_transaction(recipient, asset, amount);
        self.operation
            .run_checked(precheck, move |(wallet, transaction)| async move {
                let signature = wallet.send_transaction(transaction, &*client).await?;
                client.confirm_transaction(&signature).await?;
                logger::info(LogTag::Wallet, &format!("Transfer {} confirmed", signature));
                Ok::<_, KitError>(TransferResult {
                    signature: signature.to_string(),
                })
            })
    }
}

deactivate_on_drop!(TransferTokens);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::{FakeChain, FakeWallet};
    use crate::operation::OperationStatus;
    use spl_token::instruction::TokenInstruction;

    const RECIPIENT: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

    #[tokio::test]
    async fn test_non_positive_amount_fails_before_dispatch() {
        let chain = FakeChain::new();
        let action = TransferTokens::new(chain.clone(), Some(FakeWallet::new()));

        for amount in [0.0, -1.0, f64::NAN] {
            assert_eq!(action.transfer(RECIPIENT, TransferAsset::Sol, amount).await, None);
            assert_eq!(action.status(), OperationStatus::Error);
            assert_eq!(
                action.error().as_deref(),
                Some("Transfer amount must be greater than zero")
            );
        }
        assert_eq!(chain.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_wallet_checked_first() {
        let chain = FakeChain::new();
        let action = TransferTokens::new(chain.clone(), None);

        assert_eq!(action.transfer(RECIPIENT, TransferAsset::Sol, -5.0).await, None);
        assert_eq!(action.error().as_deref(), Some("Wallet not connected"));
        assert_eq!(chain.calls(), 0);
    }

    #[tokio::test]
    async fn test_bad_recipient_rejected() {
        let chain = FakeChain::new();
        let action = TransferTokens::new(chain.clone(), Some(FakeWallet::new()));

        assert_eq!(action.transfer("nope", TransferAsset::Sol, 1.0).await, None);
        assert!(action
            .error()
            .unwrap_or_default()
            .starts_with("Invalid recipient address"));
        assert_eq!(chain.calls(), 0);
    }

    #[tokio::test]
    async fn test_fractional_spl_amount_rejected() {
        let chain = FakeChain::new();
        let action = TransferTokens::new(chain.clone(), Some(FakeWallet::new()));
        let asset = TransferAsset::Spl {
            mint: Pubkey::new_unique(),
        };

        assert_eq!(action.transfer(RECIPIENT, asset, 1.5).await, None);
        assert_eq!(chain.calls(), 0);
    }

    #[tokio::test]
    async fn test_sol_transfer_sends_and_confirms() {
        let chain = FakeChain::new();
        let action = TransferTokens::new(chain.clone(), Some(FakeWallet::new()));

        let result = action.transfer(RECIPIENT, TransferAsset::Sol, 0.25).await;

        assert!(result.is_some());
        assert_eq!(action.status(), OperationStatus::Success);
        assert_eq!(chain.calls(), 2);
        let sent = chain.sent.lock();
        let instruction = &sent[0].message.instructions[0];
        // system transfer: u32 tag 2 then lamports
        assert_eq!(&instruction.data[..4], &2u32.to_le_bytes());
        assert_eq!(&instruction.data[4..], &250_000_000u64.to_le_bytes());
    }

    #[tokio::test]
    async fn test_spl_transfer_between_associated_accounts() {
        let chain = FakeChain::new();
        let wallet = FakeWallet::new();
        let owner = wallet.public_key();
        let mint = Pubkey::new_unique();
        let action = TransferTokens::new(chain.clone(), Some(wallet));

        let result = action
            .transfer(RECIPIENT, TransferAsset::Spl { mint }, 1_000.0)
            .await;
        assert!(result.is_some());

        let recipient = Pubkey::from_str(RECIPIENT).expect("valid recipient");
        let sent = chain.sent.lock();
        let message = &sent[0].message;
        let instruction = &message.instructions[0];
        let accounts: Vec<Pubkey> = instruction
            .accounts
            .iter()
            .map(|index| message.account_keys[*index as usize])
            .collect();

        assert_eq!(message.account_keys[instruction.program_id_index as usize], spl_token::id());
        assert_eq!(accounts[0], associated_token_address(&owner, &mint).expect("ata"));
        assert_eq!(accounts[1], associated_token_address(&recipient, &mint).expect("ata"));
        assert_eq!(accounts[2], owner);
        assert!(matches!(
            TokenInstruction::unpack(&instruction.data),
            Ok(TokenInstruction::Transfer { amount: 1_000 })
        ));
    }

    #[tokio::test]
    async fn test_spl_amount_beyond_u64_rejected() {
        let chain = FakeChain::new();
        let action = TransferTokens::new(chain.clone(), Some(FakeWallet::new()));
        let asset = TransferAsset::Spl {
            mint: Pubkey::new_unique(),
        };

        // exactly 2^64
        assert_eq!(action.transfer(RECIPIENT, asset, 18_446_744_073_709_551_616.0).await, None);
        assert_eq!(
            action.error().as_deref(),
            Some("Token amount must be a whole number of base units")
        );
        assert_eq!(chain.calls(), 0);
        assert!(chain.sent.lock().is_empty());
    }

    #[test]
    fn test_associated_address_is_deterministic() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        assert_eq!(
            associated_token_address(&owner, &mint).expect("ata"),
            associated_token_address(&owner, &mint).expect("ata")
        );
        assert_ne!(
            associated_token_address(&owner, &mint).expect("ata"),
            associated_token_address(&mint, &owner).expect("ata")
        );
    }
}
