//! Tracked chain actions
//!
//! Each action owns one `AsyncOperation` and reuses it across invocations.
//! Precondition and validation failures land in the operation's error state
//! without any call reaching the chain client.

/// Read-only views over the action's tracker
macro_rules! tracked_accessors {
    ($result:ty) => {
        pub fn operation(&self) -> &$crate::operation::AsyncOperation<$result> {
            &self.operation
        }

        pub fn state(&self) -> $crate::operation::OperationState<$result> {
            self.operation.state()
        }

        pub fn status(&self) -> $crate::operation::OperationStatus {
            self.operation.status()
        }

        pub fn result(&self) -> Option<$result> {
            self.operation.result()
        }

        pub fn error(&self) -> Option<String> {
            self.operation.error()
        }

        pub fn subscribe(
            &self,
        ) -> ::tokio::sync::watch::Receiver<$crate::operation::OperationState<$result>> {
            self.operation.subscribe()
        }
    };
}

/// The owner going away stops in-flight calls from touching shared tracker handles
macro_rules! deactivate_on_drop {
    ($action:ty) => {
        impl Drop for $action {
            fn drop(&mut self) {
                self.operation.deactivate();
            }
        }
    };
}

pub mod airdrop;
pub mod balance;
pub mod details;
pub mod holdings;
pub mod transfer;
pub mod validity;

#[cfg(test)]
pub(crate) mod testing;

pub use airdrop::{AirdropResult, RequestAirdrop};
pub use balance::WalletBalance;
pub use details::TransactionDetails;
pub use holdings::{WalletHoldings, WalletToken};
pub use transfer::{TransferAsset, TransferResult, TransferTokens};
pub use validity::{TransactionValidity, ValidityResult};

use crate::errors::{KitError, KitResult};
use solana_sdk::signature::Signature;
use std::str::FromStr;

pub(crate) fn parse_signature(signature: &str) -> KitResult<Signature> {
    let trimmed = signature.trim();
    if trimmed.is_empty() {
        return Err(KitError::Validation(
            "Transaction signature is required".to_string(),
        ));
    }
    Signature::from_str(trimmed).map_err(|e| {
        KitError::Validation(format!("Invalid transaction signature: {}", e))
    })
}
