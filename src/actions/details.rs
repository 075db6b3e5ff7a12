/// Parsed transaction lookup for a signature
use super::parse_signature;
use crate::errors::KitError;
use crate::operation::{spawn_triggered, AsyncOperation, AutoTrigger};
use crate::rpc::{ChainClient, TransactionRecord};
use std::future::Future;
use std::sync::Arc;

pub struct TransactionDetails {
    client: Arc<dyn ChainClient>,
    signature: AutoTrigger<String>,
    operation: AsyncOperation<TransactionRecord>,
}

impl TransactionDetails {
    pub fn new(client: Arc<dyn ChainClient>, signature: impl Into<String>, auto_trigger: bool) -> Self {
        let action = Self {
            client,
            signature: AutoTrigger::new(auto_trigger),
            operation: AsyncOperation::new("transaction_details"),
        };
        action.set_signature(signature);
        action
    }

    tracked_accessors!(TransactionRecord);

    pub fn signature(&self) -> String {
        self.signature.current().unwrap_or_default()
    }

    pub fn set_signature(&self, signature: impl Into<String>) -> bool {
        if !self.signature.observe(signature.into()) {
            return false;
        }
        spawn_triggered(self.operation.name(), self.fetch_details())
    }

    pub fn fetch_details(&self) -> impl Future<Output = Option<TransactionRecord>> + Send + 'static {
        let client = Arc::clone(&self.client);
        self.operation
            .run_checked(parse_signature(&self.signature()), move |signature| async move {
                client
                    .get_parsed_transaction(&signature)
                    .await?
                    .ok_or_else(|| KitError::NotFound("Transaction not found".to_string()))
            })
    }
}

deactivate_on_drop!(TransactionDetails);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testing::FakeChain;
    use crate::operation::OperationStatus;
    use solana_sdk::signature::Signature;

    #[tokio::test]
    async fn test_details_for_known_transaction() {
        let sig = Signature::new_unique().to_string();
        let chain = FakeChain::with_transaction(&sig);
        let action = TransactionDetails::new(chain, sig.clone(), false);

        let record = action.fetch_details().await.expect("record");
        assert_eq!(record.signature, sig);
        assert_eq!(record.slot, 42);
        assert_eq!(record.fee, Some(5000));
        assert!(record.succeeded());
        assert_eq!(action.status(), OperationStatus::Success);
    }

    #[tokio::test]
    async fn test_missing_transaction_is_error() {
        let chain = FakeChain::new();
        let action = TransactionDetails::new(chain.clone(), Signature::new_unique().to_string(), false);

        assert_eq!(action.fetch_details().await, None);
        assert_eq!(action.status(), OperationStatus::Error);
        assert_eq!(action.error().as_deref(), Some("Transaction not found"));
        assert_eq!(chain.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_signature_not_dispatched() {
        let chain = FakeChain::new();
        let action = TransactionDetails::new(chain.clone(), "   ", false);

        assert_eq!(action.fetch_details().await, None);
        assert_eq!(
            action.error().as_deref(),
            Some("Transaction signature is required")
        );
        assert_eq!(chain.calls(), 0);
    }
}
