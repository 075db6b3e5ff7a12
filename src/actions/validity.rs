/// Whether a signature resolves to a transaction at `confirmed`
use super::parse_signature;
use crate::errors::KitError;
use crate::operation::{spawn_triggered, AsyncOperation, AutoTrigger};
use crate::rpc::ChainClient;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityResult {
    pub is_valid: bool,
}

pub struct TransactionValidity {
    client: Arc<dyn ChainClient>,
    signature: AutoTrigger<String>,
    operation: AsyncOperation<ValidityResult>,
}

impl TransactionValidity {
    /// With `auto_trigger` a check is spawned right away and on every signature change
    pub fn new(client: Arc<dyn ChainClient>, signature: impl Into<String>, auto_trigger: bool) -> Self {
        let action = Self {
            client,
            signature: AutoTrigger::new(auto_trigger),
            operation: AsyncOperation::new("transaction_validity"),
        };
        action.set_signature(signature);
        action
    }

    tracked_accessors!(ValidityResult);

    pub fn signature(&self) -> String {
        self.signature.current().unwrap_or_default()
    }

    /// Returns true when a check was spawned
    pub fn set_signature(&self, signature: impl Into<String>) -> bool {
        if !self.signature.observe(signature.into()) {
            return false;
        }
        spawn_triggered(self.operation.name(), self.check())
    }

    pub fn check(&self) -> impl Future<Output = Option<ValidityResult>> + Send + 'static {
        let client = Arc::clone(&self.client);
        self.operation
            .run_checked(parse_signature(&self.signature()), move |signature| async move {
                let record = client.get_parsed_transaction(&signature).await?;
                Ok::<_, KitError>(ValidityResult {
                    is_valid: record.is_some(),
                })
            })
    }
}

deactivate_on_drop!(TransactionValidity);
