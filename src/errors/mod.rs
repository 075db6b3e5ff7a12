/// Error types shared by the fetchers, the chain client and the tracked actions
///
/// Tracked actions never let these escape: they are rendered into the
/// operation's `error` message. Fetchers and the chain client return them to
/// their caller.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KitError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {endpoint}")]
    HttpStatus { endpoint: String, status: u16 },

    #[error("RPC error in {method}: {message}")]
    Rpc { method: String, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Timeout error: operation timed out after {seconds} seconds")]
    Timeout { seconds: u64 },
}

impl KitError {
    /// Transport-level failures that a caller may reasonably retry
    pub fn is_recoverable(&self) -> bool {
        match self {
            KitError::Network(_) => true,
            KitError::Timeout { .. } => true,
            KitError::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for KitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            KitError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            KitError::InvalidResponse(err.to_string())
        } else {
            KitError::Network(err.to_string())
        }
    }
}

pub type KitResult<T> = Result<T, KitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(KitError::WalletNotConnected.to_string(), "Wallet not connected");
        assert_eq!(
            KitError::Validation("Only SOL is supported".to_string()).to_string(),
            "Only SOL is supported"
        );
        assert_eq!(
            KitError::NotFound("Transaction not found".to_string()).to_string(),
            "Transaction not found"
        );
    }

    #[test]
    fn test_classification() {
        assert!(KitError::Network("reset".to_string()).is_recoverable());
        assert!(KitError::HttpStatus {
            endpoint: "x".to_string(),
            status: 503
        }
        .is_recoverable());
        assert!(!KitError::HttpStatus {
            endpoint: "x".to_string(),
            status: 404
        }
        .is_recoverable());
        assert!(!KitError::WalletNotConnected.is_recoverable());
    }
}
