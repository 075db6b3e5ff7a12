//! Chain access: JSON-RPC client and wallet signer

pub mod client;
pub mod types;
pub mod wallet;

pub use client::{ChainClient, RpcClient};
pub use types::{TokenAccountBalance, TransactionRecord};
pub use wallet::{KeypairWallet, TransactionSender};
