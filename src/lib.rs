//! soldevkit: Solana developer toolkit core
//!
//! - `operation`: reusable idle/loading/error/success tracker
//! - `actions`: tracked chain actions (airdrop, transfer, balance, transaction lookups)
//! - `tokens` / `nft`: fetch-and-normalize services backed by `cache`
//! - `rpc`: chain client and wallet seams

pub mod config;

pub mod actions;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod logger;
pub mod nft;
pub mod operation;
pub mod rpc;
pub mod tokens;
pub mod utils;
