/// Configuration schemas - every section defined once with its defaults
use crate::config_struct;
use std::time::Duration;

// ============================================================================
// RPC CONFIGURATION
// ============================================================================

config_struct! {
    /// Chain RPC endpoint and confirmation behaviour
    pub struct RpcConfig {
        url: String = "https://api.devnet.solana.com".to_string(),
        request_timeout_secs: u64 = 30,
        /// Interval between getSignatureStatuses polls while confirming
        confirm_poll_interval_ms: u64 = 500,
        confirm_timeout_secs: u64 = 60,
    }
}

// ============================================================================
// CACHE CONFIGURATION
// ============================================================================

config_struct! {
    /// Freshness windows for cached upstream data
    pub struct CacheTtlConfig {
        /// NFT metadata may change (dynamic NFTs), keep it shorter
        nft_metadata_ttl_secs: u64 = 600,
        token_list_ttl_secs: u64 = 1800,
    }
}

impl CacheTtlConfig {
    pub fn nft_metadata_ttl(&self) -> Duration {
        Duration::from_secs(self.nft_metadata_ttl_secs)
    }

    pub fn token_list_ttl(&self) -> Duration {
        Duration::from_secs(self.token_list_ttl_secs)
    }
}

// ============================================================================
// TOKEN LIST CONFIGURATION
// ============================================================================

config_struct! {
    pub struct TokensConfig {
        token_list_url: String = "https://tokens.jup.ag/tokens?tags=verified".to_string(),
        request_timeout_secs: u64 = 15,
    }
}

// ============================================================================
// NFT METADATA CONFIGURATION
// ============================================================================

config_struct! {
    /// DAS-capable endpoint used for getAsset lookups
    pub struct NftConfig {
        das_url: String = "https://api.mainnet-beta.solana.com".to_string(),
        request_timeout_secs: u64 = 15,
    }
}

// ============================================================================
// ROOT
// ============================================================================

config_struct! {
    pub struct Config {
        rpc: RpcConfig = RpcConfig::default(),
        cache: CacheTtlConfig = CacheTtlConfig::default(),
        tokens: TokensConfig = TokensConfig::default(),
        nft: NftConfig = NftConfig::default(),
    }
}
