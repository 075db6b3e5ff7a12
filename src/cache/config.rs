/// Cache configuration per data class
///
/// Both classes are slow-changing relative to request latency:
/// - Token list: long TTL (changes rarely)
/// - NFT metadata: shorter TTL (dynamic NFTs can update)
use crate::config::CacheTtlConfig;
use std::time::Duration;

/// Lower bound applied to every TTL so an entry always expires after it was stored
pub const MIN_TTL: Duration = Duration::from_millis(1);

/// Upper bound (about 100 years); larger TTLs would overflow `Instant`
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Clamp a requested TTL into `MIN_TTL..=MAX_TTL`
pub fn bounded_ttl(ttl: Duration) -> Duration {
    ttl.clamp(MIN_TTL, MAX_TTL)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Time-to-live used by `set` when no explicit TTL is given
    pub ttl: Duration,
}

impl CacheConfig {
    /// NFT metadata cache (10 minutes)
    pub fn nft_metadata() -> Self {
        Self::custom(Duration::from_secs(600))
    }

    /// Fungible token list cache (30 minutes)
    pub fn token_list() -> Self {
        Self::custom(Duration::from_secs(1800))
    }

    pub fn custom(ttl: Duration) -> Self {
        Self {
            ttl: bounded_ttl(ttl),
        }
    }

    pub fn nft_metadata_from(config: &CacheTtlConfig) -> Self {
        Self::custom(config.nft_metadata_ttl())
    }

    pub fn token_list_from(config: &CacheTtlConfig) -> Self {
        Self::custom(config.token_list_ttl())
    }
}
