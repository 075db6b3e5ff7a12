//! TTL cache used by the fetch-and-normalize services

pub mod config;
pub mod manager;

pub use config::CacheConfig;
pub use manager::{CacheEntry, CacheMetrics, TtlCache};
