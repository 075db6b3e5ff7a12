/// Cache-backed NFT metadata lookups, one cache entry per mint
use super::source::NftMetadataSource;
use super::types::NftMetadata;
use crate::cache::{CacheConfig, TtlCache};
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use crate::utils::validate_public_key;
use std::sync::Arc;

pub fn nft_cache_key(mint: &str) -> String {
    format!("nft:{}", mint)
}

pub struct NftMetadataService {
    source: Arc<dyn NftMetadataSource>,
    cache: TtlCache<NftMetadata>,
}

impl NftMetadataService {
    pub fn new(source: Arc<dyn NftMetadataSource>, config: CacheConfig) -> Self {
        Self {
            source,
            cache: TtlCache::new("nft-metadata", config),
        }
    }

    pub fn cache(&self) -> &TtlCache<NftMetadata> {
        &self.cache
    }

    /// Metadata for `mint`; `Ok(None)` when the provider has no such asset
    ///
    /// Absent assets and failures are not cached.
    pub async fn fetch_nft_metadata(&self, mint: &str) -> KitResult<Option<NftMetadata>> {
        let mint = mint.trim();
        if !validate_public_key(mint) {
            return Err(KitError::Validation(format!("Invalid mint address: {}", mint)));
        }

        let key = nft_cache_key(mint);
        if let Some(metadata) = self.cache.get(&key) {
            logger::debug(LogTag::Nft, &format!("metadata for {} served from cache", mint));
            return Ok(Some(metadata));
        }

        let Some(asset) = self.source.fetch_asset(mint).await? else {
            return Ok(None);
        };

        let metadata = NftMetadata::from_raw(mint, asset);
        self.cache.set(key, metadata.clone());
        Ok(Some(metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nft::types::{RawAsset, RawContent, RawMetadata};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MINT: &str = "J1S9H3QjnRtBbbuD4HjPV6RpRhwuk4zKbxsnCHuTgh9w";

    struct ScriptedAssets {
        calls: AtomicUsize,
        responses: Mutex<VecDeque<KitResult<Option<RawAsset>>>>,
    }

    impl ScriptedAssets {
        fn new(responses: Vec<KitResult<Option<RawAsset>>>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses.into()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NftMetadataSource for ScriptedAssets {
        async fn fetch_asset(&self, _mint: &str) -> KitResult<Option<RawAsset>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Ok(None))
        }
    }

    fn named_asset(name: &str) -> RawAsset {
        RawAsset {
            content: Some(RawContent {
                metadata: Some(RawMetadata {
                    name: Some(name.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_hit_after_first_fetch() {
        let source = ScriptedAssets::new(vec![Ok(Some(named_asset("Okay Bear")))]);
        let service = NftMetadataService::new(source.clone(), CacheConfig::nft_metadata());

        let first = service.fetch_nft_metadata(MINT).await.expect("fetch").expect("asset");
        assert_eq!(first.name, "Okay Bear");
        assert_eq!(first.mint, MINT);

        let second = service.fetch_nft_metadata(MINT).await.expect("fetch");
        assert_eq!(second, Some(first));
        assert_eq!(source.calls(), 1);
        assert!(service.cache().contains(&nft_cache_key(MINT)));
    }

    #[tokio::test]
    async fn test_failure_is_propagated_then_retried() {
        let source = ScriptedAssets::new(vec![
            Err(KitError::Rpc {
                method: "getAsset".to_string(),
                message: "Asset not indexed".to_string(),
            }),
            Ok(Some(named_asset("Retry"))),
        ]);
        let service = NftMetadataService::new(source.clone(), CacheConfig::nft_metadata());

        assert!(service.fetch_nft_metadata(MINT).await.is_err());
        assert!(service.cache().is_empty());

        let metadata = service.fetch_nft_metadata(MINT).await.expect("fetch");
        assert_eq!(metadata.map(|m| m.name), Some("Retry".to_string()));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_absent_asset_is_not_cached() {
        let source = ScriptedAssets::new(vec![Ok(None), Ok(None)]);
        let service = NftMetadataService::new(source.clone(), CacheConfig::nft_metadata());

        assert_eq!(service.fetch_nft_metadata(MINT).await.expect("fetch"), None);
        assert_eq!(service.fetch_nft_metadata(MINT).await.expect("fetch"), None);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_invalid_mint_never_reaches_source() {
        let source = ScriptedAssets::new(vec![]);
        let service = NftMetadataService::new(source.clone(), CacheConfig::nft_metadata());

        let err = service.fetch_nft_metadata("not a mint").await.unwrap_err();
        assert!(matches!(err, KitError::Validation(_)));
        assert_eq!(source.calls(), 0);
    }
}
