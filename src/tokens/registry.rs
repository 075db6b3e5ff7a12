//! Cache-backed token lookups
//!
//! The whole verified list is cached under one key; lookups by address or
//! symbol scan the cached list. Failed fetches are never cached, so the next
//! lookup goes upstream again.

use super::source::TokenListSource;
use super::types::TokenDescriptor;
use crate::cache::{CacheConfig, TtlCache};
use crate::constants::WELL_KNOWN_MINTS;
use crate::errors::KitResult;
use crate::logger::{self, LogTag};
use std::sync::Arc;

pub const TOKEN_LIST_CACHE_KEY: &str = "token-list:verified";

pub struct TokenRegistry {
    source: Arc<dyn TokenListSource>,
    cache: TtlCache<Arc<Vec<TokenDescriptor>>>,
}

impl TokenRegistry {
    pub fn new(source: Arc<dyn TokenListSource>, config: CacheConfig) -> Self {
        Self {
            source,
            cache: TtlCache::new("token-list", config),
        }
    }

    pub fn cache(&self) -> &TtlCache<Arc<Vec<TokenDescriptor>>> {
        &self.cache
    }

    /// Normalized token list, from cache when fresh
    pub async fn token_list(&self) -> KitResult<Arc<Vec<TokenDescriptor>>> {
        if let Some(list) = self.cache.get(TOKEN_LIST_CACHE_KEY) {
            logger::debug(LogTag::Tokens, "token list served from cache");
            return Ok(list);
        }

        let raw = self.source.fetch_token_list().await?;
        let total = raw.len();
        let list: Vec<TokenDescriptor> = raw
            .into_iter()
            .filter_map(TokenDescriptor::from_raw)
            .collect();

        if list.len() < total {
            logger::debug(
                LogTag::Tokens,
                &format!("Dropped {} token entries without an address", total - list.len()),
            );
        }

        let list = Arc::new(list);
        self.cache.set(TOKEN_LIST_CACHE_KEY, Arc::clone(&list));
        logger::info(
            LogTag::Tokens,
            &format!("Token list refreshed: {} tokens", list.len()),
        );
        Ok(list)
    }

    /// Look a token up by mint address or symbol (case-insensitive)
    ///
    /// An address match wins over a symbol match. `Ok(None)` means the list was
    /// fetched and the token is not on it.
    pub async fn fetch_token(&self, address_or_symbol: &str) -> KitResult<Option<TokenDescriptor>> {
        let query = address_or_symbol.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let list = self.token_list().await?;
        let found = list
            .iter()
            .find(|token| token.matches_address(query))
            .or_else(|| list.iter().find(|token| token.matches_symbol(query)))
            .cloned();

        if found.is_none() {
            logger::debug(LogTag::Tokens, &format!("No token matches '{}'", query));
        }
        Ok(found)
    }
}

/// Mint of a well-known token symbol, resolvable without any network call
pub fn well_known_mint(symbol: &str) -> Option<&'static str> {
    WELL_KNOWN_MINTS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(symbol.trim()))
        .map(|(_, mint)| *mint)
}
