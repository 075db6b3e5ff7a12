//! NFT metadata: DAS lookups, normalization, cached access

pub mod service;
pub mod source;
pub mod types;

pub use service::{nft_cache_key, NftMetadataService};
pub use source::{DasMetadataSource, NftMetadataSource};
pub use types::{NftAttribute, NftMetadata, RawAsset};
