//! Fungible token descriptors: upstream list, normalization, cached lookups

pub mod registry;
pub mod source;
pub mod types;

pub use registry::{well_known_mint, TokenRegistry, TOKEN_LIST_CACHE_KEY};
pub use source::{JupiterTokenList, TokenListSource};
pub use types::{RawTokenEntry, TokenDescriptor};
