use serde::{Deserialize, Serialize};

pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_SYMBOL: &str = "UNKNOWN";

/// Token entry as served by the token list endpoint; every field is optional upstream
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTokenEntry {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub decimals: Option<u8>,
    #[serde(default, rename = "logoURI")]
    pub logo_uri: Option<String>,
}

/// Normalized fungible token descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub logo_uri: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TokenDescriptor {
    /// Normalize an upstream entry
    ///
    /// Defaults: name "Unknown", symbol "UNKNOWN", decimals 0, no logo.
    /// Entries without an address cannot be looked up and yield `None`.
    pub fn from_raw(raw: RawTokenEntry) -> Option<Self> {
        let address = non_blank(raw.address)?;
        Some(Self {
            address,
            name: non_blank(raw.name).unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            symbol: non_blank(raw.symbol).unwrap_or_else(|| UNKNOWN_SYMBOL.to_string()),
            decimals: raw.decimals.unwrap_or(0),
            logo_uri: non_blank(raw.logo_uri),
        })
    }

    pub fn matches_address(&self, query: &str) -> bool {
        self.address.eq_ignore_ascii_case(query)
    }

    pub fn matches_symbol(&self, query: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(query)
    }
}
