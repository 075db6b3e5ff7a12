/// Subsystem tags attached to every log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Cache,
    Tokens,
    Nft,
    Rpc,
    Wallet,
    Operation,
}

impl LogTag {
    pub const ALL: [LogTag; 8] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Cache,
        LogTag::Tokens,
        LogTag::Nft,
        LogTag::Rpc,
        LogTag::Wallet,
        LogTag::Operation,
    ];

    /// Uppercase label used in console and plain output
    pub fn to_plain_string(&self) -> &'static str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Config => "CONFIG",
            LogTag::Cache => "CACHE",
            LogTag::Tokens => "TOKENS",
            LogTag::Nft => "NFT",
            LogTag::Rpc => "RPC",
            LogTag::Wallet => "WALLET",
            LogTag::Operation => "OPERATION",
        }
    }

    /// Key used by `--debug-<key>` / `--verbose-<key>` flags
    pub fn to_debug_key(&self) -> String {
        self.to_plain_string().to_lowercase()
    }

    pub fn from_debug_key(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.to_debug_key() == key.to_lowercase())
    }
}
