//! Program and mint addresses used by the transfer builder and token lookups

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub const SPL_TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const ASSOCIATED_TOKEN_PROGRAM_ID: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

/// Wrapped SOL mint
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";

/// (symbol, mint) pairs resolvable without the token list
pub const WELL_KNOWN_MINTS: [(&str, &str); 3] = [
    ("SOL", SOL_MINT),
    ("USDC", USDC_MINT),
    ("USDT", USDT_MINT),
];

