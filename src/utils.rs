/// Unit conversion and address helpers
use crate::constants::LAMPORTS_PER_SOL;
use crate::errors::{KitError, KitResult};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Round to a fixed number of decimal places
pub fn to_fixed(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Convert lamports to SOL, optionally rounded for display
///
/// `Some(0)` means no rounding, same as `None`.
pub fn lamports_to_sol(lamports: u64, digits: Option<u32>) -> f64 {
    let sol = lamports as f64 / LAMPORTS_PER_SOL as f64;
    match digits {
        Some(digits) if digits > 0 => to_fixed(sol, digits),
        _ => sol,
    }
}

/// Convert SOL to lamports, rounding to the nearest lamport
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).round().max(0.0) as u64
}

pub fn parse_pubkey(address: &str) -> KitResult<Pubkey> {
    Pubkey::from_str(address.trim())
        .map_err(|e| KitError::Validation(format!("Invalid address '{}': {}", address, e)))
}

pub fn validate_public_key(address: &str) -> bool {
    Pubkey::from_str(address.trim()).is_ok()
}

/// `abcd...wxyz` form used in compact displays
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Human name of the cluster an RPC endpoint points at
pub fn network_name(endpoint: &str) -> String {
    if endpoint.contains("devnet") {
        return "Devnet".to_string();
    }
    if endpoint.contains("testnet") {
        return "Testnet".to_string();
    }
    if endpoint.contains("mainnet") {
        return "Mainnet".to_string();
    }
    if endpoint.contains("localhost") || endpoint.contains("127.0.0.1") {
        return "Localnet".to_string();
    }

    reqwest::Url::parse(endpoint)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .unwrap_or_else(|| "Unknown".to_string())
}
