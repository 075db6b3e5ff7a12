/// Tokens held by the connected wallet: SOL first, then SPL accounts with a balance
use crate::constants::SOL_MINT;
use crate::errors::KitError;
use crate::logger::{self, LogTag};
use crate::operation::AsyncOperation;
use crate::rpc::{ChainClient, TokenAccountBalance};
use crate::tokens::{TokenDescriptor, TokenRegistry};
use crate::utils::{lamports_to_sol, short_address};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

pub const SOL_DECIMALS: u8 = 9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletToken {
    pub mint: String,
    pub symbol: String,
    pub name: String,
    pub balance: f64,
    pub decimals: u8,
    pub logo_uri: Option<String>,
}

impl WalletToken {
    pub fn sol(balance: f64) -> Self {
        Self {
            mint: SOL_MINT.to_string(),
            symbol: "SOL".to_string(),
            name: "Solana".to_string(),
            balance,
            decimals: SOL_DECIMALS,
            logo_uri: None,
        }
    }

    /// SPL holding labelled from the token list, or from the mint when unlisted
    pub fn from_account(account: TokenAccountBalance, listed: Option<&TokenDescriptor>) -> Self {
        let mint = account.mint;
        let (symbol, name, logo_uri) = match listed {
            Some(token) => (
                token.symbol.clone(),
                token.name.clone(),
                token.logo_uri.clone(),
            ),
            None => (
                format!("{}...", mint.get(..4).unwrap_or(&mint)),
                format!("Token {}", mint.get(..6).unwrap_or(&mint)),
                None,
            ),
        };

        Self {
            symbol,
            name,
            logo_uri,
            balance: account.ui_amount,
            decimals: account.decimals,
            mint,
        }
    }
}

pub struct WalletHoldings {
    client: Arc<dyn ChainClient>,
    registry: Arc<TokenRegistry>,
    wallet: Option<Pubkey>,
    operation: AsyncOperation<Vec<WalletToken>>,
}

impl WalletHoldings {
    pub fn new(
        client: Arc<dyn ChainClient>,
        registry: Arc<TokenRegistry>,
        wallet: Option<Pubkey>,
    ) -> Self {
        Self {
            client,
            registry,
            wallet,
            operation: AsyncOperation::with_empty("wallet_holdings", Vec::new()),
        }
    }

    tracked_accessors!(Vec<WalletToken>);

    /// List the wallet's holdings
    ///
    /// Only a missing wallet fails. An unreadable SOL balance is reported as 0,
    /// an unreadable token account listing leaves SOL alone, and an unavailable
    /// token list falls back to names derived from the mint.
    pub fn fetch_holdings(&self) -> impl Future<Output = Option<Vec<WalletToken>>> {
        let client = Arc::clone(&self.client);
        let registry = Arc::clone(&self.registry);
        let wallet = self.wallet.ok_or(KitError::WalletNotConnected);

        self.operation.run_checked(wallet, move |wallet| async move {
            Ok::<_, KitError>(collect_holdings(&*client, &registry, &wallet).await)
        })
    }
}

deactivate_on_drop!(WalletHoldings);

async fn collect_holdings(
    client: &dyn ChainClient,
    registry: &TokenRegistry,
    wallet: &Pubkey,
) -> Vec<WalletToken> {
    let owner = short_address(&wallet.to_string());

    let sol = match client.get_balance(wallet).await {
        Ok(lamports) => lamports_to_sol(lamports, None),
        Err(e) => {
            logger::warning(
                LogTag::Wallet,
                &format!("SOL balance for {} unavailable: {}", owner, e),
            );
            0.0
        }
    };

    let mut holdings = vec![WalletToken::sol(sol)];

    let accounts = match client.get_token_accounts_by_owner(wallet).await {
        Ok(accounts) => accounts,
        Err(e) => {
            logger::warning(
                LogTag::Wallet,
                &format!("Token accounts for {} unavailable: {}", owner, e),
            );
            return holdings;
        }
    };

    let funded: Vec<TokenAccountBalance> = accounts
        .into_iter()
        .filter(|account| account.ui_amount > 0.0)
        .collect();
    if funded.is_empty() {
        return holdings;
    }

    let listed = listed_tokens(registry).await;
    holdings.extend(funded.into_iter().map(|account| {
        let token = listed.get(&account.mint);
        WalletToken::from_account(account, token)
    }));

    logger::debug(
        LogTag::Wallet,
        &format!("{} holds {} tokens", owner, holdings.len()),
    );
    holdings
}

/// Token list keyed by mint; empty when the list cannot be fetched
async fn listed_tokens(registry: &TokenRegistry) -> HashMap<String, TokenDescriptor> {
    match registry.token_list().await {
        Ok(list) => list
            .iter()
            .map(|token| (token.address.clone(), token.clone()))
            .collect(),
        Err(e) => {
            logger::warning(LogTag::Tokens, &format!("Token list unavailable: {}", e));
            HashMap::new()
        }
    }
}
