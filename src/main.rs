use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use soldevkit::{
    actions::{
        airdrop::DEFAULT_AIRDROP_SOL, RequestAirdrop, TransactionDetails, TransactionValidity,
        TransferAsset, TransferTokens, WalletBalance, WalletHoldings,
    },
    cache::CacheConfig,
    config::{self, Config},
    errors::KitError,
    logger::{self, LogTag},
    nft::{DasMetadataSource, NftMetadataService},
    operation::OperationState,
    rpc::{ChainClient, KeypairWallet, RpcClient, TransactionSender},
    tokens::{JupiterTokenList, TokenRegistry},
    utils::{network_name, parse_pubkey, short_address},
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "soldevkit", version, about = "Solana developer toolkit")]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = config::CONFIG_FILE_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a verified token by mint address or symbol
    Token { query: String },
    /// Show NFT metadata for a mint
    Nft { mint: String },
    /// SOL balance of an address
    Balance {
        address: String,
        #[arg(long)]
        digits: Option<u32>,
    },
    /// SOL and SPL token holdings of an address
    Holdings { address: String },
    /// Request a SOL airdrop (devnet/testnet)
    Airdrop {
        address: String,
        #[arg(long, default_value_t = DEFAULT_AIRDROP_SOL)]
        sol: f64,
    },
    /// Check a transaction signature
    Tx {
        signature: String,
        /// Print the parsed transaction instead of a validity check
        #[arg(long)]
        details: bool,
    },
    /// Transfer SOL, or SPL base units with --mint
    Transfer {
        recipient: String,
        amount: f64,
        #[arg(long)]
        mint: Option<String>,
        /// Solana CLI keypair file used to sign
        #[arg(long)]
        keypair: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    logger::init();

    // --debug-<tag> and friends belong to the logger
    let args = std::env::args().filter(|arg| !logger::is_logger_flag(arg));
    let cli = Cli::parse_from(args);

    if let Err(e) = run(cli).await {
        logger::error(LogTag::System, &format!("{:#}", e));
        if e.downcast_ref::<KitError>().is_some_and(KitError::is_recoverable) {
            logger::warning(LogTag::System, "Transient failure, retrying may succeed");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    config::load_config_from_path(&cli.config).context("loading configuration")?;
    let config = config::get_config_clone();

    match cli.command {
        Command::Token { query } => token(&config, &query).await,
        Command::Nft { mint } => nft(&config, &mint).await,
        Command::Balance { address, digits } => balance(&config, &address, digits).await,
        Command::Holdings { address } => holdings(&config, &address).await,
        Command::Airdrop { address, sol } => airdrop(&config, &address, sol).await,
        Command::Tx { signature, details } => tx(&config, &signature, details).await,
        Command::Transfer {
            recipient,
            amount,
            mint,
            keypair,
        } => transfer(&config, &recipient, amount, mint.as_deref(), &keypair).await,
    }
}

fn chain_client(config: &Config) -> Result<Arc<dyn ChainClient>> {
    let client = RpcClient::new(&config.rpc)?;
    logger::info(
        LogTag::Rpc,
        &format!("Using {} ({})", network_name(client.endpoint()), client.endpoint()),
    );
    Ok(Arc::new(client))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Turn a settled tracker state into the command outcome
fn settled<T>(state: OperationState<T>) -> Result<T> {
    match state.result {
        Some(value) if state.error.is_none() => Ok(value),
        _ => Err(anyhow!(state
            .error
            .unwrap_or_else(|| soldevkit::operation::FALLBACK_ERROR_MESSAGE.to_string()))),
    }
}

fn token_registry(config: &Config) -> Result<TokenRegistry> {
    let source = JupiterTokenList::new(&config.tokens)?;
    Ok(TokenRegistry::new(
        Arc::new(source),
        CacheConfig::token_list_from(&config.cache),
    ))
}

async fn token(config: &Config, query: &str) -> Result<()> {
    let registry = token_registry(config)?;

    match registry.fetch_token(query).await? {
        Some(token) => print_json(&token),
        None => bail!("No verified token matches '{}'", query),
    }
}

async fn nft(config: &Config, mint: &str) -> Result<()> {
    let source = DasMetadataSource::new(&config.nft)?;
    let service = NftMetadataService::new(
        Arc::new(source),
        CacheConfig::nft_metadata_from(&config.cache),
    );

    match service.fetch_nft_metadata(mint).await? {
        Some(metadata) => print_json(&metadata),
        None => bail!("No asset found for {}", mint),
    }
}

async fn balance(config: &Config, address: &str, digits: Option<u32>) -> Result<()> {
    let wallet = parse_pubkey(address)?;
    let action = WalletBalance::new(chain_client(config)?, Some(wallet));

    action.fetch_balance("SOL", digits).await;
    let sol = settled(action.state())?;
    println!("{} {} SOL", short_address(address).bold(), sol.to_string().green());
    Ok(())
}

async fn holdings(config: &Config, address: &str) -> Result<()> {
    let wallet = parse_pubkey(address)?;
    let action = WalletHoldings::new(
        chain_client(config)?,
        Arc::new(token_registry(config)?),
        Some(wallet),
    );

    action.fetch_holdings().await;
    let tokens = settled(action.state())?;
    println!("{}", short_address(address).bold());
    for token in &tokens {
        println!(
            "  {:<10} {:>20}  {}",
            token.symbol,
            token.balance.to_string().green(),
            token.name.dimmed()
        );
    }
    Ok(())
}

async fn airdrop(config: &Config, address: &str, sol: f64) -> Result<()> {
    let wallet = parse_pubkey(address)?;
    let action = RequestAirdrop::new(chain_client(config)?, Some(wallet));

    action.request_airdrop(sol).await;
    let result = settled(action.state())?;
    println!("{} {}", "Airdrop confirmed:".green(), result.signature);
    Ok(())
}

async fn tx(config: &Config, signature: &str, details: bool) -> Result<()> {
    let client = chain_client(config)?;

    if details {
        let action = TransactionDetails::new(client, signature, false);
        action.fetch_details().await;
        let record = settled(action.state())?;
        return print_json(&record);
    }

    let action = TransactionValidity::new(client, signature, false);
    action.check().await;
    let result = settled(action.state())?;
    if result.is_valid {
        println!("{} {}", "valid".green().bold(), signature);
    } else {
        println!("{} {}", "not found".yellow().bold(), signature);
    }
    Ok(())
}

async fn transfer(
    config: &Config,
    recipient: &str,
    amount: f64,
    mint: Option<&str>,
    keypair: &std::path::Path,
) -> Result<()> {
    let wallet = KeypairWallet::from_file(keypair)?;
    logger::info(
        LogTag::Wallet,
        &format!("Signing as {}", short_address(&wallet.public_key().to_string())),
    );

    let asset = match mint {
        Some(mint) => TransferAsset::Spl {
            mint: parse_pubkey(mint)?,
        },
        None => TransferAsset::Sol,
    };

    let action = TransferTokens::new(chain_client(config)?, Some(Arc::new(wallet)));
    action.transfer(recipient, asset, amount).await;
    let result = settled(action.state())?;
    println!("{} {}", "Transfer confirmed:".green(), result.signature);
    Ok(())
}
