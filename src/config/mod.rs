//! Configuration: TOML file with embedded defaults per section

#[macro_use]
mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{CacheTtlConfig, Config, NftConfig, RpcConfig, TokensConfig};
pub use utils::{
    get_config_clone, load_config_from_path, parse_config, read_config_file, CONFIG,
    CONFIG_FILE_PATH, RPC_URL_ENV,
};
