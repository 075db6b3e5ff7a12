use super::schemas::Config;
/// Configuration utilities - loading and access helpers
///
/// The binary loads the file once at startup into `CONFIG`; library code
/// receives the pieces it needs explicitly and never reads the global.
use crate::errors::{KitError, KitResult};
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::path::Path;

/// Global configuration instance, set once by `load_config_from_path`
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "soldevkit.toml";

/// Overrides `[rpc] url` when set
pub const RPC_URL_ENV: &str = "SOLDEVKIT_RPC_URL";

/// Parse a TOML document into a configuration
pub fn parse_config(contents: &str) -> KitResult<Config> {
    toml::from_str::<Config>(contents)
        .map_err(|e| KitError::Config(format!("Failed to parse config: {}", e)))
}

/// Read a configuration file, falling back to defaults if it doesn't exist
pub fn read_config_file(path: &Path) -> KitResult<Config> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            KitError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        parse_config(&contents)?
    } else {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        Config::default()
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(RPC_URL_ENV) {
        if !url.trim().is_empty() {
            logger::debug(LogTag::Config, &format!("RPC url overridden by {}", RPC_URL_ENV));
            config.rpc.url = url.trim().to_string();
        }
    }
}

/// Load configuration from a file and initialize the global CONFIG
pub fn load_config_from_path(path: &Path) -> KitResult<()> {
    let config = read_config_file(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| KitError::Config("Config already initialized".to_string()))?;

    Ok(())
}

/// Get a clone of the global configuration, or defaults if it was never loaded
pub fn get_config_clone() -> Config {
    CONFIG
        .get()
        .map(|lock| lock.read().clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse_config(
            r#"
            [cache]
            token_list_ttl_secs = 60

            [rpc]
            url = "http://127.0.0.1:8899"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.cache.token_list_ttl_secs, 60);
        assert_eq!(config.cache.nft_metadata_ttl_secs, 600);
        assert_eq!(config.rpc.url, "http://127.0.0.1:8899");
        assert_eq!(config.tokens, super::super::schemas::TokensConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = parse_config("[cache\nnope").unwrap_err();
        assert!(matches!(err, KitError::Config(_)));
    }

    #[test]
    fn test_read_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[nft]\nrequest_timeout_secs = 5").expect("write");

        let config = read_config_file(file.path()).expect("config");
        assert_eq!(config.nft.request_timeout_secs, 5);
        assert_eq!(config.cache.nft_metadata_ttl().as_secs(), 600);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = read_config_file(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(config.cache.token_list_ttl().as_secs(), 1800);
    }
}
