/// Logger configuration: threshold and per-tag debug switches
///
/// Populated once from command-line arguments at startup; can be replaced
/// at runtime (tests use this to silence or widen output).
use super::levels::LogLevel;
use super::tags::LogTag;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub min_level: LogLevel,
    pub debug_tags: HashSet<LogTag>,
    pub verbose_tags: HashSet<LogTag>,
    pub use_colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            use_colors: true,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG.read().clone()
}

pub fn set_logger_config(config: LoggerConfig) {
    *LOGGER_CONFIG.write() = config;
}

/// Build a configuration from a list of arguments
///
/// Recognised flags: `--debug-<tag>`, `--debug-all`, `--verbose`,
/// `--verbose-<tag>`, `--quiet`, `--no-color`. Everything else is ignored.
pub fn config_from_args<I, S>(args: I) -> LoggerConfig
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut config = LoggerConfig::default();

    for arg in args {
        let arg = arg.as_ref();
        if arg == "--verbose" {
            config.min_level = LogLevel::Verbose;
        } else if arg == "--quiet" {
            config.min_level = LogLevel::Error;
        } else if arg == "--no-color" {
            config.use_colors = false;
        } else if arg == "--debug-all" {
            config.debug_tags.extend(LogTag::ALL);
            if config.min_level < LogLevel::Debug {
                config.min_level = LogLevel::Debug;
            }
        } else if let Some(key) = arg.strip_prefix("--debug-") {
            if let Some(tag) = LogTag::from_debug_key(key) {
                config.debug_tags.insert(tag);
                if config.min_level < LogLevel::Debug {
                    config.min_level = LogLevel::Debug;
                }
            }
        } else if let Some(key) = arg.strip_prefix("--verbose-") {
            if let Some(tag) = LogTag::from_debug_key(key) {
                config.verbose_tags.insert(tag);
                config.debug_tags.insert(tag);
                config.min_level = LogLevel::Verbose;
            }
        }
    }

    config
}

/// True for arguments consumed by `config_from_args`
pub fn is_logger_flag(arg: &str) -> bool {
    matches!(arg, "--verbose" | "--quiet" | "--no-color")
        || arg.starts_with("--debug-")
        || arg.starts_with("--verbose-")
}

/// Scan the process arguments and install the resulting configuration
pub fn init_from_args() {
    set_logger_config(config_from_args(std::env::args().skip(1)));
}

pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().debug_tags.contains(tag)
}

pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    LOGGER_CONFIG.read().verbose_tags.contains(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flags_enable_tag_and_level() {
        let config = config_from_args(["--debug-cache", "--debug-rpc", "token", "SOL"]);
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.debug_tags.contains(&LogTag::Cache));
        assert!(config.debug_tags.contains(&LogTag::Rpc));
        assert!(!config.debug_tags.contains(&LogTag::Nft));
    }

    #[test]
    fn test_quiet_and_unknown_flags() {
        let config = config_from_args(["--quiet", "--debug-nonsense"]);
        assert_eq!(config.min_level, LogLevel::Error);
        assert!(config.debug_tags.is_empty());
    }

    #[test]
    fn test_logger_flags_recognised() {
        assert!(is_logger_flag("--debug-nft"));
        assert!(is_logger_flag("--no-color"));
        assert!(!is_logger_flag("--config"));
        assert!(!is_logger_flag("balance"));
    }
}
