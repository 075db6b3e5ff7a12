//! Structured logging for soldevkit
//!
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-subsystem debug control via --debug-<tag> flags
//! - Colored console output
//!
//! ## Usage
//!
//! ```rust
//! use soldevkit::logger::{self, LogTag};
//!
//! logger::info(LogTag::Tokens, "Token list refreshed");
//! logger::debug(LogTag::Cache, "cache hit for token-list:verified"); // only with --debug-cache
//! ```
//!
//! Call `logger::init()` once at startup.

mod config;
mod core;
mod format;
mod levels;
mod tags;

pub use config::{
    config_from_args, get_logger_config, init_from_args, is_logger_flag, set_logger_config,
    LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Parse command-line debug flags and install the logger configuration
pub fn init() {
    config::init_from_args();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level, only shown when `--debug-<tag>` was passed
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
