/// Central filtering logic
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Anything above the minimum level threshold is dropped
/// 3. Debug requires --debug-<tag> for that tag
/// 4. Verbose requires --verbose or --verbose-<tag>
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(tag);
    }

    if level == LogLevel::Verbose {
        return config.min_level == LogLevel::Verbose || is_verbose_enabled_for_tag(tag);
    }

    true
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}
