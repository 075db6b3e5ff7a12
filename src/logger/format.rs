//! Console formatting with ANSI colors
//!
//! Errors and warnings go to stderr so command output on stdout stays
//! pipeable; everything else goes to stdout.

use super::config::get_logger_config;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, stdout, ErrorKind, Write};

const TAG_WIDTH: usize = 10;
const LOG_TYPE_WIDTH: usize = 8;

pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();
    let use_colors = get_logger_config().use_colors;

    let line = if use_colors {
        format!(
            "{} [{}] [{}] {}",
            time.dimmed(),
            format_tag(&tag),
            format_log_type(level),
            message
        )
    } else {
        format!(
            "{} [{:<tag_w$}] [{:<type_w$}] {}",
            time,
            tag.to_plain_string(),
            level.as_str(),
            message,
            tag_w = TAG_WIDTH,
            type_w = LOG_TYPE_WIDTH
        )
    };

    match level {
        LogLevel::Error | LogLevel::Warning => print_stderr(&line),
        _ => print_stdout_safe(&line),
    }
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Config => padded.bright_white().bold(),
        LogTag::Cache => padded.bright_cyan().bold(),
        LogTag::Tokens => padded.bright_green().bold(),
        LogTag::Nft => padded.bright_magenta().bold(),
        LogTag::Rpc => padded.bright_blue().bold(),
        LogTag::Wallet => padded.magenta().bold(),
        LogTag::Operation => padded.bright_purple().bold(),
    }
}

fn format_log_type(level: LogLevel) -> ColoredString {
    let padded = format!("{:<width$}", level.as_str(), width = LOG_TYPE_WIDTH);
    match level {
        LogLevel::Error => padded.bright_red().bold(),
        LogLevel::Warning => padded.bright_yellow().bold(),
        LogLevel::Info => padded.white().bold(),
        LogLevel::Debug => padded.dimmed(),
        LogLevel::Verbose => padded.dimmed(),
    }
}

/// Print to stdout but exit quietly on a broken pipe
fn print_stdout_safe(message: &str) {
    if let Err(e) = writeln!(stdout(), "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        let _ = writeln!(stderr(), "Logger stdout error: {}", e);
    }
    let _ = stdout().flush();
}

fn print_stderr(message: &str) {
    let _ = writeln!(stderr(), "{}", message);
}
