/// Log level definitions for structured logging
///
/// Levels are ordered by severity (Error < Warning < Info < Debug < Verbose)
/// so a minimum threshold can be compared directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,   // Always shown
    Warning = 1,
    Info = 2,    // Default threshold
    Debug = 3,   // Gated by --debug-<tag>
    Verbose = 4, // Gated by --verbose
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Verbose => "VERBOSE",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
