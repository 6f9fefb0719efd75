//! Verbosity-gated stderr logging for pairing generation.
//!
//! Nothing is formatted unless the configured verbosity reaches the
//! message's level, so verbosity 0 costs one comparison per call site.

pub const VERBOSITY_SILENT: u8 = 0;
/// Rounds and schedules produced.
pub const VERBOSITY_CHANGES: u8 = 1;
/// Input validation and cycle wrapping.
pub const VERBOSITY_CHECKS: u8 = 2;
/// Seat order after each rotation.
pub const VERBOSITY_DEBUG: u8 = 3;

/// Human-readable name of a verbosity level (anything above DEBUG is DEBUG).
pub fn level_name(verbosity: u8) -> &'static str {
    match verbosity {
        VERBOSITY_SILENT => "silent",
        VERBOSITY_CHANGES => "changes",
        VERBOSITY_CHECKS => "checks",
        _ => "debug",
    }
}

/// Shared body of the level macros; prefixes each line with its level.
#[doc(hidden)]
#[macro_export]
macro_rules! log_at {
    ($level:expr, $verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $level {
            eprintln!("[{}] {}", $crate::logging::level_name($level), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_CHANGES, $verbosity, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_CHECKS, $verbosity, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        $crate::log_at!($crate::logging::VERBOSITY_DEBUG, $verbosity, $($arg)*)
    };
}
