//! Logging macros for ergonomic message formatting.
//!
//! Each macro formats its trailing arguments like `format!` and forwards to
//! the matching [`Logger`](crate::Logger) method, returning its `Result`.
//!
//! # Examples
//!
//! ```
//! use logharbour::prelude::*;
//! use logharbour::{log_activity, log_data_change, log_debug};
//! use std::sync::Arc;
//!
//! let logger = Logger::new("shop", Arc::new(MemorySink::new()));
//!
//! let user = "john";
//! log_activity!(logger, serde_json::json!({"username": user}), "{} logged in", user)?;
//!
//! let change = ChangeInfo::new("User", "Update").with_change("email", "john@example.com");
//! log_data_change!(logger, change, "profile of {} updated", user)?;
//!
//! log_debug!(logger, { "sessionID" => "12345" }, "checking session for {}", user)?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log an activity with a formatted message.
#[macro_export]
macro_rules! log_activity {
    ($logger:expr, $data:expr, $($arg:tt)+) => {
        $logger.log_activity(format!($($arg)+), $data)
    };
}

/// Log a data change with a formatted message.
#[macro_export]
macro_rules! log_data_change {
    ($logger:expr, $data:expr, $($arg:tt)+) => {
        $logger.log_data_change(format!($($arg)+), $data)
    };
}

/// Log a debug entry, optionally with a `{ name => value, .. }` block of variables.
///
/// The recorded file and line are those of the macro invocation.
#[macro_export]
macro_rules! log_debug {
    ($logger:expr, { $($name:expr => $value:expr),* $(,)? }, $($arg:tt)+) => {
        $logger.log_debug(
            format!($($arg)+),
            $crate::DebugInfo::new()$(.with_variable($name, $value))*,
        )
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.log_debug(format!($($arg)+), $crate::DebugInfo::new())
    };
}
