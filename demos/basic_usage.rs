//! Basic logger usage example
//!
//! Writes activity, data change and debug entries to stdout, with stderr as
//! the fallback branch, then raises verbosity at runtime.
//!
//! Run with: cargo run --example basic_usage

use logharbour::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn inner_function(logger: &Logger) -> Result<()> {
    logger.log_debug(
        "Debugging inner function",
        DebugInfo::new().with_variable("innerVar", "innerValue"),
    )
}

fn outer_function(logger: &Logger) -> Result<()> {
    inner_function(logger)
}

fn main() -> Result<()> {
    let sink = FailoverSink::new(Arc::new(ConsoleSink::new()), Arc::new(ConsoleSink::stderr()));
    let logger = Logger::with_failover("MyApp", sink);

    let session = logger
        .with_module("auth")
        .with_who("john")
        .with_remote_ip("203.0.113.9");

    session.log_activity("User logged in", json!({"username": "john"}))?;

    session.with_op("update_profile").log_data_change(
        "User updated profile",
        ChangeInfo::new("User", "Update").with_change("email", "john@example.com"),
    )?;

    // Below the Info threshold: dropped silently
    session.log_debug_at(
        Priority::Debug1,
        "Debugging user session",
        DebugInfo::new().with_variable("sessionID", "12345"),
    )?;

    logger.change_priority(Priority::Debug2);

    logger.log_debug_at(
        Priority::Debug2,
        "Detailed debugging info",
        DebugInfo::new()
            .with_variable("sessionID", "12345")
            .with_variable("userID", "john"),
    )?;

    outer_function(&logger)?;

    logger.flush()
}
