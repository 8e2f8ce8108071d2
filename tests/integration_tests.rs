//! Integration tests for the emission pipeline
//!
//! These tests verify:
//! - Priority suppression and runtime threshold changes
//! - Non-destructive context derivation
//! - Failover on write errors and validation-failure redirection
//! - The JSON lines wire format
//! - File output

use logharbour::prelude::*;
use serde_json::{json, Value};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A sink that fails every write and counts the attempts.
struct FailingSink {
    attempts: AtomicUsize,
}

impl FailingSink {
    fn new() -> Self {
        Self {
            attempts: AtomicUsize::new(0),
        }
    }
}

impl Sink for FailingSink {
    fn write(&self, _buf: &[u8]) -> io::Result<usize> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::other("primary writer failed"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn parse_lines(content: &str) -> Vec<Value> {
    content
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is one JSON object"))
        .collect()
}

fn require_who() -> impl Validator {
    |entry: &Entry| {
        if entry.who.is_empty() {
            Err(ValidationError::new("who is required"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_priority_level_printing() {
    let output = Arc::new(MemorySink::new());
    let sink = FailoverSink::new(output.clone(), output.clone());
    let logger = Logger::builder("TestApp")
        .failover(sink)
        .priority(Priority::Debug1)
        .build()
        .expect("Failed to build logger");

    logger
        .log_debug("Debug1 message", DebugInfo::new())
        .expect("Debug1 message should be logged");

    logger.change_priority(Priority::Debug2);
    logger
        .log_debug_at(Priority::Debug2, "Debug2 message", DebugInfo::new())
        .expect("Debug2 message should be logged");

    let content = output.contents();
    let first = content.find("Debug1 message").expect("Debug1 message missing");
    let second = content.find("Debug2 message").expect("Debug2 message missing");
    assert!(first < second, "messages out of order: {}", content);

    let records = parse_lines(&content);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Priority"], json!("Debug1"));
    assert_eq!(records[1]["Priority"], json!("Debug2"));
}

#[test]
fn test_threshold_suppresses_every_lower_priority() {
    for (i, &threshold) in Priority::ALL.iter().enumerate() {
        let validated = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&validated);
        let sink = Arc::new(MemorySink::new());
        let logger = Logger::builder("app")
            .sink(sink.clone())
            .priority(threshold)
            .validator(move |_: &Entry| -> std::result::Result<(), ValidationError> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .build()
            .unwrap();

        for &lower in &Priority::ALL[..i] {
            logger.log_activity_at(lower, "hidden", json!({})).unwrap();
        }
        assert_eq!(validated.load(Ordering::SeqCst), 0);
        assert!(sink.is_empty(), "threshold {} leaked output", threshold);

        for &higher in &Priority::ALL[i..] {
            logger.log_activity_at(higher, "shown", json!({})).unwrap();
        }
        assert_eq!(sink.lines().len(), Priority::ALL.len() - i);
    }
}

#[test]
fn test_raise_then_lower_threshold() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("app", sink.clone());

    logger.log_activity_at(Priority::Warn, "before raise", json!({})).unwrap();
    logger.change_priority(Priority::Err);
    logger.log_activity_at(Priority::Warn, "while raised", json!({})).unwrap();
    logger.change_priority(Priority::Debug2);
    logger.log_activity_at(Priority::Debug1, "after lower", json!({})).unwrap();

    let content = sink.contents();
    assert!(content.contains("before raise"));
    assert!(!content.contains("while raised"));
    assert!(content.contains("after lower"));
}

#[test]
fn test_context_derivation_is_non_destructive() {
    let sink = Arc::new(MemorySink::new());
    let l1 = Logger::new("app", sink.clone()).with_who("system");
    let l2 = l1.with_who("alice");

    assert_eq!(l1.context().who(), "system");
    assert_eq!(l2.context().who(), "alice");

    l2.log_activity("as alice", json!({})).unwrap();
    l1.log_activity("as system", json!({})).unwrap();

    let records = parse_lines(&sink.contents());
    assert_eq!(records[0]["Who"], json!("alice"));
    assert_eq!(records[1]["Who"], json!("system"));
    assert!(!sink.lines()[1].contains("alice"));
}

#[test]
fn test_every_derivation_sets_one_field() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder("Shop")
        .system("web-7")
        .sink(sink.clone())
        .build()
        .unwrap()
        .with_module("orders")
        .with_who("carol")
        .with_op("cancel")
        .with_what_class("Order")
        .with_what_instance_id("ord-991")
        .with_status(Status::Failure)
        .with_remote_ip("192.168.1.20");

    logger
        .log_data_change(
            "order cancelled",
            ChangeInfo::new("Order", "Update").with_change("state", "cancelled"),
        )
        .unwrap();

    let record = &parse_lines(&sink.contents())[0];
    assert_eq!(record["AppName"], json!("Shop"));
    assert_eq!(record["System"], json!("web-7"));
    assert_eq!(record["Module"], json!("orders"));
    assert_eq!(record["Who"], json!("carol"));
    assert_eq!(record["Op"], json!("cancel"));
    assert_eq!(record["WhatClass"], json!("Order"));
    assert_eq!(record["WhatInstanceId"], json!("ord-991"));
    assert_eq!(record["Status"], json!(1));
    assert_eq!(record["RemoteIP"], json!("192.168.1.20"));
    assert_eq!(record["Type"], json!("Change"));
    assert_eq!(record["Data"]["changes"]["state"], json!("cancelled"));
}

#[test]
fn test_failover_sink_uses_fallback() {
    let primary = Arc::new(FailingSink::new());
    let fallback = Arc::new(MemorySink::new());
    let sink = FailoverSink::new(primary.clone(), fallback.clone());

    let message = b"test message";
    let written = sink.write(message).expect("fallback write should succeed");

    assert_eq!(written, message.len());
    assert_eq!(fallback.bytes(), message);
    assert_eq!(primary.attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_logger_fails_over_on_write_error() {
    let fallback = Arc::new(MemorySink::new());
    let logger = Logger::with_failover(
        "app",
        FailoverSink::new(Arc::new(FailingSink::new()), fallback.clone()),
    );

    logger.log_activity("survives", json!({"ok": true})).unwrap();

    assert!(fallback.contents().contains("survives"));
    assert_eq!(logger.metrics().written(), 1);
}

#[test]
fn test_both_branches_failing_is_error() {
    let logger = Logger::with_failover(
        "app",
        FailoverSink::new(Arc::new(FailingSink::new()), Arc::new(FailingSink::new())),
    );

    let err = logger.log_activity("lost", json!({})).unwrap_err();
    assert!(matches!(err, LoggerError::IoError(_)));
    assert_eq!(err.to_string(), "IO error: primary writer failed");
}

#[test]
fn test_invalid_entry_goes_only_to_fallback() {
    let primary = Arc::new(MemorySink::new());
    let fallback = Arc::new(MemorySink::new());
    let logger = Logger::builder("app")
        .failover(FailoverSink::new(primary.clone(), fallback.clone()))
        .validator(require_who())
        .build()
        .unwrap();

    logger
        .log_activity("anonymous access", json!({}))
        .expect("redirected entries report success");

    assert!(!primary.contents().contains("anonymous access"));
    assert!(fallback.contents().contains("anonymous access"));
    assert_eq!(logger.metrics().redirected(), 1);
}

#[test]
fn test_invalid_entry_without_failover_is_error() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::builder("app")
        .sink(sink.clone())
        .validator(require_who())
        .build()
        .unwrap();

    let err = logger.log_activity("anonymous access", json!({})).unwrap_err();

    match err {
        LoggerError::Validation(e) => assert_eq!(e.message(), "who is required"),
        other => panic!("unexpected error: {}", other),
    }
    assert!(sink.is_empty());
}

#[test]
fn test_required_fields_validator() {
    let primary = Arc::new(MemorySink::new());
    let fallback = Arc::new(MemorySink::new());
    let logger = Logger::builder("app")
        .failover(FailoverSink::new(primary.clone(), fallback.clone()))
        .validator(
            RequiredFields::new()
                .require(EntryField::Who)
                .require(EntryField::RemoteIp),
        )
        .build()
        .unwrap();

    logger.with_who("dave").log_activity("partial", json!({})).unwrap();
    logger
        .with_who("dave")
        .with_remote_ip("10.1.1.1")
        .log_activity("complete", json!({}))
        .unwrap();

    assert_eq!(primary.lines().len(), 1);
    assert!(primary.contents().contains("complete"));
    assert!(fallback.contents().contains("partial"));
}

#[test]
fn test_wire_format_uses_names() {
    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("app", sink.clone()).with_priority(Priority::Debug2);

    logger.log_debug("trace", DebugInfo::new()).unwrap();

    let line = sink.lines().remove(0);
    assert!(line.contains("\"Priority\":\"Debug2\""));
    assert!(line.contains("\"Type\":\"Debug\""));
    assert!(!line.contains("\"Priority\":1"));
    assert!(!line.contains("\"Type\":3"));
}

#[test]
fn test_activity_payload_is_open() {
    #[derive(serde::Serialize)]
    struct Login<'a> {
        username: &'a str,
        duration_ms: u64,
    }

    let sink = Arc::new(MemorySink::new());
    let logger = Logger::new("app", sink.clone());

    let data = ActivityInfo::from_serialize(&Login {
        username: "john",
        duration_ms: 120,
    })
    .unwrap();
    logger.log_activity("User logged in", data).unwrap();
    logger.log_activity("Ping", json!("pong")).unwrap();

    let records = parse_lines(&sink.contents());
    assert_eq!(records[0]["Data"], json!({"username": "john", "duration_ms": 120}));
    assert_eq!(records[1]["Data"], json!("pong"));
}

#[cfg(feature = "file")]
#[test]
fn test_file_sink_output() {
    use std::fs;
    use tempfile::TempDir;

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("audit.log");

    let file = Arc::new(FileSink::new(&log_file).expect("Failed to create sink"));
    let logger = Logger::with_failover("app", FailoverSink::new(file, Arc::new(ConsoleSink::stderr())));

    for i in 0..5 {
        logger
            .with_what_instance_id(format!("item-{}", i))
            .log_activity("processed", json!({"index": i}))
            .unwrap();
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let records = parse_lines(&content);
    assert_eq!(records.len(), 5);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record["WhatInstanceId"], json!(format!("item-{}", i)));
        assert_eq!(record["Data"]["index"], json!(i));
    }
}
