//! # Logharbour
//!
//! Structured, leveled logging for audit-style event streams.
//!
//! ## Features
//!
//! - **Typed events**: data changes, activities and debug entries, each with its own payload
//! - **Immutable context**: `with_*` derivations never disturb the parent logger
//! - **Priority filter**: a hard threshold from `Debug2` up to `Sec`
//! - **Validation with failover**: invalid entries land on a fallback sink instead of being lost
//! - **JSON lines**: one self-contained record per line, written synchronously

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    pub use crate::sinks::{ConsoleSink, FailoverSink, MemorySink, WriterSink};
    pub use crate::core::{
        AcceptAll, ActivityInfo, ChangeInfo, DebugInfo, Entry, EntryField, EventKind, Logger,
        LoggerBuilder, LoggerContext, LoggerError, LoggerMetrics, Payload, Priority,
        RequiredFields, Result, Sink, Status, ValidationError, Validator, DEFAULT_PRIORITY,
    };
}

#[cfg(feature = "file")]
pub use self::sinks::FileSink;
pub use self::sinks::{ConsoleSink, FailoverSink, MemorySink, WriterSink};
pub use self::core::{
    AcceptAll, ActivityInfo, ChangeInfo, DebugInfo, Entry, EntryField, EventKind, Logger,
    LoggerBuilder, LoggerContext, LoggerError, LoggerMetrics, Payload, Priority, RequiredFields,
    Result, Sink, Status, ValidationError, Validator, DEFAULT_PRIORITY,
};
