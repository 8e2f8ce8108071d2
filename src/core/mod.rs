//! Core logger types and traits

pub mod caller;
pub mod context;
pub mod entry;
pub mod error;
pub mod host;
pub mod logger;
pub mod metrics;
pub mod payload;
pub mod priority;
pub mod sink;
pub mod validator;

pub use caller::CallerInfo;
pub use context::LoggerContext;
pub use entry::Entry;
pub use error::{LoggerError, Result};
pub use logger::{Logger, LoggerBuilder, DEFAULT_PRIORITY};
pub use metrics::LoggerMetrics;
pub use payload::{ActivityInfo, ChangeInfo, DebugInfo, Payload};
pub use priority::{EventKind, Priority, Status};
pub use sink::Sink;
pub use validator::{AcceptAll, EntryField, RequiredFields, ValidationError, Validator};
