//! Main logger implementation

use super::{
    caller::{runtime_version, CallerInfo},
    context::LoggerContext,
    entry::Entry,
    error::{LoggerError, Result},
    host,
    metrics::LoggerMetrics,
    payload::{ActivityInfo, ChangeInfo, DebugInfo, Payload},
    priority::{Priority, Status},
    sink::Sink,
    validator::{AcceptAll, Validator},
};
use crate::sinks::FailoverSink;
use parking_lot::Mutex;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Threshold of a newly constructed logger.
pub const DEFAULT_PRIORITY: Priority = Priority::Info;

/// Structured logger with an immutable context snapshot.
///
/// The `with_*` methods return a new logger that shares the sink, validator
/// and metrics with its parent but owns a separately copied context, so
/// later derivations never affect each other.
///
/// [`Logger::change_priority`] is the one exception: it changes the
/// threshold of this instance in place, affecting every later emission made
/// through it.
///
/// A logger may be shared between threads; emissions through one instance
/// are serialized and reach the sink in lock-acquisition order. The
/// recommended pattern is still one logger (or derived clone) per unit of
/// work.
///
/// # Example
///
/// ```
/// use logharbour::prelude::*;
/// use std::sync::Arc;
///
/// let primary = Arc::new(MemorySink::new());
/// let fallback = Arc::new(MemorySink::new());
/// let logger = Logger::with_failover("billing", FailoverSink::new(primary.clone(), fallback));
///
/// let request_logger = logger.with_who("alice").with_op("checkout");
/// request_logger
///     .log_activity("cart submitted", serde_json::json!({"items": 3}))
///     .unwrap();
///
/// assert!(primary.contents().contains("\"Who\":\"alice\""));
/// ```
pub struct Logger {
    context: LoggerContext,
    /// Rank of the threshold; only stored while `lock` is held
    priority: AtomicU8,
    validator: Arc<dyn Validator>,
    sink: Arc<dyn Sink>,
    metrics: Arc<LoggerMetrics>,
    lock: Mutex<()>,
}

impl Logger {
    /// Create a logger that accepts every entry and writes to `sink`.
    ///
    /// Prefer [`Logger::with_failover`], which keeps invalid entries on the
    /// fallback branch instead of returning them as errors.
    pub fn new(app_name: impl Into<String>, sink: Arc<dyn Sink>) -> Self {
        Self::from_parts(
            LoggerContext::new(app_name, host::system_name()),
            DEFAULT_PRIORITY,
            Arc::new(AcceptAll),
            sink,
        )
    }

    /// Create a logger writing to a failover sink.
    pub fn with_failover(app_name: impl Into<String>, sink: FailoverSink) -> Self {
        Self::new(app_name, Arc::new(sink))
    }

    /// Create a builder for Logger
    #[must_use]
    pub fn builder(app_name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(app_name)
    }

    fn from_parts(
        context: LoggerContext,
        priority: Priority,
        validator: Arc<dyn Validator>,
        sink: Arc<dyn Sink>,
    ) -> Self {
        Self {
            context,
            priority: AtomicU8::new(priority.rank()),
            validator,
            sink,
            metrics: Arc::new(LoggerMetrics::new()),
            lock: Mutex::new(()),
        }
    }

    fn derive(&self, context: LoggerContext, priority: Priority) -> Self {
        Self {
            context,
            priority: AtomicU8::new(priority.rank()),
            validator: Arc::clone(&self.validator),
            sink: Arc::clone(&self.sink),
            metrics: Arc::clone(&self.metrics),
            lock: Mutex::new(()),
        }
    }

    fn derive_context(&self, context: LoggerContext) -> Self {
        self.derive(context, self.priority())
    }

    #[must_use]
    pub fn with_who(&self, who: impl Into<String>) -> Self {
        self.derive_context(self.context.clone().with_who(who))
    }

    #[must_use]
    pub fn with_module(&self, module: impl Into<String>) -> Self {
        self.derive_context(self.context.clone().with_module(module))
    }

    #[must_use]
    pub fn with_op(&self, op: impl Into<String>) -> Self {
        self.derive_context(self.context.clone().with_op(op))
    }

    #[must_use]
    pub fn with_what_class(&self, what_class: impl Into<String>) -> Self {
        self.derive_context(self.context.clone().with_what_class(what_class))
    }

    #[must_use]
    pub fn with_what_instance_id(&self, what_instance_id: impl Into<String>) -> Self {
        self.derive_context(self.context.clone().with_what_instance_id(what_instance_id))
    }

    #[must_use]
    pub fn with_status(&self, status: Status) -> Self {
        self.derive_context(self.context.clone().with_status(status))
    }

    #[must_use]
    pub fn with_remote_ip(&self, remote_ip: impl Into<String>) -> Self {
        self.derive_context(self.context.clone().with_remote_ip(remote_ip))
    }

    /// A new logger with a different threshold. This logger is unchanged.
    #[must_use]
    pub fn with_priority(&self, priority: Priority) -> Self {
        self.derive(self.context.clone(), priority)
    }

    /// Change the threshold of this logger in place.
    ///
    /// Unlike the `with_*` methods this mutates shared state: every later
    /// emission through this instance (from any thread) sees the new
    /// threshold. Loggers derived earlier keep their own copy.
    pub fn change_priority(&self, priority: Priority) {
        let _guard = self.lock.lock();
        let previous = self.priority();
        self.priority.store(priority.rank(), Ordering::Release);
        tracing::debug!(
            app = self.context.app_name(),
            from = %previous,
            to = %priority,
            "log priority changed"
        );
    }

    /// Current threshold
    pub fn priority(&self) -> Priority {
        Priority::from_rank(self.priority.load(Ordering::Acquire)).unwrap_or(DEFAULT_PRIORITY)
    }

    pub fn context(&self) -> &LoggerContext {
        &self.context
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Emission counters, shared with every logger derived from the same root
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Log a data change at this logger's priority.
    pub fn log_data_change(&self, message: impl Into<String>, data: ChangeInfo) -> Result<()> {
        self.log(self.entry(None, message, data.into()))
    }

    /// Log a data change at an explicit priority.
    pub fn log_data_change_at(
        &self,
        priority: Priority,
        message: impl Into<String>,
        data: ChangeInfo,
    ) -> Result<()> {
        self.log(self.entry(Some(priority), message, data.into()))
    }

    /// Log an activity at this logger's priority.
    pub fn log_activity(
        &self,
        message: impl Into<String>,
        data: impl Into<ActivityInfo>,
    ) -> Result<()> {
        self.log(self.entry(None, message, Payload::Activity(data.into())))
    }

    pub fn log_activity_at(
        &self,
        priority: Priority,
        message: impl Into<String>,
        data: impl Into<ActivityInfo>,
    ) -> Result<()> {
        self.log(self.entry(Some(priority), message, Payload::Activity(data.into())))
    }

    /// Log debug information at this logger's priority.
    ///
    /// Process id, runtime, file, line, function and stack trace are filled
    /// in from the call site; only `data.variables` is kept from the caller.
    #[track_caller]
    pub fn log_debug(&self, message: impl Into<String>, data: DebugInfo) -> Result<()> {
        self.emit_debug(None, message.into(), data, Location::caller())
    }

    #[track_caller]
    pub fn log_debug_at(
        &self,
        priority: Priority,
        message: impl Into<String>,
        data: DebugInfo,
    ) -> Result<()> {
        self.emit_debug(Some(priority), message.into(), data, Location::caller())
    }

    fn emit_debug(
        &self,
        priority: Option<Priority>,
        message: String,
        mut data: DebugInfo,
        location: &Location<'_>,
    ) -> Result<()> {
        let caller = CallerInfo::capture(location);
        data.pid = std::process::id();
        data.runtime = runtime_version();
        data.file_name = caller.file;
        data.line_number = caller.line;
        data.function_name = caller.function;
        data.stack_trace = caller.stack_trace;

        self.log(self.entry(priority, message, data.into()))
    }

    fn entry(&self, priority: Option<Priority>, message: impl Into<String>, data: Payload) -> Entry {
        let priority = priority.unwrap_or_else(|| self.priority());
        Entry::from_context(&self.context, priority, message, data)
    }

    /// Run an entry through the emission pipeline.
    ///
    /// In order: the application name is re-stamped from this logger, entries
    /// below the threshold are dropped with `Ok(())`, the validator runs, and
    /// the encoded record is written to the sink.
    ///
    /// A rejected entry goes to the fallback branch when the sink is a
    /// [`FailoverSink`] (reported as success) and is returned as
    /// [`LoggerError::Validation`] otherwise. Serialization and write errors
    /// are returned unchanged.
    pub fn log(&self, mut entry: Entry) -> Result<()> {
        let _guard = self.lock.lock();

        entry.app_name = self.context.app_name().to_string();

        let threshold = self.priority();
        if entry.priority < threshold {
            self.metrics.record_suppressed();
            tracing::trace!(
                priority = %entry.priority,
                threshold = %threshold,
                "log entry below threshold"
            );
            return Ok(());
        }

        if let Err(rejection) = self.validator.validate(&entry) {
            return match self.sink.as_failover() {
                Some(failover) => self.redirect(failover, &entry, &rejection.to_string()),
                None => {
                    self.metrics.record_rejected();
                    Err(LoggerError::Validation(rejection))
                }
            };
        }

        let line = self.encode(&entry)?;
        match self.sink.write(&line) {
            Ok(_) => {
                self.metrics.record_written();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed();
                Err(e.into())
            }
        }
    }

    /// Write a rejected entry to the fallback branch only.
    fn redirect(&self, failover: &FailoverSink, entry: &Entry, reason: &str) -> Result<()> {
        tracing::debug!(
            app = %entry.app_name,
            reason,
            "log entry failed validation, writing to fallback sink"
        );

        let line = self.encode(entry)?;
        match failover.write_fallback(&line) {
            Ok(_) => {
                self.metrics.record_redirected();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_failed();
                Err(e.into())
            }
        }
    }

    fn encode(&self, entry: &Entry) -> Result<Vec<u8>> {
        entry.to_json_line().inspect_err(|_| {
            self.metrics.record_failed();
        })
    }

    /// Flush the underlying sink
    pub fn flush(&self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}

impl Clone for Logger {
    /// Same as deriving with no field changed
    fn clone(&self) -> Self {
        self.derive_context(self.context.clone())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .field("priority", &self.priority())
            .field("sink", &self.sink.name())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use logharbour::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Logger::builder("inventory")
///     .sink(Arc::new(MemorySink::new()))
///     .priority(Priority::Debug0)
///     .validator(RequiredFields::new().require(EntryField::Who))
///     .module("stock")
///     .build()
///     .unwrap();
///
/// assert_eq!(logger.priority(), Priority::Debug0);
/// assert_eq!(logger.context().module(), "stock");
/// ```
pub struct LoggerBuilder {
    app_name: String,
    system: Option<String>,
    module: Option<String>,
    priority: Priority,
    validator: Arc<dyn Validator>,
    sink: Option<Arc<dyn Sink>>,
}

impl LoggerBuilder {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            system: None,
            module: None,
            priority: DEFAULT_PRIORITY,
            validator: Arc::new(AcceptAll),
            sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn failover(self, sink: FailoverSink) -> Self {
        self.sink(Arc::new(sink))
    }

    #[must_use = "builder methods return a new value"]
    pub fn validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Set the initial threshold
    #[must_use = "builder methods return a new value"]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Override the host name lookup
    #[must_use = "builder methods return a new value"]
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        let sink = self
            .sink
            .ok_or_else(|| LoggerError::config("LoggerBuilder", "no sink configured"))?;

        let system = self.system.unwrap_or_else(host::system_name);
        let mut context = LoggerContext::new(self.app_name, system);
        if let Some(module) = self.module {
            context = context.with_module(module);
        }

        Ok(Logger::from_parts(context, self.priority, self.validator, sink))
    }
}
