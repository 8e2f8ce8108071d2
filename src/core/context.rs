//! Ambient context attached to every entry a logger produces

use super::priority::Status;

/// Immutable snapshot of the per-logger fields copied into each entry.
///
/// The `with_*` methods consume the snapshot and return it with exactly one
/// field replaced. Loggers clone their snapshot before deriving, so a derived
/// logger never shares mutable state with its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerContext {
    app_name: String,
    system: String,
    module: String,
    who: String,
    op: String,
    what_class: String,
    what_instance_id: String,
    status: Status,
    remote_ip: String,
}

impl LoggerContext {
    pub fn new(app_name: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            system: system.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    #[must_use]
    pub fn with_who(mut self, who: impl Into<String>) -> Self {
        self.who = who.into();
        self
    }

    #[must_use]
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = op.into();
        self
    }

    #[must_use]
    pub fn with_what_class(mut self, what_class: impl Into<String>) -> Self {
        self.what_class = what_class.into();
        self
    }

    #[must_use]
    pub fn with_what_instance_id(mut self, what_instance_id: impl Into<String>) -> Self {
        self.what_instance_id = what_instance_id.into();
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_remote_ip(mut self, remote_ip: impl Into<String>) -> Self {
        self.remote_ip = remote_ip.into();
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn who(&self) -> &str {
        &self.who
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn what_class(&self) -> &str {
        &self.what_class
    }

    pub fn what_instance_id(&self) -> &str {
        &self.what_instance_id
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn remote_ip(&self) -> &str {
        &self.remote_ip
    }
}
