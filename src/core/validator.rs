//! Pluggable entry validation
//!
//! A [`Validator`] inspects an [`Entry`] before it reaches the primary sink.
//! Closures of the form `Fn(&Entry) -> Result<(), ValidationError>` are
//! validators too, and [`AcceptAll`] is the permissive default.

use super::entry::Entry;
use std::fmt;

/// Why a validator rejected an entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub trait Validator: Send + Sync {
    fn validate(&self, entry: &Entry) -> Result<(), ValidationError>;
}

impl<F> Validator for F
where
    F: Fn(&Entry) -> Result<(), ValidationError> + Send + Sync,
{
    fn validate(&self, entry: &Entry) -> Result<(), ValidationError> {
        self(entry)
    }
}

/// Accepts every entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _entry: &Entry) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A string field of an entry that can be required to be non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    App,
    System,
    Module,
    Who,
    Op,
    WhatClass,
    WhatInstanceId,
    RemoteIp,
    Message,
}

impl EntryField {
    fn value<'a>(&self, entry: &'a Entry) -> &'a str {
        match self {
            EntryField::App => &entry.app_name,
            EntryField::System => &entry.system,
            EntryField::Module => &entry.module,
            EntryField::Who => &entry.who,
            EntryField::Op => &entry.op,
            EntryField::WhatClass => &entry.what_class,
            EntryField::WhatInstanceId => &entry.what_instance_id,
            EntryField::RemoteIp => &entry.remote_ip,
            EntryField::Message => &entry.message,
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryField::App => "AppName",
            EntryField::System => "System",
            EntryField::Module => "Module",
            EntryField::Who => "Who",
            EntryField::Op => "Op",
            EntryField::WhatClass => "WhatClass",
            EntryField::WhatInstanceId => "WhatInstanceId",
            EntryField::RemoteIp => "RemoteIP",
            EntryField::Message => "Message",
        };
        f.write_str(name)
    }
}

/// Rejects entries where any of the listed fields is empty or whitespace.
#[derive(Debug, Clone, Default)]
pub struct RequiredFields {
    fields: Vec<EntryField>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn require(mut self, field: EntryField) -> Self {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }
}

impl Validator for RequiredFields {
    fn validate(&self, entry: &Entry) -> Result<(), ValidationError> {
        let missing: Vec<String> = self
            .fields
            .iter()
            .filter(|field| field.value(entry).trim().is_empty())
            .map(ToString::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(format!(
                "required field(s) empty: {}",
                missing.join(", ")
            )))
        }
    }
}
