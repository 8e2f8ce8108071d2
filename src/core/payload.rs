//! Kind-specific payloads carried in an entry's `Data` field

use super::error::Result;
use super::priority::EventKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A data change: which entity, what operation, and the new field values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeInfo {
    pub entity: String,
    pub operation: String,
    pub changes: Map<String, Value>,
}

impl ChangeInfo {
    pub fn new(entity: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            operation: operation.into(),
            changes: Map::new(),
        }
    }

    /// Record the new value of a field. A repeated field keeps the last value.
    #[must_use]
    pub fn with_change<K, V>(mut self, field: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.changes.insert(field.into(), value.into());
        self
    }
}

/// Caller-defined activity data. The library imposes no shape on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityInfo(pub Value);

impl ActivityInfo {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Convert any serializable value into activity data.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self(serde_json::to_value(value)?))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for ActivityInfo {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Diagnostic data for debug entries.
///
/// Only `variables` is supplied by the caller; the logger fills in the rest
/// when the entry is emitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub pid: u32,
    pub runtime: String,
    pub file_name: String,
    pub line_number: u32,
    pub function_name: String,
    pub stack_trace: String,
    pub variables: Map<String, Value>,
}

impl DebugInfo {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_variable<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.variables.insert(name.into(), value.into());
        self
    }
}

/// The payload of an entry. The variant always agrees with the entry's kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Change(ChangeInfo),
    Activity(ActivityInfo),
    Debug(DebugInfo),
}

impl Payload {
    pub fn kind(&self) -> EventKind {
        match self {
            Payload::Change(_) => EventKind::Change,
            Payload::Activity(_) => EventKind::Activity,
            Payload::Debug(_) => EventKind::Debug,
        }
    }
}

impl From<ChangeInfo> for Payload {
    fn from(info: ChangeInfo) -> Self {
        Payload::Change(info)
    }
}

impl From<ActivityInfo> for Payload {
    fn from(info: ActivityInfo) -> Self {
        Payload::Activity(info)
    }
}

impl From<DebugInfo> for Payload {
    fn from(info: DebugInfo) -> Self {
        Payload::Debug(info)
    }
}
