//! Log entry structure and its wire encoding

use super::context::LoggerContext;
use super::error::Result;
use super::payload::Payload;
use super::priority::{EventKind, Priority, Status};
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One log event, ready for serialization.
///
/// Entries are built fresh for every emission. The logger only lends them out
/// by shared reference (to the validator) and never alters one after it has
/// been handed to a sink.
///
/// Field names are part of the wire format and must not change. There is no
/// stored kind: the `Type` field is always derived from `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub app_name: String,
    pub system: String,
    pub module: String,
    pub priority: Priority,
    pub when: DateTime<Utc>,
    pub who: String,
    pub op: String,
    pub what_class: String,
    pub what_instance_id: String,
    pub status: Status,
    pub remote_ip: String,
    pub message: String,
    pub data: Payload,
}

impl Entry {
    /// Build an entry from a context snapshot, stamped with the current UTC time.
    pub fn from_context(
        context: &LoggerContext,
        priority: Priority,
        message: impl Into<String>,
        data: Payload,
    ) -> Self {
        Self {
            app_name: context.app_name().to_string(),
            system: context.system().to_string(),
            module: context.module().to_string(),
            priority,
            when: Utc::now(),
            who: context.who().to_string(),
            op: context.op().to_string(),
            what_class: context.what_class().to_string(),
            what_instance_id: context.what_instance_id().to_string(),
            status: context.status(),
            remote_ip: context.remote_ip().to_string(),
            message: message.into(),
            data,
        }
    }

    /// Event kind, determined by the payload.
    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Encode as a single JSON object followed by `\n`.
    ///
    /// Serialization either succeeds completely or produces nothing.
    pub fn to_json_line(&self) -> Result<Vec<u8>> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Entry", 14)?;
        state.serialize_field("AppName", &self.app_name)?;
        state.serialize_field("System", &self.system)?;
        state.serialize_field("Module", &self.module)?;
        state.serialize_field("Type", &self.kind())?;
        state.serialize_field("Priority", &self.priority)?;
        state.serialize_field("When", &self.when)?;
        state.serialize_field("Who", &self.who)?;
        state.serialize_field("Op", &self.op)?;
        state.serialize_field("WhatClass", &self.what_class)?;
        state.serialize_field("WhatInstanceId", &self.what_instance_id)?;
        state.serialize_field("Status", &self.status)?;
        state.serialize_field("RemoteIP", &self.remote_ip)?;
        state.serialize_field("Message", &self.message)?;
        state.serialize_field("Data", &self.data)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payload::{ActivityInfo, ChangeInfo, DebugInfo};
    use serde_json::{json, Value};

    fn context() -> LoggerContext {
        LoggerContext::new("TestApp", "host-1")
            .with_module("billing")
            .with_who("alice")
            .with_op("update")
            .with_what_class("Invoice")
            .with_what_instance_id("inv-42")
            .with_status(Status::Failure)
            .with_remote_ip("10.0.0.7")
    }

    fn parse(entry: &Entry) -> Value {
        let line = entry.to_json_line().unwrap();
        assert_eq!(line.last(), Some(&b'\n'));
        assert_eq!(line.iter().filter(|b| **b == b'\n').count(), 1);
        serde_json::from_slice(&line).unwrap()
    }

    #[test]
    fn test_debug2_and_debug_rendered_as_names() {
        let entry = Entry::from_context(
            &context(),
            Priority::Debug2,
            "details",
            DebugInfo::new().into(),
        );
        let record = parse(&entry);

        assert_eq!(record["Priority"], json!("Debug2"));
        assert_eq!(record["Type"], json!("Debug"));
    }

    #[test]
    fn test_all_fields_present() {
        let change = ChangeInfo::new("Invoice", "Update").with_change("total", 120);
        let entry = Entry::from_context(&context(), Priority::Info, "changed", change.into());
        let record = parse(&entry);

        assert_eq!(record["AppName"], json!("TestApp"));
        assert_eq!(record["System"], json!("host-1"));
        assert_eq!(record["Module"], json!("billing"));
        assert_eq!(record["Type"], json!("Change"));
        assert_eq!(record["Who"], json!("alice"));
        assert_eq!(record["Op"], json!("update"));
        assert_eq!(record["WhatClass"], json!("Invoice"));
        assert_eq!(record["WhatInstanceId"], json!("inv-42"));
        assert_eq!(record["Status"], json!(1));
        assert_eq!(record["RemoteIP"], json!("10.0.0.7"));
        assert_eq!(record["Message"], json!("changed"));
        assert_eq!(record["Data"]["entity"], json!("Invoice"));
        assert_eq!(record["Data"]["changes"]["total"], json!(120));
        assert!(record["When"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_multiline_message_stays_one_record() {
        let entry = Entry::from_context(
            &context(),
            Priority::Warn,
            "line one\nline two",
            ActivityInfo::new(json!({"endpoint": "/login"})).into(),
        );
        let record = parse(&entry);

        assert_eq!(record["Message"], json!("line one\nline two"));
        assert_eq!(record["Data"], json!({"endpoint": "/login"}));
    }

    #[test]
    fn test_type_follows_replaced_payload() {
        let mut entry = Entry::from_context(
            &context(),
            Priority::Info,
            "swapped",
            ChangeInfo::new("User", "Update").into(),
        );
        entry.data = DebugInfo::new().into();

        assert_eq!(entry.kind(), EventKind::Debug);
        assert_eq!(parse(&entry)["Type"], json!("Debug"));
    }
}
