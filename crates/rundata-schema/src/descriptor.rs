//! Schema contract for the metadata record
//!
//! The `Metadata` message is declared once as a descriptor and registered in
//! a [`DescriptorPool`]. Text format decoding and encoding go through
//! [`DynamicMessage`], so field names, numbers and types come from the
//! descriptor rather than from hand-written code.
//!
//! ```text
//! syntax = "proto3";
//! package openconfig.testing;
//!
//! message Metadata {
//!   string uuid = 1;
//!   string plan_id = 2;
//!   string description = 3;
//! }
//! ```

use crate::error::SchemaError;
use crate::metadata::Metadata;
use once_cell::sync::OnceCell;
use prost_reflect::text_format::FormatOptions;
use prost_reflect::{DescriptorPool, DynamicMessage, MessageDescriptor, Value};
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto};

/// Repository path of the schema file, as written in textproto headers
pub const PROTO_FILE: &str = "github.com/openconfig/featureprofiles/proto/metadata.proto";

/// Message name, as written in textproto headers
pub const PROTO_MESSAGE: &str = "Metadata";

/// Protobuf package declaring the message
pub const PROTO_PACKAGE: &str = "openconfig.testing";

/// Field names in field-number order
pub const FIELD_UUID: &str = "uuid";
/// `plan_id` field name
pub const FIELD_PLAN_ID: &str = "plan_id";
/// `description` field name
pub const FIELD_DESCRIPTION: &str = "description";

static DESCRIPTOR: OnceCell<MessageDescriptor> = OnceCell::new();

fn string_field(name: &str, number: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(Type::String as i32),
        ..Default::default()
    }
}

fn file_descriptor() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some("proto/metadata.proto".to_string()),
        package: Some(PROTO_PACKAGE.to_string()),
        message_type: vec![DescriptorProto {
            name: Some(PROTO_MESSAGE.to_string()),
            field: vec![
                string_field(FIELD_UUID, 1),
                string_field(FIELD_PLAN_ID, 2),
                string_field(FIELD_DESCRIPTION, 3),
            ],
            ..Default::default()
        }],
        syntax: Some("proto3".to_string()),
        ..Default::default()
    }
}

fn build_descriptor() -> Result<MessageDescriptor, SchemaError> {
    let mut pool = DescriptorPool::new();
    pool.add_file_descriptor_proto(file_descriptor())
        .map_err(|e| SchemaError::Descriptor(e.to_string()))?;

    let full_name = format!("{PROTO_PACKAGE}.{PROTO_MESSAGE}");
    pool.get_message_by_name(&full_name)
        .ok_or(SchemaError::UnknownMessage(full_name))
}

/// Message descriptor for `openconfig.testing.Metadata`
///
/// Built on first use and shared afterwards.
///
/// # Errors
/// `SchemaError::Descriptor` if the descriptor fails to register
pub fn metadata_descriptor() -> Result<&'static MessageDescriptor, SchemaError> {
    DESCRIPTOR.get_or_try_init(build_descriptor)
}

fn string_value(message: &DynamicMessage, name: &str) -> String {
    message
        .get_field_by_name(name)
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

impl Metadata {
    /// Convert into a dynamic message of the schema
    ///
    /// Empty fields are left unset so the encoder omits them.
    ///
    /// # Errors
    /// `SchemaError::Descriptor` if the schema is unavailable,
    /// `SchemaError::SetField` if a field rejects its value
    pub fn to_dynamic(&self) -> Result<DynamicMessage, SchemaError> {
        let mut message = DynamicMessage::new(metadata_descriptor()?.clone());

        for (name, value) in [
            (FIELD_UUID, &self.uuid),
            (FIELD_PLAN_ID, &self.plan_id),
            (FIELD_DESCRIPTION, &self.description),
        ] {
            if value.is_empty() {
                continue;
            }
            message
                .try_set_field_by_name(name, Value::String(value.clone()))
                .map_err(|e| SchemaError::SetField {
                    field: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        Ok(message)
    }

    /// Read a record back out of a dynamic message of the schema
    #[must_use]
    pub fn from_dynamic(message: &DynamicMessage) -> Self {
        Self {
            plan_id: string_value(message, FIELD_PLAN_ID),
            description: string_value(message, FIELD_DESCRIPTION),
            uuid: string_value(message, FIELD_UUID),
        }
    }

    /// Decode a text format document
    ///
    /// Comments are allowed; fields outside the schema are rejected.
    /// No required-field validation is done here.
    ///
    /// # Errors
    /// `SchemaError::Decode` carrying the decoder message
    pub fn from_text_format(text: &str) -> Result<Self, SchemaError> {
        let descriptor = metadata_descriptor()?.clone();
        let message = DynamicMessage::parse_text_format(descriptor, text)
            .map_err(|e| SchemaError::Decode(e.to_string()))?;
        Ok(Self::from_dynamic(&message))
    }

    /// Encode as multi-line text format, one field per line
    ///
    /// Fields follow field-number order; empty fields are omitted. The result
    /// is newline-terminated unless it is empty.
    ///
    /// # Errors
    /// `SchemaError::Descriptor` or `SchemaError::SetField`
    pub fn to_text_format(&self) -> Result<String, SchemaError> {
        let message = self.to_dynamic()?;
        let options = FormatOptions::new().pretty(true);

        let mut text = message.to_text_format_with_options(&options);
        let trimmed_len = text.trim_end().len();
        text.truncate(trimmed_len);
        if !text.is_empty() {
            text.push('\n');
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn descriptor_has_schema_fields() {
        let descriptor = metadata_descriptor().unwrap();
        assert_eq!(descriptor.full_name(), "openconfig.testing.Metadata");

        let numbers: Vec<(String, u32)> = descriptor
            .fields()
            .map(|f| (f.name().to_string(), f.number()))
            .collect();
        assert_eq!(
            numbers,
            vec![
                ("uuid".to_string(), 1),
                ("plan_id".to_string(), 2),
                ("description".to_string(), 3),
            ]
        );
    }

    #[test]
    fn descriptor_is_shared() {
        let a = metadata_descriptor().unwrap();
        let b = metadata_descriptor().unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn dynamic_roundtrip() {
        let md = Metadata::new("XX-1.1", "Foo Test").with_uuid("u-1");
        let message = md.to_dynamic().unwrap();
        assert_eq!(Metadata::from_dynamic(&message), md);
    }

    #[test]
    fn empty_fields_are_unset() {
        let md = Metadata::new("XX-1.1", "Foo Test");
        let message = md.to_dynamic().unwrap();
        assert!(!message.has_field_by_name(FIELD_UUID));
        assert!(message.has_field_by_name(FIELD_PLAN_ID));
    }

    #[test]
    fn text_format_one_field_per_line() {
        let md = Metadata::new("XX-1.1", "Foo Functional Test");
        let text = md.to_text_format().unwrap();

        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        assert_eq!(
            lines,
            vec![
                "plan_id: \"XX-1.1\"",
                "description: \"Foo Functional Test\"",
            ]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn text_format_orders_by_field_number() {
        let md = Metadata::new("XX-1.1", "Foo").with_uuid("u-1");
        let text = md.to_text_format().unwrap();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("uuid:"));
    }

    #[test]
    fn empty_record_encodes_to_empty_text() {
        assert_eq!(Metadata::default().to_text_format().unwrap(), "");
    }

    #[test]
    fn decode_accepts_comments() {
        let text = "# a comment\nplan_id: \"XX-1.1\"\ndescription: \"Foo\"\n";
        let md = Metadata::from_text_format(text).unwrap();
        assert_eq!(md, Metadata::new("XX-1.1", "Foo"));
    }

    #[test]
    fn decode_rejects_unknown_fields() {
        let err = Metadata::from_text_format("testbed: \"dut\"\n").unwrap_err();
        assert!(matches!(err, SchemaError::Decode(_)));
    }

    #[test]
    fn decode_rejects_wrong_type() {
        let err = Metadata::from_text_format("plan_id: 12\n").unwrap_err();
        assert!(matches!(err, SchemaError::Decode(_)));
    }

    #[test]
    fn text_roundtrip_with_escapes() {
        let md = Metadata::new("XX-1.1", "Quote \" and backslash \\ and tab\t!").with_uuid("u-1");
        let text = md.to_text_format().unwrap();
        assert_eq!(Metadata::from_text_format(&text).unwrap(), md);
    }
}
