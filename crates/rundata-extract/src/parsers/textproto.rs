//! metadata.textproto parser
//!
//! Reads the whole document and decodes it with the schema-aware text
//! format decoder from `rundata-schema`.

use crate::config::DEFAULT_MAX_INPUT_BYTES;
use crate::error::ParseError;
use crate::parsers::{MetadataParser, SourceKind};
use rundata_schema::Metadata;
use std::io::{BufRead, Read};
use tracing::debug;

/// Textproto parser
#[derive(Debug, Clone, Copy)]
pub struct TextProtoParser {
    max_input_bytes: u64,
}

impl Default for TextProtoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProtoParser {
    /// Create parser with the default size limit
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_INPUT_BYTES)
    }

    /// Create parser rejecting documents over `max_input_bytes`
    #[inline]
    #[must_use]
    pub fn with_limit(max_input_bytes: u64) -> Self {
        Self { max_input_bytes }
    }
}

impl MetadataParser for TextProtoParser {
    fn kind(&self) -> SourceKind {
        SourceKind::TextProto
    }

    fn parse(&self, reader: &mut dyn BufRead) -> Result<Metadata, ParseError> {
        let mut bytes = Vec::new();
        // One extra byte tells "exactly at the limit" from "over it"
        reader
            .take(self.max_input_bytes.saturating_add(1))
            .read_to_end(&mut bytes)?;

        let size = bytes.len() as u64;
        if size > self.max_input_bytes {
            return Err(ParseError::InputTooLarge {
                size,
                max: self.max_input_bytes,
            });
        }

        let text = String::from_utf8(bytes)
            .map_err(|e| ParseError::Decode(format!("invalid UTF-8: {e}")))?;

        let md = Metadata::from_text_format(&text)?;
        md.validate()?;
        debug!(plan_id = %md.plan_id, bytes = size, "decoded textproto");
        Ok(md)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rundata_schema::RequiredField;

    const DOCUMENT: &str = r#"# proto-file: github.com/openconfig/featureprofiles/proto/metadata.proto
# proto-message: Metadata

uuid: "123e4567-e89b-42d3-a456-426614174000"
plan_id: "XX-1.1"
description: "Foo Functional Test"
"#;

    #[test]
    fn textproto_parser_valid() {
        let md = TextProtoParser::new().parse_str(DOCUMENT).unwrap();
        assert_eq!(
            md,
            Metadata::new("XX-1.1", "Foo Functional Test")
                .with_uuid("123e4567-e89b-42d3-a456-426614174000")
        );
    }

    #[test]
    fn textproto_field_order_is_free() {
        let md = TextProtoParser::new()
            .parse_str("description: \"Foo\" plan_id: \"XX-1.1\"")
            .unwrap();
        assert_eq!(md, Metadata::new("XX-1.1", "Foo"));
    }

    #[test]
    fn textproto_unknown_field() {
        let err = TextProtoParser::new()
            .parse_str("plan_id: \"XX-1.1\"\ndescription: \"Foo\"\ntestbed: TESTBED_DUT\n")
            .unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)), "{err:?}");
    }

    #[test]
    fn textproto_syntax_error() {
        let err = TextProtoParser::new()
            .parse_str("plan_id: \"XX-1.1")
            .unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)));
    }

    #[test]
    fn textproto_missing_description() {
        let err = TextProtoParser::new()
            .parse_str("plan_id: \"XX-1.1\"\n")
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingField(RequiredField::Description)
        ));
    }

    #[test]
    fn textproto_invalid_utf8() {
        let mut bytes: &[u8] = b"plan_id: \"\xff\"\n";
        let err = TextProtoParser::new().parse(&mut bytes).unwrap_err();
        assert!(matches!(err, ParseError::Decode(_)));
    }

    #[test]
    fn textproto_size_limit() {
        let parser = TextProtoParser::with_limit(16);
        let err = parser.parse_str(DOCUMENT).unwrap_err();
        assert!(matches!(err, ParseError::InputTooLarge { max: 16, .. }));

        let exact = "plan_id: \"A\" description: \"B\"";
        let parser = TextProtoParser::with_limit(exact.len() as u64);
        assert!(parser.parse_str(exact).is_ok());
    }
}
