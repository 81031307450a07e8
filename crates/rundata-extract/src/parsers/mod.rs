//! Metadata parsers for the supported source formats
//!
//! Each parser turns one kind of source into a [`Metadata`] record:
//! - README markdown heading
//! - Go test source with a `func init()` rundata block
//! - metadata textproto via the schema-aware text format decoder
//!
//! The caller picks the [`SourceKind`]; there is no format sniffing.

use crate::config::ExtractConfig;
use crate::error::{ConfigError, ParseError};
use rundata_schema::Metadata;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

mod code;
mod markdown;
mod quote;
mod textproto;

pub use code::{InitBlockParser, INIT_BLOCK_END, INIT_BLOCK_START};
pub use markdown::MarkdownParser;
pub use quote::{unquote, UnquoteError};
pub use textproto::TextProtoParser;

/// Parser trait for producing a metadata record from a stream
pub trait MetadataParser: Send + Sync {
    /// Source kind handled by this parser
    fn kind(&self) -> SourceKind;

    /// Parse a record from the reader
    ///
    /// Reads only as much of the stream as the format requires.
    fn parse(&self, reader: &mut dyn BufRead) -> Result<Metadata, ParseError>;

    /// Parse a record from an in-memory string
    fn parse_str(&self, content: &str) -> Result<Metadata, ParseError> {
        self.parse(&mut content.as_bytes())
    }
}

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// README markdown, first-line heading
    Markdown,
    /// Go source with a `func init()` block
    SourceInit,
    /// metadata textproto
    TextProto,
}

impl SourceKind {
    /// All kinds
    pub const ALL: [SourceKind; 3] = [
        SourceKind::Markdown,
        SourceKind::SourceInit,
        SourceKind::TextProto,
    ];

    /// Stable name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Markdown => "markdown",
            SourceKind::SourceInit => "source-init",
            SourceKind::TextProto => "textproto",
        }
    }

    /// Build the parser for this kind
    #[must_use]
    pub fn parser(&self, config: &ExtractConfig) -> Box<dyn MetadataParser> {
        match self {
            SourceKind::Markdown => Box::new(MarkdownParser::new()),
            SourceKind::SourceInit => {
                Box::new(InitBlockParser::new().strict(config.strict_init_block))
            }
            SourceKind::TextProto => Box::new(TextProtoParser::with_limit(config.max_input_bytes)),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ConfigError::UnknownSourceKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_roundtrip() {
        for kind in SourceKind::ALL {
            assert_eq!(kind.to_string().parse::<SourceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind() {
        let err = "yaml".parse::<SourceKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown source kind: 'yaml'");
    }

    #[test]
    fn parser_matches_kind() {
        let config = ExtractConfig::default();
        for kind in SourceKind::ALL {
            assert_eq!(kind.parser(&config).kind(), kind);
        }
    }

    #[test]
    fn parse_str_default_method() {
        let parser = SourceKind::Markdown.parser(&ExtractConfig::default());
        let md = parser.parse_str("# XX-1.1: Foo\n").unwrap();
        assert_eq!(md.plan_id, "XX-1.1");
    }
}
