//! README heading parser
//!
//! Only the first line is read. It must look like
//! `# XX-1.1: Foo Functional Test`.

use crate::error::ParseError;
use crate::parsers::{MetadataParser, SourceKind};
use once_cell::sync::Lazy;
use regex::Regex;
use rundata_schema::Metadata;
use std::io::BufRead;
use tracing::debug;

/// Everything between the first `#` and the next `:`, then the rest of the line
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#(.*?):(.*)").unwrap());

/// Markdown heading parser
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    /// Create new markdown parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse a single heading line
    ///
    /// # Errors
    /// `ParseError::UnparsableHeading` if the line lacks `#` then `:` or either
    /// capture is blank
    pub fn parse_heading(&self, line: &str) -> Result<Metadata, ParseError> {
        let unparsable = || ParseError::UnparsableHeading {
            line: line.to_string(),
        };

        let caps = HEADING_RE.captures(line).ok_or_else(unparsable)?;
        let md = Metadata::new(&caps[1], &caps[2]);
        if md.validate().is_err() {
            return Err(unparsable());
        }
        Ok(md)
    }
}

impl MetadataParser for MarkdownParser {
    fn kind(&self) -> SourceKind {
        SourceKind::Markdown
    }

    fn parse(&self, reader: &mut dyn BufRead) -> Result<Metadata, ParseError> {
        let line = match reader.lines().next() {
            Some(Ok(line)) => line,
            Some(Err(source)) => {
                return Err(ParseError::MissingHeading {
                    source: Some(source),
                })
            }
            None => return Err(ParseError::MissingHeading { source: None }),
        };

        let md = self.parse_heading(&line)?;
        debug!(plan_id = %md.plan_id, "parsed markdown heading");
        Ok(md)
    }
}
