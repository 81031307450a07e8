//! Go source rundata parser
//!
//! Recognizes the first `func init() {` block and the string assignments
//! inside it:
//!
//! ```go
//! func init() {
//!   rundata.TestPlanID = "XX-1.1"
//!   rundata.TestDescription = "Foo Functional Test"
//!   rundata.TestUUID = "..."
//! }
//! ```
//!
//! This is line-pattern classification, not Go parsing. Lines that are
//! neither the terminator nor an assignment are skipped.

use crate::error::ParseError;
use crate::parsers::quote::unquote;
use crate::parsers::{MetadataParser, SourceKind};
use once_cell::sync::Lazy;
use regex::Regex;
use rundata_schema::Metadata;
use std::io::BufRead;
use tracing::{debug, trace};

/// Line opening the init block
pub const INIT_BLOCK_START: &str = "func init() {";

/// Line closing the init block
pub const INIT_BLOCK_END: &str = "}";

/// `  rundata.<Field> = "<value>`; the value is validated by unquoting
static ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s+rundata\.([A-Za-z0-9_]+) = (".*)$"#).unwrap());

/// Anything that reads like an attempted rundata assignment
static ASSIGNMENT_LIKE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rundata\.[A-Za-z0-9_]+\s*=").unwrap());

/// Scanner state
#[derive(Debug)]
enum InitState {
    ScanningForBlockStart,
    InsideBlock { start_line: usize, metadata: Metadata },
    Terminated(Metadata),
}

/// Classification of a line inside the block
#[derive(Debug, PartialEq, Eq)]
enum BlockLine<'a> {
    Terminator,
    Assignment { field: &'a str, literal: &'a str },
    Other,
}

fn classify(line: &str) -> BlockLine<'_> {
    if line == INIT_BLOCK_END {
        return BlockLine::Terminator;
    }
    match ASSIGNMENT_RE.captures(line) {
        Some(caps) => match (caps.get(1), caps.get(2)) {
            (Some(field), Some(literal)) => BlockLine::Assignment {
                field: field.as_str(),
                literal: literal.as_str(),
            },
            _ => BlockLine::Other,
        },
        None => BlockLine::Other,
    }
}

/// Init block parser
#[derive(Debug, Clone, Copy, Default)]
pub struct InitBlockParser {
    strict: bool,
}

impl InitBlockParser {
    /// Create lenient parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Reject assignment-like lines that do not match the assignment shape
    #[inline]
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Whether strict mode is on
    #[inline]
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn step(
        &self,
        state: InitState,
        line: &str,
        line_number: usize,
    ) -> Result<InitState, ParseError> {
        match state {
            InitState::ScanningForBlockStart if line == INIT_BLOCK_START => {
                trace!(line_number, "found init block");
                Ok(InitState::InsideBlock {
                    start_line: line_number,
                    metadata: Metadata::default(),
                })
            }
            InitState::ScanningForBlockStart => Ok(InitState::ScanningForBlockStart),
            InitState::InsideBlock {
                start_line,
                mut metadata,
            } => match classify(line) {
                BlockLine::Terminator => {
                    trace!(start_line, end_line = line_number, "init block terminated");
                    Ok(InitState::Terminated(metadata))
                }
                BlockLine::Assignment { field, literal } => {
                    let value = unquote(literal)
                        .map_err(|e| ParseError::malformed_value(line_number, line, e))?;
                    Self::assign(&mut metadata, field, value);
                    Ok(InitState::InsideBlock {
                        start_line,
                        metadata,
                    })
                }
                BlockLine::Other => {
                    if self.strict && ASSIGNMENT_LIKE_RE.is_match(line) {
                        return Err(ParseError::MalformedAssignment {
                            line_number,
                            line: line.to_string(),
                        });
                    }
                    Ok(InitState::InsideBlock {
                        start_line,
                        metadata,
                    })
                }
            },
            terminated @ InitState::Terminated(_) => Ok(terminated),
        }
    }

    fn assign(metadata: &mut Metadata, field: &str, value: String) {
        match field {
            "TestPlanID" => metadata.plan_id = value,
            "TestDescription" => metadata.description = value,
            "TestUUID" => metadata.uuid = value,
            other => debug!(field = other, "ignoring unrecognized rundata field"),
        }
    }
}

impl MetadataParser for InitBlockParser {
    fn kind(&self) -> SourceKind {
        SourceKind::SourceInit
    }

    fn parse(&self, reader: &mut dyn BufRead) -> Result<Metadata, ParseError> {
        let mut state = InitState::ScanningForBlockStart;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            state = self.step(state, &line, index + 1)?;
            if matches!(state, InitState::Terminated(_)) {
                break;
            }
        }

        match state {
            InitState::ScanningForBlockStart => Err(ParseError::MissingInitBlock),
            InitState::InsideBlock { start_line, .. } => {
                Err(ParseError::UnterminatedInitBlock { start_line })
            }
            InitState::Terminated(metadata) => {
                metadata.validate()?;
                debug!(plan_id = %metadata.plan_id, "parsed init block");
                Ok(metadata)
            }
        }
    }
}
