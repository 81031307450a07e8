//! Error types for extraction and serialization
//!
//! Provides error handling for:
//! - Parse operations (source → Metadata)
//! - Serialize operations (Metadata → textproto)
//! - Configuration loading

use rundata_schema::{RequiredField, SchemaError};
use std::path::PathBuf;

/// Errors during metadata extraction (ingress)
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Markdown stream produced no first line
    #[error("missing markdown heading")]
    MissingHeading {
        #[source]
        source: Option<std::io::Error>,
    },

    /// First markdown line is not `# <plan id>: <description>`
    #[error("cannot parse markdown heading: {line}")]
    UnparsableHeading { line: String },

    /// No `func init() {` line in the source
    #[error("missing func init()")]
    MissingInitBlock,

    /// Stream ended inside the init block
    #[error("func init() starting at line {start_line} was not terminated")]
    UnterminatedInitBlock { start_line: usize },

    /// Quoted value of a rundata assignment could not be unquoted
    #[error("cannot parse rundata line {line_number}: {line}: {reason}")]
    MalformedValue {
        line_number: usize,
        line: String,
        reason: String,
    },

    /// Line mentions a rundata assignment but does not have its shape (strict mode)
    #[error("malformed rundata assignment at line {line_number}: {line}")]
    MalformedAssignment { line_number: usize, line: String },

    /// Text format decoding failed
    #[error("cannot decode textproto: {0}")]
    Decode(String),

    /// Extracted record lacks a required field
    #[error("missing required field: {0}")]
    MissingField(RequiredField),

    /// Input exceeds the configured size limit
    #[error("input too large: {size} bytes (max: {max})")]
    InputTooLarge { size: u64, max: u64 },

    /// IO error reading a named file
    #[error("io error reading {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error reading the stream
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema contract unavailable
    #[error("schema error: {0}")]
    Schema(SchemaError),
}

impl ParseError {
    /// Create malformed value error for a block line
    pub fn malformed_value(
        line_number: usize,
        line: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedValue {
            line_number,
            line: line.into(),
            reason: reason.to_string(),
        }
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }
}

impl From<SchemaError> for ParseError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::MissingField(field) => Self::MissingField(field),
            SchemaError::Decode(message) => Self::Decode(message),
            other => Self::Schema(other),
        }
    }
}

/// Errors during textproto serialization (egress)
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Record could not be encoded
    #[error("cannot encode textproto: {0}")]
    Encode(#[from] SchemaError),

    /// Writer rejected the output
    #[error("io error writing textproto: {0}")]
    Write(#[from] std::io::Error),

    /// IO error writing a named file
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SerializeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML syntax or type error
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    /// Unrecognized source kind name
    #[error("unknown source kind: '{0}'")]
    UnknownSourceKind(String),
}

/// Combined rundata error
#[derive(Debug, thiserror::Error)]
pub enum RundataError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for rundata operations
pub type RundataResult<T> = Result<T, RundataError>;
