//! Extractor - main entry point
//!
//! Provides:
//! - Source → Metadata extraction (ingress)
//! - Metadata → textproto serialization (egress)
//!
//! File discovery is the caller's job; paths given here are read or written
//! as-is.

use crate::config::ExtractConfig;
use crate::error::{ParseError, SerializeError};
use crate::parsers::SourceKind;
use crate::serializer::TextProtoSerializer;
use rundata_schema::Metadata;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Extraction and serialization front end
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
    serializer: TextProtoSerializer,
}

impl Extractor {
    /// Create extractor with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ExtractConfig::default())
    }

    /// Create extractor with specific configuration
    #[must_use]
    pub fn with_config(config: ExtractConfig) -> Self {
        let serializer = TextProtoSerializer::with_header(config.header.clone());
        Self { config, serializer }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract a record from a stream of the given kind
    ///
    /// # Errors
    /// The [`ParseError`] of the selected parser
    pub fn extract(
        &self,
        kind: SourceKind,
        reader: &mut dyn BufRead,
    ) -> Result<Metadata, ParseError> {
        debug!(%kind, "extracting metadata");
        kind.parser(&self.config).parse(reader)
    }

    /// Extract a record from an in-memory string
    ///
    /// # Errors
    /// The [`ParseError`] of the selected parser
    pub fn extract_str(&self, kind: SourceKind, content: &str) -> Result<Metadata, ParseError> {
        self.extract(kind, &mut content.as_bytes())
    }

    /// Extract a record from a file
    ///
    /// # Errors
    /// - `ParseError::ReadFile` if the file cannot be opened or inspected
    /// - `ParseError::InputTooLarge` if the file exceeds `max_input_bytes`
    /// - the parser's error otherwise
    pub fn extract_file(
        &self,
        kind: SourceKind,
        path: impl AsRef<Path>,
    ) -> Result<Metadata, ParseError> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| ParseError::io_error(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| ParseError::io_error(path, e))?
            .len();
        if size > self.config.max_input_bytes {
            return Err(ParseError::InputTooLarge {
                size,
                max: self.config.max_input_bytes,
            });
        }

        debug!(path = %path.display(), size, "reading source file");
        let mut reader = BufReader::new(file);
        self.extract(kind, &mut reader).map_err(|e| match e {
            ParseError::Io(source) => ParseError::io_error(path, source),
            other => other,
        })
    }

    /// Render a record as a complete textproto document
    ///
    /// # Errors
    /// `SerializeError::Encode` if the record cannot be encoded
    pub fn to_text(&self, md: &Metadata) -> Result<String, SerializeError> {
        self.serializer.to_text(md)
    }

    /// Write a record as a textproto document
    ///
    /// # Errors
    /// `SerializeError::Encode` or `SerializeError::Write`
    pub fn write<W: std::io::Write>(&self, md: &Metadata, writer: W) -> Result<(), SerializeError> {
        self.serializer.write(md, writer)
    }

    /// Write a record to a file, replacing its contents
    ///
    /// # Errors
    /// `SerializeError::Encode`, or `SerializeError::Io` naming the path
    pub fn write_file(&self, md: &Metadata, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        let path = path.as_ref();
        let text = self.to_text(md)?;
        std::fs::write(path, text).map_err(|e| SerializeError::io_error(path, e))?;
        debug!(path = %path.display(), "wrote metadata file");
        Ok(())
    }
}
