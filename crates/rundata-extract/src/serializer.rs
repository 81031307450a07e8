//! Textproto serializer
//!
//! Output layout:
//!
//! ```text
//! # proto-file: github.com/openconfig/featureprofiles/proto/metadata.proto
//! # proto-message: Metadata
//!
//! uuid: "..."
//! plan_id: "XX-1.1"
//! description: "Foo Functional Test"
//! ```

use crate::config::HeaderConfig;
use crate::error::SerializeError;
use rundata_schema::Metadata;
use std::io::Write;
use tracing::debug;

/// Serializer writing a header followed by the multi-line encoding
#[derive(Debug, Clone, Default)]
pub struct TextProtoSerializer {
    header: HeaderConfig,
}

impl TextProtoSerializer {
    /// Create serializer with the default header
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create serializer with a custom header
    #[inline]
    #[must_use]
    pub fn with_header(header: HeaderConfig) -> Self {
        Self { header }
    }

    /// Render the complete document
    ///
    /// # Errors
    /// `SerializeError::Encode` if the record cannot be encoded
    pub fn to_text(&self, md: &Metadata) -> Result<String, SerializeError> {
        let body = md.to_text_format()?;
        let mut text = self.header.render();
        text.push_str(&body);
        Ok(text)
    }

    /// Write the complete document
    ///
    /// The record is encoded before anything is written, so an encoding
    /// failure leaves the writer untouched.
    ///
    /// # Errors
    /// `SerializeError::Encode` or `SerializeError::Write`
    pub fn write<W: Write>(&self, md: &Metadata, mut writer: W) -> Result<(), SerializeError> {
        let text = self.to_text(md)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        debug!(plan_id = %md.plan_id, bytes = text.len(), "wrote textproto");
        Ok(())
    }
}
