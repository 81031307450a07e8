//! Rundata Extraction
//!
//! Reads test-plan metadata out of the three places it lives in a test
//! directory and writes it back as a textproto.
//!
//! # Core Operations
//!
//! - **Ingress**: README heading, Go `func init()` block or textproto → [`Metadata`]
//! - **Reconcile**: compare and fix records with [`TestCase`]
//! - **Egress**: [`Metadata`] → `metadata.textproto`
//!
//! # Architecture
//!
//! ```text
//! README.md ────────┐
//! foo_test.go ──────┼─ MetadataParser ─→ Metadata ─→ TestCase::fix ─→ TextProtoSerializer
//! metadata.textproto┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use rundata_extract::{Extractor, SourceKind, TestCase};
//!
//! let extractor = Extractor::new();
//! let markdown = extractor.extract_file(SourceKind::Markdown, "README.md")?;
//! let existing = extractor.extract_file(SourceKind::TextProto, "metadata.textproto").ok();
//!
//! let tc = TestCase::new(markdown, existing);
//! for problem in tc.check() {
//!     eprintln!("{problem}");
//! }
//! extractor.write_file(&tc.fix(), "metadata.textproto")?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod error;
pub mod extractor;
pub mod parsers;
pub mod serializer;
pub mod testcase;

// Re-exports for convenience
pub use config::{ExtractConfig, HeaderConfig};
pub use error::{ConfigError, ParseError, RundataError, RundataResult, SerializeError};
pub use extractor::Extractor;
pub use parsers::{
    InitBlockParser, MarkdownParser, MetadataParser, SourceKind, TextProtoParser,
};
pub use rundata_schema::Metadata;
pub use serializer::TextProtoSerializer;
pub use testcase::{Discrepancy, TestCase};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with rundata extraction
    pub use crate::config::ExtractConfig;
    pub use crate::error::{ParseError, RundataError, RundataResult, SerializeError};
    pub use crate::extractor::Extractor;
    pub use crate::parsers::{MetadataParser, SourceKind};
    pub use crate::testcase::{Discrepancy, TestCase};
    pub use rundata_schema::{Metadata, UuidStatus};
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn markdown_to_textproto() {
        let extractor = Extractor::new();
        let md = extractor
            .extract_str(SourceKind::Markdown, "# XX-1.1: Foo Functional Test\n")
            .unwrap();
        let text = extractor.to_text(&md).unwrap();

        assert!(text.starts_with(
            "# proto-file: github.com/openconfig/featureprofiles/proto/metadata.proto\n\
             # proto-message: Metadata\n\n"
        ));
        assert_eq!(
            extractor.extract_str(SourceKind::TextProto, &text).unwrap(),
            md
        );
    }

    #[test]
    fn rundata_error_from_parts() -> RundataResult<()> {
        let extractor = Extractor::new();
        let md = extractor.extract_str(SourceKind::Markdown, "# XX-1.1: Foo\n")?;
        let _ = extractor.to_text(&md)?;
        let _ = ExtractConfig::from_toml_str("")?;
        Ok(())
    }
}
