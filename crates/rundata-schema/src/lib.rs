//! Rundata Schema
//!
//! The canonical test-plan metadata record and the textproto schema it is
//! exchanged in.
//!
//! # Core Concepts
//!
//! - [`Metadata`]: plan id, description and optional uuid
//! - [`metadata_descriptor`]: the `openconfig.testing.Metadata` message
//! - [`SchemaError`]: validation and codec failures
//!
//! # Example
//!
//! ```rust,ignore
//! use rundata_schema::Metadata;
//!
//! let md = Metadata::new("XX-1.1", "Foo Functional Test").with_generated_uuid();
//! md.validate()?;
//! let text = md.to_text_format()?;
//! assert_eq!(Metadata::from_text_format(&text)?, md);
//! ```

#![warn(unreachable_pub)]

mod descriptor;
mod error;
mod metadata;

pub use descriptor::{
    metadata_descriptor, FIELD_DESCRIPTION, FIELD_PLAN_ID, FIELD_UUID, PROTO_FILE, PROTO_MESSAGE,
    PROTO_PACKAGE,
};
pub use error::SchemaError;
pub use metadata::{Metadata, RequiredField, UuidStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
