//! Extraction and serialization settings

use crate::error::ConfigError;
use rundata_schema::{PROTO_FILE, PROTO_MESSAGE};
use serde::{Deserialize, Serialize};

/// Default input limit (10MB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Extractor configuration
///
/// Every key is optional in TOML:
///
/// ```toml
/// max_input_bytes = 1048576
/// strict_init_block = true
///
/// [header]
/// proto_file = "github.com/openconfig/featureprofiles/proto/metadata.proto"
/// proto_message = "Metadata"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Size limit for whole-document reads (textproto streams, named files)
    pub max_input_bytes: u64,
    /// Report lines that look like rundata assignments but are not
    pub strict_init_block: bool,
    /// Textproto header comment values
    pub header: HeaderConfig,
}

/// The two comment lines written before a serialized record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// `# proto-file:` value
    pub proto_file: String,
    /// `# proto-message:` value
    pub proto_message: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            proto_file: PROTO_FILE.to_string(),
            proto_message: PROTO_MESSAGE.to_string(),
        }
    }
}

impl HeaderConfig {
    /// Render header: two comment lines and a blank line
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "# proto-file: {}\n# proto-message: {}\n\n",
            self.proto_file, self.proto_message
        )
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            strict_init_block: false,
            header: HeaderConfig::default(),
        }
    }
}

impl ExtractConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With input size limit
    #[inline]
    #[must_use]
    pub fn with_max_input_bytes(mut self, max: u64) -> Self {
        self.max_input_bytes = max;
        self
    }

    /// With strict init block checking
    #[inline]
    #[must_use]
    pub fn with_strict_init_block(mut self, strict: bool) -> Self {
        self.strict_init_block = strict;
        self
    }

    /// With header values
    #[inline]
    #[must_use]
    pub fn with_header(mut self, header: HeaderConfig) -> Self {
        self.header = header;
        self
    }

    /// Parse and validate TOML configuration
    ///
    /// # Errors
    /// `ConfigError::Toml` on syntax errors or unknown keys,
    /// `ConfigError::InvalidValue` if validation fails
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` naming the offending key
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_input_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_input_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }
        for (key, value) in [
            ("header.proto_file", &self.header.proto_file),
            ("header.proto_message", &self.header.proto_message),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: "must not be empty".to_string(),
                });
            }
            if value.contains('\n') || value.contains('\r') {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: "must be a single line".to_string(),
                });
            }
        }
        Ok(())
    }
}
