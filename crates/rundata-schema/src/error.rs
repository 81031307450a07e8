//! Error types for the schema crate

use crate::metadata::RequiredField;

/// Errors from the metadata schema contract
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A required field is empty
    #[error("missing required field: {0}")]
    MissingField(RequiredField),

    /// Descriptor could not be registered
    #[error("invalid schema descriptor: {0}")]
    Descriptor(String),

    /// Message not present in the descriptor pool
    #[error("unknown message: {0}")]
    UnknownMessage(String),

    /// Field rejected its value
    #[error("cannot set field {field}: {message}")]
    SetField { field: String, message: String },

    /// Text format decoding failed
    #[error("cannot decode text format: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_display() {
        let err = SchemaError::MissingField(RequiredField::PlanId);
        assert_eq!(err.to_string(), "missing required field: plan_id");
    }

    #[test]
    fn decode_display() {
        let err = SchemaError::Decode("unexpected token".to_string());
        assert_eq!(err.to_string(), "cannot decode text format: unexpected token");
    }
}
