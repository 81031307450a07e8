//! The canonical test-plan metadata record
//!
//! Every extractor converges on [`Metadata`]; the serializer consumes it.

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::{Uuid, Variant};

/// Test-plan metadata
///
/// A plain value: no identity beyond its fields.
/// `uuid` is empty until one is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    /// Plan identifier, e.g. `XX-1.1`
    pub plan_id: String,
    /// Human-readable test title
    pub description: String,
    /// Stable unique identifier (empty = not yet assigned)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uuid: String,
}

/// Required fields of a [`Metadata`] record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    /// `plan_id`
    PlanId,
    /// `description`
    Description,
}

impl RequiredField {
    /// Field name as spelled in the schema
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            RequiredField::PlanId => "plan_id",
            RequiredField::Description => "description",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classification of the `uuid` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UuidStatus {
    /// Field is empty
    Missing,
    /// Not a parseable UUID
    Invalid(String),
    /// Parses, but is not an RFC 4122 variant
    WrongVariant,
    /// RFC 4122, but not version 4
    WrongVersion(usize),
    /// RFC 4122 version 4
    Valid,
}

impl Metadata {
    /// Create record from plan id and description
    ///
    /// Both values are trimmed; `uuid` starts empty.
    #[must_use]
    pub fn new(plan_id: impl AsRef<str>, description: impl AsRef<str>) -> Self {
        Self {
            plan_id: plan_id.as_ref().trim().to_string(),
            description: description.as_ref().trim().to_string(),
            uuid: String::new(),
        }
    }

    /// With uuid
    #[inline]
    #[must_use]
    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }

    /// Check that both required fields are present
    ///
    /// # Errors
    /// `SchemaError::MissingField` naming the first empty required field
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.plan_id.trim().is_empty() {
            return Err(SchemaError::MissingField(RequiredField::PlanId));
        }
        if self.description.trim().is_empty() {
            return Err(SchemaError::MissingField(RequiredField::Description));
        }
        Ok(())
    }

    /// Whether a uuid has been assigned
    #[inline]
    #[must_use]
    pub fn has_uuid(&self) -> bool {
        !self.uuid.is_empty()
    }

    /// Copy of `self` with `plan_id` and `description` taken from `source`
    ///
    /// The existing `uuid` is kept; the one in `source` is ignored.
    #[must_use]
    pub fn refreshed_from(&self, source: &Metadata) -> Self {
        Self {
            plan_id: source.plan_id.clone(),
            description: source.description.clone(),
            uuid: self.uuid.clone(),
        }
    }

    /// Assign a random version-4 uuid if none is set
    #[must_use]
    pub fn with_generated_uuid(mut self) -> Self {
        if !self.has_uuid() {
            self.uuid = Uuid::new_v4().to_string();
        }
        self
    }

    /// Classify the `uuid` field
    #[must_use]
    pub fn uuid_status(&self) -> UuidStatus {
        if self.uuid.is_empty() {
            return UuidStatus::Missing;
        }
        match Uuid::parse_str(&self.uuid) {
            Err(e) => UuidStatus::Invalid(e.to_string()),
            Ok(u) if u.get_variant() != Variant::RFC4122 => UuidStatus::WrongVariant,
            Ok(u) if u.get_version_num() != 4 => UuidStatus::WrongVersion(u.get_version_num()),
            Ok(_) => UuidStatus::Valid,
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.plan_id, self.description)?;
        if self.has_uuid() {
            write!(f, " ({})", self.uuid)?;
        }
        Ok(())
    }
}
