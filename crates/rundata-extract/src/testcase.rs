//! Test case reconciliation
//!
//! A test case has an authoritative README heading and, usually, an
//! existing rundata record (from `metadata.textproto` or a legacy
//! `func init()` block). [`TestCase::check`] lists where they disagree;
//! [`TestCase::fix`] produces the record that should be written back.

use rundata_schema::{Metadata, UuidStatus};
use tracing::debug;

/// A single inconsistency found by [`TestCase::check`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Discrepancy {
    /// No existing rundata record
    #[error("missing existing rundata")]
    MissingExisting,

    /// Plan id differs from the README heading
    #[error("plan_id mismatch: markdown {markdown:?}, existing {existing:?}")]
    PlanIdMismatch { markdown: String, existing: String },

    /// Description differs from the README heading
    #[error("description mismatch: markdown {markdown:?}, existing {existing:?}")]
    DescriptionMismatch { markdown: String, existing: String },

    /// No uuid assigned
    #[error("missing uuid")]
    MissingUuid,

    /// uuid does not parse
    #[error("invalid uuid {uuid:?}: {reason}")]
    InvalidUuid { uuid: String, reason: String },

    /// uuid is not an RFC 4122 variant
    #[error("uuid {0:?} is not RFC 4122")]
    UuidWrongVariant(String),

    /// uuid is not version 4
    #[error("uuid {uuid:?} has version {version}, want 4")]
    UuidWrongVersion { uuid: String, version: usize },
}

/// README record paired with the existing rundata record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    markdown: Metadata,
    existing: Option<Metadata>,
}

impl TestCase {
    /// Create test case
    #[inline]
    #[must_use]
    pub fn new(markdown: Metadata, existing: Option<Metadata>) -> Self {
        Self { markdown, existing }
    }

    /// README record
    #[inline]
    #[must_use]
    pub fn markdown(&self) -> &Metadata {
        &self.markdown
    }

    /// Existing record, if any
    #[inline]
    #[must_use]
    pub fn existing(&self) -> Option<&Metadata> {
        self.existing.as_ref()
    }

    /// List every inconsistency; empty means the existing record is current
    #[must_use]
    pub fn check(&self) -> Vec<Discrepancy> {
        let Some(existing) = &self.existing else {
            return vec![Discrepancy::MissingExisting];
        };

        let mut found = Vec::new();
        if existing.plan_id != self.markdown.plan_id {
            found.push(Discrepancy::PlanIdMismatch {
                markdown: self.markdown.plan_id.clone(),
                existing: existing.plan_id.clone(),
            });
        }
        if existing.description != self.markdown.description {
            found.push(Discrepancy::DescriptionMismatch {
                markdown: self.markdown.description.clone(),
                existing: existing.description.clone(),
            });
        }
        match existing.uuid_status() {
            UuidStatus::Valid => {}
            UuidStatus::Missing => found.push(Discrepancy::MissingUuid),
            UuidStatus::Invalid(reason) => found.push(Discrepancy::InvalidUuid {
                uuid: existing.uuid.clone(),
                reason,
            }),
            UuidStatus::WrongVariant => {
                found.push(Discrepancy::UuidWrongVariant(existing.uuid.clone()));
            }
            UuidStatus::WrongVersion(version) => found.push(Discrepancy::UuidWrongVersion {
                uuid: existing.uuid.clone(),
                version,
            }),
        }
        found
    }

    /// Corrected record
    ///
    /// Plan id and description come from the README; an existing valid
    /// uuid is kept, anything else is replaced with a fresh version-4 uuid.
    #[must_use]
    pub fn fix(&self) -> Metadata {
        let base = match &self.existing {
            Some(existing) if existing.uuid_status() == UuidStatus::Valid => existing.clone(),
            _ => Metadata::default(),
        };
        let fixed = base.refreshed_from(&self.markdown).with_generated_uuid();
        debug!(plan_id = %fixed.plan_id, uuid = %fixed.uuid, "fixed rundata");
        fixed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const UUID: &str = "123e4567-e89b-42d3-a456-426614174000";

    fn markdown() -> Metadata {
        Metadata::new("XX-1.1", "Foo Functional Test")
    }

    #[test]
    fn check_consistent() {
        let tc = TestCase::new(markdown(), Some(markdown().with_uuid(UUID)));
        assert!(tc.check().is_empty());
    }

    #[test]
    fn check_missing_existing() {
        let tc = TestCase::new(markdown(), None);
        assert_eq!(tc.check(), vec![Discrepancy::MissingExisting]);
    }

    #[test]
    fn check_reports_every_mismatch() {
        let existing = Metadata::new("XX-1.0", "Old Title");
        let tc = TestCase::new(markdown(), Some(existing));
        assert_eq!(
            tc.check(),
            vec![
                Discrepancy::PlanIdMismatch {
                    markdown: "XX-1.1".to_string(),
                    existing: "XX-1.0".to_string(),
                },
                Discrepancy::DescriptionMismatch {
                    markdown: "Foo Functional Test".to_string(),
                    existing: "Old Title".to_string(),
                },
                Discrepancy::MissingUuid,
            ]
        );
    }

    #[test]
    fn check_uuid_problems() {
        let tc = TestCase::new(markdown(), Some(markdown().with_uuid("u-1")));
        assert!(matches!(tc.check()[..], [Discrepancy::InvalidUuid { .. }]));

        let v1 = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";
        let tc = TestCase::new(markdown(), Some(markdown().with_uuid(v1)));
        assert_eq!(
            tc.check(),
            vec![Discrepancy::UuidWrongVersion {
                uuid: v1.to_string(),
                version: 1,
            }]
        );
    }

    #[test]
    fn fix_keeps_valid_uuid() {
        let existing = Metadata::new("XX-1.0", "Old Title").with_uuid(UUID);
        let tc = TestCase::new(markdown(), Some(existing));
        assert_eq!(tc.fix(), markdown().with_uuid(UUID));
    }

    #[test]
    fn fix_assigns_uuid_when_missing() {
        let tc = TestCase::new(markdown(), None);
        let fixed = tc.fix();
        assert_eq!(fixed.plan_id, "XX-1.1");
        assert_eq!(fixed.uuid_status(), UuidStatus::Valid);
    }

    #[test]
    fn fix_replaces_invalid_uuid() {
        let tc = TestCase::new(markdown(), Some(markdown().with_uuid("u-1")));
        let fixed = tc.fix();
        assert_ne!(fixed.uuid, "u-1");
        assert_eq!(fixed.uuid_status(), UuidStatus::Valid);
    }

    #[test]
    fn fixed_record_passes_check() {
        let tc = TestCase::new(markdown(), Some(Metadata::new("XX-1.0", "Old")));
        let fixed = tc.fix();
        let again = TestCase::new(tc.markdown().clone(), Some(fixed));
        assert!(again.check().is_empty());
    }

    #[test]
    fn discrepancy_display() {
        assert_eq!(Discrepancy::MissingUuid.to_string(), "missing uuid");
        let d = Discrepancy::PlanIdMismatch {
            markdown: "A".to_string(),
            existing: "B".to_string(),
        };
        assert_eq!(d.to_string(), "plan_id mismatch: markdown \"A\", existing \"B\"");
    }
}
