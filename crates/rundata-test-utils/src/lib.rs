//! Testing utilities for the rundata workspace
//!
//! Shared fixtures for the three source formats.

#![allow(missing_docs)]

use rundata_schema::Metadata;

pub const PLAN_ID: &str = "XX-1.1";
pub const DESCRIPTION: &str = "Foo Functional Test";
pub const UUID: &str = "123e4567-e89b-42d3-a456-426614174000";

pub fn sample_metadata() -> Metadata {
    Metadata::new(PLAN_ID, DESCRIPTION).with_uuid(UUID)
}

pub fn sample_markdown() -> String {
    format!("# {PLAN_ID}: {DESCRIPTION}\n\n## Summary\n\nValidate foo.\n")
}

pub fn go_source_with_init(body: &str) -> String {
    format!(
        "// Package foo_test is a test.\npackage foo_test\n\nimport (\n\t\"testing\"\n\n\t\"github.com/openconfig/featureprofiles/internal/rundata\"\n)\n\nfunc init() {{\n{body}}}\n\nfunc TestMain(m *testing.M) {{\n\tfptest.RunTests(m)\n}}\n"
    )
}

pub fn sample_go_source() -> String {
    go_source_with_init(&format!(
        "\trundata.TestPlanID = {PLAN_ID:?}\n\trundata.TestDescription = {DESCRIPTION:?}\n\trundata.TestUUID = {UUID:?}\n"
    ))
}

pub fn sample_textproto() -> String {
    format!(
        "# proto-file: github.com/openconfig/featureprofiles/proto/metadata.proto\n\
         # proto-message: Metadata\n\n\
         uuid: {UUID:?}\n\
         plan_id: {PLAN_ID:?}\n\
         description: {DESCRIPTION:?}\n"
    )
}
