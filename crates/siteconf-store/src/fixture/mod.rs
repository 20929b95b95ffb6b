//! History fixtures
//!
//! Provides:
//! - Fixture format v0 schema
//! - YAML parser with validation
//! - Importer into the in-memory collaborators

pub mod format_v0;
pub mod importer;
pub mod parser;

pub use format_v0::FixtureV0;
pub use importer::{import_fixture, ImportedFixture};
pub use parser::{parse_fixture_file, parse_fixture_str};
