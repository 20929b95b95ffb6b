//! Siteconf Store - reference collaborators and history fixtures
//!
//! Provides:
//! - In-memory `SnapshotStore` and `UserDirectory` implementations
//! - History fixture format v0 (YAML) with parser, validation and importer
//!
//! Durable persistence lives outside this workspace; these collaborators
//! back tests, the CLI and embedders that already hold history in memory.

pub mod errors;
pub mod fixture;
pub mod memory;

// Re-export key types
pub use errors::Result;
pub use fixture::{import_fixture, parse_fixture_file, parse_fixture_str, FixtureV0, ImportedFixture};
pub use memory::{InMemorySnapshotStore, InMemoryUserDirectory};
