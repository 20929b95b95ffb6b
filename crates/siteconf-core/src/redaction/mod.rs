//! Removal of sensitive values from configuration contents
//!
//! Redaction runs on each snapshot independently before any diff is
//! computed, and verifies its own output: if a sensitive value might have
//! survived, the pass fails instead of returning partially redacted text.

pub mod policy;
pub mod redactor;

pub use policy::RedactionPolicy;
pub use redactor::Redactor;
