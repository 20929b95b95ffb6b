//! Core types shared across the siteconf facilities
//!
//! This crate provides foundational types used by error handling,
//! logging and the revision history engine:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext (with cancellation)
//! - **Sensitive data**: Sensitive<T> marker and the redaction placeholder
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{RequestContext, RequestId, TraceId};
pub use sensitive::{Sensitive, REDACTED};
