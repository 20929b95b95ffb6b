//! Snapshot diffing
//!
//! `DiffEngine` redacts both snapshots, then hands the redacted text to a
//! `ContentDiffer`. The default `StructuralDiffer` compares documents by key
//! path and falls back to a unified line diff when a side does not parse.

pub mod engine;
pub mod model;
pub mod parse;
pub mod path;
pub mod structural;
pub mod text;

pub use engine::DiffEngine;
pub use model::{ContentDiffer, DiffStrategy, RenderedDiff};
pub use structural::StructuralDiffer;
pub use text::unified_diff;
