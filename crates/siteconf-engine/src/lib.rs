//! Siteconf Engine - revision history resolution
//!
//! Assembles the core pieces into the query-facing façade: a
//! `RevisionResolver` that looks revisions up by opaque id, pages through
//! history newest first and renders each revision as a `RevisionNode`.

pub mod config;
pub mod resolver;

pub use config::{load_config, parse_config_str, EngineConfig, HistoryConfig};
pub use resolver::{
    AuthorField, FieldError, HistoryArgs, HistoryConnection, HistoryPage, PageInfo,
    RevisionNode, RevisionResolver, RevisionView,
};
