//! Key-path diff of structured documents

use std::collections::BTreeMap;

use serde_json::Value;

use crate::diff::model::{ContentDiffer, DiffStrategy, RenderedDiff};
use crate::diff::parse::parse_structured;
use crate::diff::path::{push_index, push_key};
use crate::diff::text::unified_diff;

/// Path shown for a change at the document root
const ROOT_PATH: &str = "$";

/// Default differ: per-path changes, falling back to a line diff
///
/// ```
/// use siteconf_core::diff::{ContentDiffer, StructuralDiffer};
///
/// let diff = StructuralDiffer.diff("foo: 1", "foo: 2");
/// assert_eq!(diff.text, "--- previous\n+++ current\n-foo: 1\n+foo: 2\n");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralDiffer;

impl ContentDiffer for StructuralDiffer {
    fn diff(&self, previous: &str, current: &str) -> RenderedDiff {
        match (parse_structured(previous), parse_structured(current)) {
            (Some(prev_doc), Some(cur_doc)) => {
                let text = render_changes(&flatten(&prev_doc), &flatten(&cur_doc));
                let strategy = if text.is_empty() {
                    DiffStrategy::Unchanged
                } else {
                    DiffStrategy::Structural
                };
                RenderedDiff { text, strategy }
            }
            _ => {
                let text = unified_diff(previous, current);
                // Line-equal inputs are not a degradation worth reporting
                let strategy = if text.is_empty() {
                    DiffStrategy::Unchanged
                } else {
                    DiffStrategy::Text
                };
                RenderedDiff { text, strategy }
            }
        }
    }
}

/// Flatten a document into sorted `path -> compact JSON leaf` pairs
///
/// Empty objects and arrays are leaves so that `{}` -> `{"a": 1}` shows up.
pub fn flatten(document: &Value) -> BTreeMap<String, String> {
    let mut leaves = BTreeMap::new();
    collect(document, String::new(), &mut leaves);
    leaves
}

fn collect(value: &Value, path: String, leaves: &mut BTreeMap<String, String>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                collect(child, push_key(&path, key), leaves);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, item) in items.iter().enumerate() {
                collect(item, push_index(&path, index), leaves);
            }
        }
        leaf => {
            let path = if path.is_empty() {
                ROOT_PATH.to_string()
            } else {
                path
            };
            leaves.insert(path, leaf.to_string());
        }
    }
}

fn render_changes(previous: &BTreeMap<String, String>, current: &BTreeMap<String, String>) -> String {
    let mut body = String::new();
    let mut paths: Vec<&String> = previous.keys().chain(current.keys()).collect();
    paths.sort();
    paths.dedup();

    for path in paths {
        match (previous.get(path), current.get(path)) {
            (Some(old), Some(new)) if old == new => {}
            (old, new) => {
                if let Some(old) = old {
                    body.push_str(&format!("-{}: {}\n", path, old));
                }
                if let Some(new) = new {
                    body.push_str(&format!("+{}: {}\n", path, new));
                }
            }
        }
    }

    if body.is_empty() {
        body
    } else {
        format!("--- previous\n+++ current\n{}", body)
    }
}
