use serde::Serialize;

/// How a rendered diff was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStrategy {
    /// No previous snapshot, or nothing visible changed
    Unchanged,
    /// Both sides parsed; differences listed per key path
    Structural,
    /// At least one side did not parse; line-based fallback
    Text,
}

/// Diff text plus the strategy that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDiff {
    pub text: String,
    pub strategy: DiffStrategy,
}

impl RenderedDiff {
    pub fn unchanged() -> Self {
        Self {
            text: String::new(),
            strategy: DiffStrategy::Unchanged,
        }
    }

    /// True when the raw-text fallback was used
    pub fn is_degraded(&self) -> bool {
        self.strategy == DiffStrategy::Text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Computes a difference between two already-redacted documents
///
/// Implementations must be pure: same inputs, same output, no I/O.
pub trait ContentDiffer: Send + Sync {
    fn diff(&self, previous: &str, current: &str) -> RenderedDiff;
}
