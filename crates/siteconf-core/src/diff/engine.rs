use crate::diff::model::{ContentDiffer, RenderedDiff};
use crate::diff::structural::StructuralDiffer;
use crate::errors::Result;
use crate::log_op_degraded;
use crate::model::ConfigurationSnapshot;
use crate::redaction::{RedactionPolicy, Redactor};

/// Redacts two snapshots and diffs what remains
pub struct DiffEngine {
    redactor: Redactor,
    differ: Box<dyn ContentDiffer>,
}

impl DiffEngine {
    pub fn new(redactor: Redactor, differ: Box<dyn ContentDiffer>) -> Self {
        Self { redactor, differ }
    }

    /// Engine with the default structural differ
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the policy does not compile.
    pub fn from_policy(policy: &RedactionPolicy) -> Result<Self> {
        Ok(Self::new(Redactor::new(policy)?, Box::new(StructuralDiffer)))
    }

    /// Diff `current` against its predecessor
    ///
    /// Without a predecessor the diff is empty and nothing is redacted.
    /// Changes confined to redacted values produce an empty diff.
    ///
    /// # Errors
    ///
    /// `RedactionFailed` when either side cannot be safely redacted.
    pub fn diff(
        &self,
        current: &ConfigurationSnapshot,
        previous: Option<&ConfigurationSnapshot>,
    ) -> Result<RenderedDiff> {
        let Some(previous) = previous else {
            return Ok(RenderedDiff::unchanged());
        };

        let previous_redacted = self
            .redactor
            .redact(previous.contents())
            .map_err(|e| e.with_entity_id(previous.id().to_string()))?;
        let current_redacted = self
            .redactor
            .redact(current.contents())
            .map_err(|e| e.with_entity_id(current.id().to_string()))?;

        if previous_redacted == current_redacted {
            return Ok(RenderedDiff::unchanged());
        }

        let rendered = self.differ.diff(&previous_redacted, &current_redacted);
        if rendered.is_degraded() {
            log_op_degraded!(
                "diff",
                snapshot_id = current.id().get(),
                previous_snapshot_id = previous.id().get()
            );
        }
        Ok(rendered)
    }
}

impl std::fmt::Debug for DiffEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffEngine")
            .field("redactor", &self.redactor)
            .finish_non_exhaustive()
    }
}
