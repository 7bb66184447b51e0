//! Plan gate
//!
//! Validation gates synthesis: a task list is only produced for a
//! snapshot with no violations. Callers that need the two steps
//! separately can use [`crate::Validator`] and [`crate::TaskSynthesizer`]
//! directly; this type exists so the common path cannot skip the gate.

use crate::policy::ValidationPolicy;
use crate::synthesizer::TaskSynthesizer;
use crate::task::ConfigTask;
use crate::validator::{Validator, Violation};
use converge_model::Model;
use tracing::debug;

/// Validates a snapshot and, only when clean, synthesizes its task list
#[derive(Debug, Clone, Default)]
pub struct Plan {
    validator: Validator,
    synthesizer: TaskSynthesizer,
}

impl Plan {
    /// Create a plan gate with the given deny-list policy
    #[inline]
    #[must_use]
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            validator: Validator::new(policy),
            synthesizer: TaskSynthesizer::new(),
        }
    }

    /// Validate, then synthesize
    ///
    /// # Errors
    /// Returns the full violation list when the snapshot fails validation;
    /// no tasks are synthesized in that case.
    pub fn build(&self, model: &Model) -> Result<Vec<ConfigTask>, Vec<Violation>> {
        let violations = self.validator.validate(model);
        if !violations.is_empty() {
            debug!(count = violations.len(), "plan blocked by validation");
            return Err(violations);
        }
        Ok(self.synthesizer.create_configuration(model))
    }
}
