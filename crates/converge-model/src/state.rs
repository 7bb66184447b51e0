//! Declaration lifecycle states
//!
//! Every declaration in the model carries exactly one lifecycle state at
//! evaluation time. The states are driven by external model mutations
//! (create / update / mark-for-removal / apply) that happen before the
//! engines read the snapshot.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    /// Newly declared, never converged
    Initial,
    /// Previously applied, since changed
    Updated,
    /// Converged and unchanged
    Applied,
    /// Pending deletion; suppresses all other evaluation
    ForRemoval,
}

impl ItemState {
    /// Newly declared, never converged
    #[inline]
    #[must_use]
    pub fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Previously applied, since changed
    #[inline]
    #[must_use]
    pub fn is_updated(self) -> bool {
        matches!(self, Self::Updated)
    }

    /// Converged and unchanged
    #[inline]
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// Pending deletion
    #[inline]
    #[must_use]
    pub fn is_for_removal(self) -> bool {
        matches!(self, Self::ForRemoval)
    }
}

impl std::fmt::Display for ItemState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::Updated => "updated",
            Self::Applied => "applied",
            Self::ForRemoval => "for_removal",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn states_are_mutually_exclusive() {
        let predicates: [fn(ItemState) -> bool; 4] = [
            ItemState::is_initial,
            ItemState::is_updated,
            ItemState::is_applied,
            ItemState::is_for_removal,
        ];
        for state in [
            ItemState::Initial,
            ItemState::Updated,
            ItemState::Applied,
            ItemState::ForRemoval,
        ] {
            let hits = predicates.iter().filter(|p| p(state)).count();
            assert_eq!(hits, 1, "{state} must satisfy exactly one predicate");
        }
    }

    #[test]
    fn serde_snake_case() {
        let json = serde_json::to_string(&ItemState::ForRemoval).unwrap();
        assert_eq!(json, "\"for_removal\"");
    }
}
