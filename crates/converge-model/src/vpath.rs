//! Stable structural identifiers
//!
//! A vpath is the `/`-separated path of a declaration within the model
//! tree. It is the identifier used in violation reports and in task
//! dependency edges.

use serde::{Deserialize, Serialize};

/// Stable structural identifier of a declaration
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vpath(String);

impl Vpath {
    /// Create a vpath from its string form
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The string form of this vpath
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Vpath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Vpath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Vpath {
    fn from(path: String) -> Self {
        Self(path)
    }
}
