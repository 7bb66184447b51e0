//! Clustered-service declarations
//!
//! Services grouped under a clustered-service declaration are under the
//! exclusive management of the external clustering subsystem. The engines
//! only need the service names the application members resolve to.

use crate::vpath::Vpath;
use serde::{Deserialize, Serialize};

/// An application member of a clustered service
///
/// Each member resolves, by inheritance in the external model, to a
/// service declaration; `service_name` is the resolved OS service name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Local identifier
    pub item_id: String,
    /// Resolved OS service name
    pub service_name: String,
}

impl Application {
    /// Create an application member
    #[must_use]
    pub fn new(item_id: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            service_name: service_name.into(),
        }
    }
}

/// A group of services owned by the clustering subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusteredService {
    /// Local identifier
    pub item_id: String,
    /// Stable structural identifier
    pub vpath: Vpath,
    /// Application members
    pub applications: Vec<Application>,
}

impl ClusteredService {
    /// Create a clustered-service declaration with no members
    #[must_use]
    pub fn new(item_id: impl Into<String>, vpath: impl Into<Vpath>) -> Self {
        Self {
            item_id: item_id.into(),
            vpath: vpath.into(),
            applications: Vec::new(),
        }
    }

    /// With an application member
    #[inline]
    #[must_use]
    pub fn with_application(mut self, application: Application) -> Self {
        self.applications.push(application);
        self
    }
}
