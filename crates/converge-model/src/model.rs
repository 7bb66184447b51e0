//! The snapshot root and its query methods

use crate::cluster::ClusteredService;
use crate::host::Host;
use serde::{Deserialize, Serialize};

/// An immutable snapshot of the desired-state model
///
/// All query methods return declarations in stable insertion order, so
/// repeated reads of one snapshot are always consistent with each other.
/// Obtained only through [`crate::ModelBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub(crate) peers: Vec<Host>,
    pub(crate) management: Vec<Host>,
    pub(crate) clustered_services: Vec<ClusteredService>,
}

impl Model {
    /// All peer nodes, in insertion order
    #[inline]
    #[must_use]
    pub fn peer_nodes(&self) -> &[Host] {
        &self.peers
    }

    /// All management servers, in insertion order
    ///
    /// The deployment model allows exactly one, but the query mirrors the
    /// external store and returns a slice.
    #[inline]
    #[must_use]
    pub fn management_servers(&self) -> &[Host] {
        &self.management
    }

    /// All clustered-service declarations across all clusters
    #[inline]
    #[must_use]
    pub fn clustered_services(&self) -> &[ClusteredService] {
        &self.clustered_services
    }

    /// Hosts in plan-enumeration order: peer nodes first, management last
    ///
    /// This is the ordering contract the downstream executor expects from
    /// the synthesized task list.
    pub fn hosts_in_plan_order(&self) -> impl Iterator<Item = &Host> {
        self.peers.iter().chain(self.management.iter())
    }
}
