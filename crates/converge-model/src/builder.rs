//! Snapshot construction
//!
//! [`ModelBuilder`] is the only way to obtain a [`Model`]. Building checks
//! the structural invariants the engines assume: every host has a
//! hostname, and no two children of one host share an `item_id` (task
//! idempotency keys are derived from child item ids).

use crate::cluster::ClusteredService;
use crate::host::Host;
use crate::model::Model;
use crate::vpath::Vpath;
use indexmap::IndexSet;

/// Structural invariant violations raised at snapshot construction
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A host was declared with an empty hostname
    #[error("host at \"{vpath}\" has an empty hostname")]
    EmptyHostname {
        /// Vpath of the offending host
        vpath: Vpath,
    },

    /// Two children of one host share a local identifier
    #[error("duplicate item id \"{item_id}\" under host \"{hostname}\"")]
    DuplicateItemId {
        /// Host carrying the colliding children
        hostname: String,
        /// The colliding local identifier
        item_id: String,
    },
}

/// Builder for an immutable [`Model`] snapshot
#[derive(Debug, Default)]
pub struct ModelBuilder {
    peers: Vec<Host>,
    management: Vec<Host>,
    clustered_services: Vec<ClusteredService>,
}

impl ModelBuilder {
    /// Create an empty builder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer node
    #[inline]
    #[must_use]
    pub fn peer(mut self, host: Host) -> Self {
        self.peers.push(host);
        self
    }

    /// Add a management server
    #[inline]
    #[must_use]
    pub fn management(mut self, host: Host) -> Self {
        self.management.push(host);
        self
    }

    /// Add a clustered-service declaration
    #[inline]
    #[must_use]
    pub fn clustered_service(mut self, clustered: ClusteredService) -> Self {
        self.clustered_services.push(clustered);
        self
    }

    /// Validate structural invariants and seal the snapshot
    ///
    /// # Errors
    /// Returns [`ModelError`] when a host has an empty hostname or two
    /// children of one host share an `item_id`.
    pub fn build(self) -> Result<Model, ModelError> {
        for host in self.peers.iter().chain(self.management.iter()) {
            check_host(host)?;
        }
        Ok(Model {
            peers: self.peers,
            management: self.management,
            clustered_services: self.clustered_services,
        })
    }
}

fn check_host(host: &Host) -> Result<(), ModelError> {
    if host.hostname.is_empty() {
        return Err(ModelError::EmptyHostname {
            vpath: host.vpath.clone(),
        });
    }
    let mut seen: IndexSet<&str> = IndexSet::new();
    let child_ids = host
        .services
        .iter()
        .map(|s| s.item_id.as_str())
        .chain(host.packages.iter().map(|p| p.item_id.as_str()))
        .chain(host.upgrades.iter().map(|u| u.item_id.as_str()));
    for item_id in child_ids {
        if !seen.insert(item_id) {
            return Err(ModelError::DuplicateItemId {
                hostname: host.hostname.clone(),
                item_id: item_id.to_string(),
            });
        }
    }
    Ok(())
}
