//! Managed hosts

use crate::item::{Package, Service, Upgrade};
use crate::state::ItemState;
use crate::vpath::Vpath;
use serde::{Deserialize, Serialize};

/// Host class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostRole {
    /// The singleton, privileged management server
    Management,
    /// One of many peer nodes
    Peer,
}

/// A managed host and its child declarations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Hostname, unique across the deployment
    pub hostname: String,
    /// Management server or peer node
    pub role: HostRole,
    /// Stable structural identifier
    pub vpath: Vpath,
    /// Lifecycle state
    pub state: ItemState,
    /// Service declarations on this host
    pub services: Vec<Service>,
    /// Package declarations on this host
    pub packages: Vec<Package>,
    /// Upgrade declarations on this host
    pub upgrades: Vec<Upgrade>,
}

impl Host {
    /// Create a host in the [`ItemState::Initial`] state
    #[must_use]
    pub fn new(hostname: impl Into<String>, role: HostRole, vpath: impl Into<Vpath>) -> Self {
        Self {
            hostname: hostname.into(),
            role,
            vpath: vpath.into(),
            state: ItemState::Initial,
            services: Vec::new(),
            packages: Vec::new(),
            upgrades: Vec::new(),
        }
    }

    /// Whether this host is the management server
    #[inline]
    #[must_use]
    pub fn is_management(&self) -> bool {
        matches!(self.role, HostRole::Management)
    }

    /// With a service declaration
    #[inline]
    #[must_use]
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// With a package declaration
    #[inline]
    #[must_use]
    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    /// With an upgrade declaration
    #[inline]
    #[must_use]
    pub fn with_upgrade(mut self, upgrade: Upgrade) -> Self {
        self.upgrades.push(upgrade);
        self
    }

    /// In the given lifecycle state
    #[inline]
    #[must_use]
    pub fn in_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ServiceKind;

    #[test]
    fn management_role() {
        let ms = Host::new("ms1", HostRole::Management, "/ms");
        let peer = Host::new("node1", HostRole::Peer, "/deployments/d1/clusters/c1/nodes/n1");
        assert!(ms.is_management());
        assert!(!peer.is_management());
    }

    #[test]
    fn host_builder_accumulates_children() {
        let host = Host::new("node1", HostRole::Peer, "/deployments/d1/clusters/c1/nodes/n1")
            .with_service(Service::new(
                "crond",
                "/deployments/d1/clusters/c1/nodes/n1/services/crond",
                ServiceKind::Lsb,
                "crond",
            ))
            .with_package(Package::new(
                "crontabs",
                "/deployments/d1/clusters/c1/nodes/n1/items/crontabs",
                "crontabs",
            ));
        assert_eq!(host.services.len(), 1);
        assert_eq!(host.packages.len(), 1);
    }
}
