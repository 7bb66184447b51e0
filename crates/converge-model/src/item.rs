//! Per-host declarations: services, packages, upgrades

use crate::state::ItemState;
use crate::vpath::Vpath;
use serde::{Deserialize, Serialize};

/// Discriminates a plain OS service from a virtualization-backed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    /// Plain init-style OS service
    Lsb,
    /// VM-backed service provisioned by the virtualization adaptor
    Vm,
}

impl ServiceKind {
    /// The external item-type tag for this kind
    #[inline]
    #[must_use]
    pub fn item_type_id(self) -> &'static str {
        match self {
            Self::Lsb => "service",
            Self::Vm => "vm-service",
        }
    }
}

/// A declared service on a host
///
/// `service_name` is the name of the service as the operating system knows
/// it; the optional commands override the OS-native start/stop/status
/// actions. `packages` are the package declarations the service depends on
/// (inherited alongside it in the external model).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Local identifier, unique among its host's children
    pub item_id: String,
    /// Stable structural identifier
    pub vpath: Vpath,
    /// Plain or VM-backed
    pub kind: ServiceKind,
    /// Declared OS service name
    pub service_name: String,
    /// Explicit start command override
    pub start_command: Option<String>,
    /// Explicit stop command override
    pub stop_command: Option<String>,
    /// Explicit status command override
    pub status_command: Option<String>,
    /// Cleanup hook run by the external executor on removal; carried as-is
    pub cleanup_command: Option<String>,
    /// Lifecycle state
    pub state: ItemState,
    /// Package declarations this service depends on
    pub packages: Vec<Package>,
}

impl Service {
    /// Create a service declaration in the [`ItemState::Initial`] state
    #[must_use]
    pub fn new(
        item_id: impl Into<String>,
        vpath: impl Into<Vpath>,
        kind: ServiceKind,
        service_name: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            vpath: vpath.into(),
            kind,
            service_name: service_name.into(),
            start_command: None,
            stop_command: None,
            status_command: None,
            cleanup_command: None,
            state: ItemState::Initial,
            packages: Vec::new(),
        }
    }

    /// With an explicit start command
    #[inline]
    #[must_use]
    pub fn with_start_command(mut self, command: impl Into<String>) -> Self {
        self.start_command = Some(command.into());
        self
    }

    /// With an explicit stop command
    #[inline]
    #[must_use]
    pub fn with_stop_command(mut self, command: impl Into<String>) -> Self {
        self.stop_command = Some(command.into());
        self
    }

    /// With an explicit status command
    #[inline]
    #[must_use]
    pub fn with_status_command(mut self, command: impl Into<String>) -> Self {
        self.status_command = Some(command.into());
        self
    }

    /// With a cleanup command
    #[inline]
    #[must_use]
    pub fn with_cleanup_command(mut self, command: impl Into<String>) -> Self {
        self.cleanup_command = Some(command.into());
        self
    }

    /// In the given lifecycle state
    #[inline]
    #[must_use]
    pub fn in_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }

    /// With a dependent package declaration
    #[inline]
    #[must_use]
    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }
}

/// A declared package on a host or under a service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Local identifier, unique among its host's children
    pub item_id: String,
    /// Stable structural identifier
    pub vpath: Vpath,
    /// Package name
    pub name: String,
    /// Lifecycle state
    pub state: ItemState,
}

impl Package {
    /// Create a package declaration in the [`ItemState::Initial`] state
    #[must_use]
    pub fn new(
        item_id: impl Into<String>,
        vpath: impl Into<Vpath>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            vpath: vpath.into(),
            name: name.into(),
            state: ItemState::Initial,
        }
    }

    /// In the given lifecycle state
    #[inline]
    #[must_use]
    pub fn in_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }
}

/// An upgrade declaration attached to a peer node
///
/// `redeploy_ms` records whether the management server is being redeployed
/// as part of this upgrade. The external model carries it as the string
/// `"true"` / `"false"`; it is parsed into a real boolean at snapshot
/// construction via [`parse_redeploy_flag`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upgrade {
    /// Local identifier, unique among its host's children
    pub item_id: String,
    /// Stable structural identifier
    pub vpath: Vpath,
    /// Management server redeploy in progress for this upgrade
    pub redeploy_ms: bool,
}

impl Upgrade {
    /// Create an upgrade declaration
    #[must_use]
    pub fn new(item_id: impl Into<String>, vpath: impl Into<Vpath>, redeploy_ms: bool) -> Self {
        Self {
            item_id: item_id.into(),
            vpath: vpath.into(),
            redeploy_ms,
        }
    }

    /// Create an upgrade declaration from the external string flag
    #[must_use]
    pub fn from_flag(
        item_id: impl Into<String>,
        vpath: impl Into<Vpath>,
        redeploy_flag: Option<&str>,
    ) -> Self {
        Self::new(item_id, vpath, parse_redeploy_flag(redeploy_flag))
    }
}

/// Parse the external `redeploy_ms` flag, defaulting to `false` on absence
/// or any value other than the literal `"true"`.
#[inline]
#[must_use]
pub fn parse_redeploy_flag(raw: Option<&str>) -> bool {
    matches!(raw, Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_builder_defaults() {
        let svc = Service::new("httpd", "/ms/services/httpd", ServiceKind::Lsb, "httpd");
        assert_eq!(svc.state, ItemState::Initial);
        assert!(svc.start_command.is_none());
        assert!(svc.packages.is_empty());
    }

    #[test]
    fn service_kind_type_ids() {
        assert_eq!(ServiceKind::Lsb.item_type_id(), "service");
        assert_eq!(ServiceKind::Vm.item_type_id(), "vm-service");
    }

    #[test]
    fn redeploy_flag_parsing() {
        assert!(parse_redeploy_flag(Some("true")));
        assert!(!parse_redeploy_flag(Some("false")));
        assert!(!parse_redeploy_flag(Some("TRUE")));
        assert!(!parse_redeploy_flag(None));
    }

    #[test]
    fn upgrade_from_flag_defaults_false() {
        let upgrade = Upgrade::from_flag("u1", "/nodes/n1/upgrade", None);
        assert!(!upgrade.redeploy_ms);
    }
}
