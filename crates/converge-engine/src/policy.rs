//! Deny-list policy configuration
//!
//! Which service names are refusable is policy data, not algorithm: the
//! defaults below can be overridden from deployment configuration (the
//! structure deserializes from the surrounding system's config format).
//!
//! Both host classes share a global deny subset; each class then adds its
//! own entries. Management servers refuse the platform's own daemons,
//! peer nodes refuse the remote-shell service.

use converge_model::HostRole;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Service names refused on every host class
pub const GLOBAL_DENIED_SERVICES: &[&str] = &["puppet", "mcollective", "network"];

/// Additional service names refused on the management server
pub const MANAGEMENT_DENIED_SERVICES: &[&str] =
    &["converged", "rabbitmq-server", "httpd", "puppetmaster"];

/// Additional service names refused on peer nodes
pub const PEER_DENIED_SERVICES: &[&str] = &["sshd"];

/// Default message template for reserved-name violations
///
/// `{name}` is replaced with the offending service name.
pub const DEFAULT_RESERVED_MESSAGE: &str =
    "Service name \"{name}\" is reserved and cannot be managed";

/// Deny-list policy consumed by the validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    /// Names refused on the management server
    #[serde(default = "default_management_denied")]
    pub management_denied: IndexSet<String>,
    /// Names refused on peer nodes
    #[serde(default = "default_peer_denied")]
    pub peer_denied: IndexSet<String>,
    /// Message template for reserved-name violations (`{name}` placeholder)
    #[serde(default = "default_reserved_message")]
    pub reserved_message: String,
}

impl ValidationPolicy {
    /// The deny-list applying to the given host class
    #[inline]
    #[must_use]
    pub fn denied_for(&self, role: HostRole) -> &IndexSet<String> {
        match role {
            HostRole::Management => &self.management_denied,
            HostRole::Peer => &self.peer_denied,
        }
    }

    /// Render the reserved-name message for an offending service name
    #[inline]
    #[must_use]
    pub fn reserved_message_for(&self, service_name: &str) -> String {
        self.reserved_message.replace("{name}", service_name)
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            management_denied: default_management_denied(),
            peer_denied: default_peer_denied(),
            reserved_message: default_reserved_message(),
        }
    }
}

fn compose(class_specific: &[&str]) -> IndexSet<String> {
    class_specific
        .iter()
        .chain(GLOBAL_DENIED_SERVICES)
        .map(|s| (*s).to_string())
        .collect()
}

fn default_management_denied() -> IndexSet<String> {
    compose(MANAGEMENT_DENIED_SERVICES)
}

fn default_peer_denied() -> IndexSet<String> {
    compose(PEER_DENIED_SERVICES)
}

fn default_reserved_message() -> String {
    DEFAULT_RESERVED_MESSAGE.to_string()
}
