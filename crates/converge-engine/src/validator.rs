//! Model validation
//!
//! [`Validator::validate`] runs a fixed, ordered registry of checks over
//! the snapshot and concatenates their findings. Violations are data, not
//! errors: the caller gates plan creation on the list being empty.

use crate::policy::ValidationPolicy;
use converge_model::{Host, Model, Service, ServiceKind, Vpath};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::debug;

/// A single policy violation found in the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Vpath of the declaration the violation is attached to
    pub item_path: Vpath,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    /// Attach a violation to a declaration
    #[inline]
    #[must_use]
    pub fn new(item_path: Vpath, message: impl Into<String>) -> Self {
        Self {
            item_path,
            message: message.into(),
        }
    }
}

type Check = fn(&Validator, &Model) -> Vec<Violation>;

/// The check registry: a statically declared, ordered sequence.
/// Registry order is the report order.
const CHECKS: &[(&str, Check)] = &[
    ("duplicate-names", Validator::check_duplicate_names),
    ("reserved-names", Validator::check_reserved_names),
    ("cluster-ownership", Validator::check_cluster_ownership),
];

/// Runs every registered check against a model snapshot
#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    /// Create a validator with the given deny-list policy
    #[inline]
    #[must_use]
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    /// Run all checks in registry order and concatenate their findings
    #[must_use]
    pub fn validate(&self, model: &Model) -> Vec<Violation> {
        let mut violations = Vec::new();
        for &(tag, check) in CHECKS {
            let found = check(self, model);
            if !found.is_empty() {
                debug!(check = tag, count = found.len(), "check reported violations");
            }
            violations.extend(found);
        }
        violations
    }

    /// Duplicate OS service names on one host.
    ///
    /// The first declaration of a name is the anchor the violation is
    /// attached to; the remaining declarations are cited in the message,
    /// quoted and comma-joined, in discovery order.
    fn check_duplicate_names(&self, model: &Model) -> Vec<Violation> {
        let mut violations = Vec::new();
        for host in model.hosts_in_plan_order() {
            let mut buckets: IndexMap<&str, Vec<&Service>> = IndexMap::new();
            for service in plain_active_services(host) {
                buckets
                    .entry(service.service_name.as_str())
                    .or_default()
                    .push(service);
            }
            for (name, declarations) in &buckets {
                let Some((anchor, remaining)) = declarations.split_first() else {
                    continue;
                };
                if remaining.is_empty() {
                    continue;
                }
                let cited = remaining
                    .iter()
                    .map(|s| format!("\"{}\"", s.vpath))
                    .collect::<Vec<_>>()
                    .join(",");
                let message = if remaining.len() > 1 {
                    format!("Duplicate service \"{name}\" defined on paths: {cited}")
                } else {
                    format!("Duplicate service \"{name}\" defined on path: {cited}")
                };
                violations.push(Violation::new(anchor.vpath.clone(), message));
            }
        }
        violations
    }

    /// Service names refused by the host class's deny-list.
    fn check_reserved_names(&self, model: &Model) -> Vec<Violation> {
        let mut violations = Vec::new();
        let host_classes = [
            model.management_servers(),
            model.peer_nodes(),
        ];
        for hosts in host_classes {
            for host in hosts {
                let denied = self.policy.denied_for(host.role);
                for service in plain_active_services(host) {
                    if denied.contains(service.service_name.as_str()) {
                        let message = self.policy.reserved_message_for(&service.service_name);
                        debug!(host = %host.hostname, service = %service.service_name, "reserved name");
                        violations.push(Violation::new(service.vpath.clone(), message));
                    }
                }
            }
        }
        violations
    }

    /// Independent declarations of services the clustering subsystem owns.
    ///
    /// Applied-and-unchanged declarations are tolerated; the clustering
    /// subsystem's declaration takes precedence going forward.
    fn check_cluster_ownership(&self, model: &Model) -> Vec<Violation> {
        let owned: IndexSet<&str> = model
            .clustered_services()
            .iter()
            .flat_map(|cs| cs.applications.iter())
            .map(|app| app.service_name.as_str())
            .collect();
        if owned.is_empty() {
            return Vec::new();
        }
        let mut violations = Vec::new();
        for host in model.peer_nodes() {
            for service in plain_active_services(host) {
                if service.state.is_applied() {
                    continue;
                }
                if owned.contains(service.service_name.as_str()) {
                    let message = format!(
                        "Service \"{}\" is managed by the clustering subsystem",
                        service.service_name
                    );
                    debug!(host = %host.hostname, service = %service.service_name, "cluster-owned");
                    violations.push(Violation::new(service.vpath.clone(), message));
                }
            }
        }
        violations
    }
}

/// Plain-type services not marked for removal, in declaration order.
/// For-removal suppresses all validation of a declaration.
fn plain_active_services(host: &Host) -> impl Iterator<Item = &Service> {
    host.services
        .iter()
        .filter(|s| s.kind == ServiceKind::Lsb && !s.state.is_for_removal())
}
