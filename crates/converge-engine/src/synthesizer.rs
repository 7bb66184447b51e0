//! Task synthesis
//!
//! Walks the snapshot in plan order (peer nodes first, management last)
//! and derives one [`ConfigTask`] per actionable service declaration.
//! Emission order is host-then-declaration traversal order; inter-task
//! ordering is expressed only through dependency edges, never by
//! reordering the list here.

use crate::task::{
    ConfigTask, Dependency, Ensure, ADAPTOR_COPY_FILE_CATEGORY, ADAPTOR_INSTALL_CATEGORY,
    ADAPTOR_INSTALL_KEY, ADAPTOR_WRITE_FILE_CATEGORY,
};
use converge_model::{Host, ItemState, Model, Service, ServiceKind};
use tracing::debug;

/// The one VM service that must not be reconfigured while the management
/// server is being redeployed: restarting the monitoring VM mid-redeploy
/// leaves it pointed at the old deployment.
const REDEPLOY_EXCLUDED_VM_SERVICE: &str = "esmon";

/// Derives configuration tasks from a model snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskSynthesizer;

impl TaskSynthesizer {
    /// Create a synthesizer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Derive the ordered task list for the snapshot
    ///
    /// Calling this twice on the same snapshot yields identical output;
    /// the synthesizer holds no state between calls.
    #[must_use]
    pub fn create_configuration(&self, model: &Model) -> Vec<ConfigTask> {
        let redeploy_in_progress = management_redeploy_in_progress(model);
        let mut tasks = Vec::new();
        for host in model.hosts_in_plan_order() {
            for service in &host.services {
                if !targets_host(host, service) {
                    continue;
                }
                if excluded_during_redeploy(host, service, redeploy_in_progress) {
                    debug!(
                        host = %host.hostname,
                        service = %service.service_name,
                        "skipping VM service during management redeploy"
                    );
                    continue;
                }
                match service.state {
                    ItemState::Initial | ItemState::Updated => {
                        tasks.push(running_task(host, service));
                    }
                    ItemState::ForRemoval => tasks.push(stopped_task(host, service)),
                    ItemState::Applied => {}
                }
            }
        }
        tasks
    }
}

/// True when any peer node carries an upgrade with the redeploy flag set.
/// Evaluated once per synthesis call.
fn management_redeploy_in_progress(model: &Model) -> bool {
    model
        .peer_nodes()
        .iter()
        .flat_map(|host| host.upgrades.iter())
        .any(|upgrade| upgrade.redeploy_ms)
}

/// Plain services run anywhere; VM services only on the management server
/// (peer-node VM services belong to the virtualization adaptor).
fn targets_host(host: &Host, service: &Service) -> bool {
    match service.kind {
        ServiceKind::Lsb => true,
        ServiceKind::Vm => host.is_management(),
    }
}

fn excluded_during_redeploy(host: &Host, service: &Service, redeploy_in_progress: bool) -> bool {
    host.is_management()
        && redeploy_in_progress
        && service.kind == ServiceKind::Vm
        && service.service_name == REDEPLOY_EXCLUDED_VM_SERVICE
}

fn running_task(host: &Host, service: &Service) -> ConfigTask {
    let description = format!(
        "Ensure service \"{}\" is running on node \"{}\"",
        service.service_name, host.hostname
    );
    let enabled = service.kind != ServiceKind::Vm;
    let mut task = ConfigTask::for_service(host, service, description, Ensure::Running, enabled);

    for package in &service.packages {
        task.require(Dependency::item(package.vpath.clone()));
    }
    // Implicit dependency on a same-host package named after the service.
    for package in &host.packages {
        if package.name == service.service_name {
            task.require(Dependency::item(package.vpath.clone()));
        }
    }
    if service.kind == ServiceKind::Vm {
        // Wait on every other task targeting this declaration.
        task.require(Dependency::item(service.vpath.clone()));
        if host.is_management() {
            for dependency in adaptor_dependencies(&host.hostname, &service.service_name) {
                task.require(dependency);
            }
        }
    }
    task
}

fn stopped_task(host: &Host, service: &Service) -> ConfigTask {
    let description = format!(
        "Stop service \"{}\" on node \"{}\"",
        service.service_name, host.hostname
    );
    ConfigTask::for_service(host, service, description, Ensure::Stopped, false)
}

/// The adaptor-install task plus the four per-instance artifact tasks the
/// virtualization adaptor emits for a VM service. Artifact keys are
/// `hostname + artifact + service_name` to disambiguate multiple VM
/// services on one host.
fn adaptor_dependencies(hostname: &str, service_name: &str) -> [Dependency; 5] {
    [
        Dependency::task(ADAPTOR_INSTALL_CATEGORY, ADAPTOR_INSTALL_KEY),
        Dependency::task(
            ADAPTOR_COPY_FILE_CATEGORY,
            format!("{hostname}image{service_name}"),
        ),
        Dependency::task(
            ADAPTOR_WRITE_FILE_CATEGORY,
            format!("{hostname}config{service_name}"),
        ),
        Dependency::task(
            ADAPTOR_WRITE_FILE_CATEGORY,
            format!("{hostname}metadata{service_name}"),
        ),
        Dependency::task(
            ADAPTOR_WRITE_FILE_CATEGORY,
            format!("{hostname}userdata{service_name}"),
        ),
    ]
}
