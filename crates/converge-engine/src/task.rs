//! Configuration-task descriptors
//!
//! A [`ConfigTask`] is one idempotent operation handed to the downstream
//! executor: ensure a service is running or stopped on a host, with the
//! resource properties to apply and the dependency edges to order against.
//!
//! Per-task properties are a closed structure ([`ServiceProperties`])
//! rather than a free-form map, so downstream serialization is exact;
//! [`ServiceProperties::to_map`] produces the executor's wire form.

use converge_model::{Host, Service, ServiceKind, Vpath};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Operation category of every task this engine emits
pub const TASK_CATEGORY: &str = "service";

/// Category of the virtualization adaptor's install task
pub const ADAPTOR_INSTALL_CATEGORY: &str = "libvirt::install_adaptor";

/// Key of the virtualization adaptor's install task
pub const ADAPTOR_INSTALL_KEY: &str = "ms_libvirt_adaptor_install";

/// Category of the adaptor's per-instance image-copy task
pub const ADAPTOR_COPY_FILE_CATEGORY: &str = "libvirt::copy_file";

/// Category of the adaptor's per-instance file-write tasks
pub const ADAPTOR_WRITE_FILE_CATEGORY: &str = "libvirt::write_file";

/// Fixed adaptor script invoked for VM-backed service status
pub const ADAPTOR_STATUS_SCRIPT: &str = "/opt/converge/lib/libvirt/libvirt_adaptor.py";

/// Target state of a service task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ensure {
    /// The service must be running
    Running,
    /// The service must be stopped
    Stopped,
}

impl Ensure {
    /// Wire form of the verb
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl std::fmt::Display for Ensure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service provider forced for VM-backed services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Generic init-style provider
    Init,
}

impl Provider {
    /// Wire form of the provider
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
        }
    }
}

/// A dependency edge of a task
///
/// Either another declaration (the task waits on whatever tasks target
/// it) or an externally emitted task referenced by its category/key pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dependency {
    /// Wait on all tasks targeting the given declaration
    Item(Vpath),
    /// Wait on an external task identified by category and key
    Task {
        /// Operation category of the referenced task
        category: String,
        /// Idempotency key of the referenced task
        key: String,
    },
}

impl Dependency {
    /// Dependency on a declaration
    #[inline]
    #[must_use]
    pub fn item(vpath: Vpath) -> Self {
        Self::Item(vpath)
    }

    /// Dependency on an external task
    #[inline]
    #[must_use]
    pub fn task(category: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Task {
            category: category.into(),
            key: key.into(),
        }
    }
}

/// Closed set of resource properties for a service task
///
/// Unset fields are omitted from the wire form: for a plain service with
/// no overrides the executor already knows the OS-native defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceProperties {
    /// Declared OS service name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Start action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Stop action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    /// Status action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Whether the service has native status support (VM services: false)
    #[serde(rename = "hasstatus", skip_serializing_if = "Option::is_none")]
    pub has_status: Option<bool>,
    /// Forced provider (VM services: init)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

impl ServiceProperties {
    /// The executor's wire form: string key/value pairs in a fixed order
    #[must_use]
    pub fn to_map(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        if let Some(name) = &self.name {
            map.insert("name".to_string(), name.clone());
        }
        if let Some(start) = &self.start {
            map.insert("start".to_string(), start.clone());
        }
        if let Some(stop) = &self.stop {
            map.insert("stop".to_string(), stop.clone());
        }
        if let Some(status) = &self.status {
            map.insert("status".to_string(), status.clone());
        }
        if let Some(has_status) = self.has_status {
            map.insert("hasstatus".to_string(), has_status.to_string());
        }
        if let Some(provider) = self.provider {
            map.insert("provider".to_string(), provider.as_str().to_string());
        }
        map
    }
}

/// One idempotent configuration operation for the downstream executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigTask {
    /// Hostname of the target host
    pub host: String,
    /// Vpath of the originating declaration
    pub origin: Vpath,
    /// Human-readable description
    pub description: String,
    /// Operation category; always [`TASK_CATEGORY`] for this engine
    pub category: String,
    /// Idempotency key, unique per host (the declaration's item id)
    pub call_id: String,
    /// Target state
    pub ensure: Ensure,
    /// Whether the service starts at boot
    pub enabled: bool,
    /// Resource properties
    pub properties: ServiceProperties,
    /// Dependency edges
    pub requires: IndexSet<Dependency>,
}

impl ConfigTask {
    /// Build a task for a service declaration on a host.
    ///
    /// Property rules: explicit command overrides win; VM-backed services
    /// fall back to synthesized systemctl/adaptor commands and force
    /// `hasstatus=false`, `provider=init`; plain services with no override
    /// omit the property entirely.
    #[must_use]
    pub fn for_service(
        host: &Host,
        service: &Service,
        description: impl Into<String>,
        ensure: Ensure,
        enabled: bool,
    ) -> Self {
        Self {
            host: host.hostname.clone(),
            origin: service.vpath.clone(),
            description: description.into(),
            category: TASK_CATEGORY.to_string(),
            call_id: service.item_id.clone(),
            ensure,
            enabled,
            properties: service_properties(service),
            requires: IndexSet::new(),
        }
    }

    /// Add a dependency edge
    #[inline]
    pub fn require(&mut self, dependency: Dependency) {
        self.requires.insert(dependency);
    }
}

fn service_properties(service: &Service) -> ServiceProperties {
    let is_vm = service.kind == ServiceKind::Vm;
    let name = &service.service_name;
    let mut properties = ServiceProperties::default();

    if !name.is_empty() {
        properties.name = Some(name.clone());
    }
    properties.start = service
        .start_command
        .clone()
        .or_else(|| is_vm.then(|| format!("systemctl restart {name}")));
    properties.stop = service
        .stop_command
        .clone()
        .or_else(|| is_vm.then(|| format!("systemctl stop {name}")));
    properties.status = service
        .status_command
        .clone()
        .or_else(|| is_vm.then(|| format!("{ADAPTOR_STATUS_SCRIPT} {name} status")));
    if is_vm {
        properties.has_status = Some(false);
        properties.provider = Some(Provider::Init);
    }
    properties
}
