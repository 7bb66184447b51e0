//! Testing utilities for the converge workspace
//!
//! Shared model fixtures. Vpaths follow the external store's layout so
//! violation messages in tests read like production output.

#![allow(missing_docs)]

use converge_model::{Host, HostRole, Package, Service, ServiceKind, Upgrade};

pub fn peer(hostname: &str) -> Host {
    Host::new(hostname, HostRole::Peer, node_vpath(hostname))
}

pub fn management(hostname: &str) -> Host {
    Host::new(hostname, HostRole::Management, "/ms")
}

pub fn node_vpath(hostname: &str) -> String {
    format!("/deployments/d1/clusters/c1/nodes/{hostname}")
}

pub fn node_service_vpath(hostname: &str, item_id: &str) -> String {
    format!("{}/services/{item_id}", node_vpath(hostname))
}

pub fn ms_service_vpath(item_id: &str) -> String {
    format!("/ms/services/{item_id}")
}

pub fn node_service(hostname: &str, item_id: &str, service_name: &str) -> Service {
    Service::new(
        item_id,
        node_service_vpath(hostname, item_id),
        ServiceKind::Lsb,
        service_name,
    )
}

pub fn ms_service(item_id: &str, service_name: &str) -> Service {
    Service::new(
        item_id,
        ms_service_vpath(item_id),
        ServiceKind::Lsb,
        service_name,
    )
}

pub fn ms_vm_service(item_id: &str, service_name: &str) -> Service {
    Service::new(
        item_id,
        ms_service_vpath(item_id),
        ServiceKind::Vm,
        service_name,
    )
}

pub fn software_package(item_id: &str, name: &str) -> Package {
    Package::new(item_id, format!("/software/items/{item_id}"), name)
}

pub fn node_package(hostname: &str, item_id: &str, name: &str) -> Package {
    Package::new(
        item_id,
        format!("{}/items/{item_id}", node_vpath(hostname)),
        name,
    )
}

pub fn node_upgrade(hostname: &str, redeploy_flag: Option<&str>) -> Upgrade {
    Upgrade::from_flag(
        "upgrade",
        format!("{}/upgrade", node_vpath(hostname)),
        redeploy_flag,
    )
}
