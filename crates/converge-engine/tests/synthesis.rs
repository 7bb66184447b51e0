//! Task-synthesizer integration tests over realistic model snapshots

use converge_engine::task::{
    ADAPTOR_COPY_FILE_CATEGORY, ADAPTOR_INSTALL_CATEGORY, ADAPTOR_INSTALL_KEY,
    ADAPTOR_WRITE_FILE_CATEGORY,
};
use converge_engine::{ConfigTask, Dependency, Ensure, TaskSynthesizer};
use converge_model::{ItemState, Model, ModelBuilder, Vpath};
use converge_test_utils::{
    management, ms_service_vpath, ms_vm_service, node_package, node_service, node_upgrade, peer,
    software_package,
};
use pretty_assertions::assert_eq;

fn synthesize(model: &Model) -> Vec<ConfigTask> {
    TaskSynthesizer::new().create_configuration(model)
}

#[test]
fn model_without_services_yields_no_tasks() {
    let model = ModelBuilder::new()
        .management(management("ms1"))
        .peer(peer("node1"))
        .build()
        .unwrap();
    assert_eq!(synthesize(&model), vec![]);
}

#[test]
fn synthesis_is_idempotent_per_call() {
    let model = ModelBuilder::new()
        .management(management("ms1").with_service(ms_vm_service("fmmed", "fmmed")))
        .peer(
            peer("node1")
                .with_service(
                    node_service("node1", "sentinel", "sentinel")
                        .with_package(software_package("sentinel", "sentinel")),
                )
                .with_service(node_service("node1", "crond", "crond").in_state(ItemState::ForRemoval)),
        )
        .build()
        .unwrap();
    assert_eq!(synthesize(&model), synthesize(&model));
}

#[test]
fn plain_peer_service_without_overrides() {
    let model = ModelBuilder::new()
        .peer(peer("node1").with_service(node_service("node1", "sentinel", "sentinel")))
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    assert_eq!(tasks.len(), 1);

    let task = &tasks[0];
    assert_eq!(task.ensure, Ensure::Running);
    assert!(task.enabled);
    assert_eq!(task.call_id, "sentinel");
    let map = task.properties.to_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("name").map(String::as_str), Some("sentinel"));
}

#[test]
fn service_package_dependencies_are_edges() {
    let model = ModelBuilder::new()
        .peer(
            peer("node1").with_service(
                node_service("node1", "sentinel", "sentinel")
                    .with_package(software_package("sentinel_pkg", "sentinel-license-manager")),
            ),
        )
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    assert!(tasks[0]
        .requires
        .contains(&Dependency::item(Vpath::new("/software/items/sentinel_pkg"))));
}

#[test]
fn management_vm_service_dependency_set() {
    let model = ModelBuilder::new()
        .management(management("ms1").with_service(ms_vm_service("fmmed", "fmmed")))
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    assert_eq!(tasks.len(), 1);

    let task = &tasks[0];
    assert!(!task.enabled);

    let expected = [
        Dependency::item(Vpath::new(ms_service_vpath("fmmed"))),
        Dependency::task(ADAPTOR_INSTALL_CATEGORY, ADAPTOR_INSTALL_KEY),
        Dependency::task(ADAPTOR_COPY_FILE_CATEGORY, "ms1imagefmmed"),
        Dependency::task(ADAPTOR_WRITE_FILE_CATEGORY, "ms1configfmmed"),
        Dependency::task(ADAPTOR_WRITE_FILE_CATEGORY, "ms1metadatafmmed"),
        Dependency::task(ADAPTOR_WRITE_FILE_CATEGORY, "ms1userdatafmmed"),
    ];
    assert_eq!(task.requires.len(), expected.len());
    for dependency in &expected {
        assert!(
            task.requires.contains(dependency),
            "missing dependency {dependency:?}"
        );
    }

    let map = task.properties.to_map();
    assert_eq!(map.get("start").map(String::as_str), Some("systemctl restart fmmed"));
    assert_eq!(map.get("stop").map(String::as_str), Some("systemctl stop fmmed"));
    assert!(map.get("status").is_some_and(|s| s.ends_with("fmmed status")));
    assert_eq!(map.get("hasstatus").map(String::as_str), Some("false"));
    assert_eq!(map.get("provider").map(String::as_str), Some("init"));
}

#[test]
fn two_vm_services_on_one_host_have_distinct_artifact_keys() {
    let model = ModelBuilder::new()
        .management(
            management("ms1")
                .with_service(ms_vm_service("fmmed", "fmmed"))
                .with_service(ms_vm_service("esmon", "esmon")),
        )
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    assert_eq!(tasks.len(), 2);
    assert!(tasks[0]
        .requires
        .contains(&Dependency::task(ADAPTOR_COPY_FILE_CATEGORY, "ms1imagefmmed")));
    assert!(tasks[1]
        .requires
        .contains(&Dependency::task(ADAPTOR_COPY_FILE_CATEGORY, "ms1imageesmon")));
}

#[test]
fn esmon_is_excluded_during_management_redeploy() {
    let model = ModelBuilder::new()
        .management(management("ms1").with_service(ms_vm_service("esmon", "esmon")))
        .peer(
            peer("node1")
                .with_service(node_service("node1", "crond", "crond"))
                .with_upgrade(node_upgrade("node1", Some("true"))),
        )
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    // The unrelated peer-node task is still emitted.
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].host, "node1");
}

#[test]
fn renaming_off_esmon_restores_the_task() {
    let model = ModelBuilder::new()
        .management(management("ms1").with_service(ms_vm_service("esmon", "esmon-next")))
        .peer(peer("node1").with_upgrade(node_upgrade("node1", Some("true"))))
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].host, "ms1");
}

#[test]
fn esmon_is_emitted_when_no_redeploy_is_in_progress() {
    let model = ModelBuilder::new()
        .management(management("ms1").with_service(ms_vm_service("esmon", "esmon")))
        .peer(peer("node1").with_upgrade(node_upgrade("node1", Some("false"))))
        .build()
        .unwrap();
    assert_eq!(synthesize(&model).len(), 1);
}

#[test]
fn updated_service_also_yields_running_task() {
    let model = ModelBuilder::new()
        .peer(
            peer("node1").with_service(
                node_service("node1", "crond", "crond").in_state(ItemState::Updated),
            ),
        )
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].ensure, Ensure::Running);
}

#[test]
fn host_then_declaration_traversal_order_is_preserved() {
    let model = ModelBuilder::new()
        .management(management("ms1").with_service(node_service_on_ms("ntpd")))
        .peer(
            peer("node1")
                .with_service(node_service("node1", "crond", "crond"))
                .with_service(node_service("node1", "sentinel", "sentinel")),
        )
        .peer(peer("node2").with_service(node_service("node2", "httpd_svc", "httpd")))
        .build()
        .unwrap();
    let order: Vec<_> = synthesize(&model)
        .into_iter()
        .map(|t| (t.host, t.call_id))
        .collect();
    assert_eq!(
        order,
        [
            ("node1".to_string(), "crond".to_string()),
            ("node1".to_string(), "sentinel".to_string()),
            ("node2".to_string(), "httpd_svc".to_string()),
            ("ms1".to_string(), "ntpd".to_string()),
        ]
    );
}

#[test]
fn serialized_task_is_stable_wire_form() {
    let model = ModelBuilder::new()
        .peer(
            peer("node1").with_service(
                node_service("node1", "sentinel", "sentinel")
                    .with_package(node_package("node1", "sentinel_pkg", "sentinel")),
            ),
        )
        .build()
        .unwrap();
    let tasks = synthesize(&model);
    let json = serde_json::to_value(&tasks[0]).unwrap();
    assert_eq!(json["category"], "service");
    assert_eq!(json["ensure"], "running");
    assert_eq!(json["properties"]["name"], "sentinel");
}

fn node_service_on_ms(item_id: &str) -> converge_model::Service {
    converge_model::Service::new(
        item_id,
        ms_service_vpath(item_id),
        converge_model::ServiceKind::Lsb,
        item_id,
    )
}
