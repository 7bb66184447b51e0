//! Property-based tests for the validator and synthesizer

use converge_engine::{TaskSynthesizer, ValidationPolicy, Validator};
use converge_model::{Host, HostRole, ItemState, Model, ModelBuilder, Service, ServiceKind};
use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::HashMap;

/// Service names outside every deny-list, so only the duplicate check fires.
fn service_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "crond".to_string(),
        "ntpd".to_string(),
        "sentinel".to_string(),
        "fmmed".to_string(),
        "auditd".to_string(),
    ])
}

fn state() -> impl Strategy<Value = ItemState> {
    prop::sample::select(vec![
        ItemState::Initial,
        ItemState::Updated,
        ItemState::Applied,
        ItemState::ForRemoval,
    ])
}

fn peer_with(names: &[(String, ItemState)]) -> Host {
    let mut host = Host::new("node1", HostRole::Peer, "/d/c/nodes/n1");
    for (index, (name, item_state)) in names.iter().enumerate() {
        let item_id = format!("svc{index}");
        host = host.with_service(
            Service::new(
                &item_id,
                format!("/d/c/nodes/n1/services/{item_id}"),
                ServiceKind::Lsb,
                name,
            )
            .in_state(*item_state),
        );
    }
    host
}

fn build_model(names: &[(String, ItemState)]) -> Model {
    ModelBuilder::new()
        .peer(peer_with(names))
        .build()
        .expect("generated item ids are unique")
}

proptest! {
    /// One violation per service name declared more than once (ignoring
    /// for-removal declarations), never more, never fewer.
    #[test]
    fn one_violation_per_duplicated_name(names in vec((service_name(), state()), 0..12)) {
        let model = build_model(&names);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (name, item_state) in &names {
            if !item_state.is_for_removal() {
                *counts.entry(name.as_str()).or_default() += 1;
            }
        }
        let expected = counts.values().filter(|&&n| n > 1).count();

        let validator = Validator::new(ValidationPolicy::default());
        let duplicates = validator
            .validate(&model)
            .into_iter()
            .filter(|v| v.message.starts_with("Duplicate service"))
            .count();
        prop_assert_eq!(duplicates, expected);
    }

    /// Synthesis over an unchanged snapshot is descriptor-for-descriptor
    /// identical across calls.
    #[test]
    fn synthesis_is_deterministic(names in vec((service_name(), state()), 0..12)) {
        let model = build_model(&names);
        let synthesizer = TaskSynthesizer::new();
        prop_assert_eq!(
            synthesizer.create_configuration(&model),
            synthesizer.create_configuration(&model)
        );
    }

    /// Every emitted task targets a declaration in an actionable state;
    /// applied declarations never produce tasks.
    #[test]
    fn applied_declarations_emit_nothing(names in vec((service_name(), state()), 0..12)) {
        let model = build_model(&names);
        let actionable = names
            .iter()
            .filter(|(_, s)| !s.is_applied())
            .count();
        let tasks = TaskSynthesizer::new().create_configuration(&model);
        prop_assert_eq!(tasks.len(), actionable);
    }
}
