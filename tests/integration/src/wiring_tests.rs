//! Bean wiring and lifecycle scenarios.

use pretty_assertions::assert_eq;
use serde_json::json;
use wire_core::{Configurator, Error, MapKey};
use wire_test_utils::{
    BeanWithMap, ChildBean, EnumBean, FailingHookBean, FakeClient, Flavor, ParentBean, SimpleBean,
    TestBean, test_registry,
};
use wire_tree::Node;

fn node(value: serde_json::Value) -> Node {
    Node::from_json(value).unwrap()
}

fn session_with(root: serde_json::Value) -> Configurator {
    Configurator::with_root(node(root), test_registry())
}

#[test]
fn wires_boxed_boolean() {
    let mut session = session_with(json!({"obj_boolean": true}));
    let bean = session.wire_root(TestBean::default()).unwrap();
    assert_eq!(bean.obj_boolean, Some(true));
}

#[test]
fn wires_primitive_boolean() {
    let mut session = session_with(json!({"prim_boolean": true}));
    let bean = session.wire_root(TestBean::default()).unwrap();
    assert!(bean.prim_boolean);
}

#[test]
fn absent_slots_keep_their_defaults() {
    let mut session = session_with(json!({"prim_integer": 3}));
    let bean = session.wire_root(TestBean::default()).unwrap();
    assert_eq!(bean.prim_integer, 3);
    assert_eq!(bean.obj_boolean, None);
    assert!(!bean.prim_boolean);
    assert_eq!(bean.prim_double, 0.0);
}

#[test]
fn empty_scope_skips_injection_but_initializes() {
    let mut session = Configurator::new(test_registry());
    let client = session.wire_root(FakeClient::default()).unwrap();

    let mut expected = FakeClient::default();
    expected.initialized = true;
    assert_eq!(client, expected);
}

#[test]
fn explicit_empty_scope_behaves_like_the_empty_root() {
    let mut session = session_with(json!({"secret_key": "ignored-by-this-call"}));
    let client = session.wire(&Node::empty(), FakeClient::default()).unwrap();
    assert_eq!(client.secret_key, None);
    assert!(client.initialized);
}

#[test]
fn full_client_config_wires_every_slot() {
    let mut session = session_with(json!({
        "secret_key": "NF2v7zNwzdEEfOVpgrYGSQRJmxXEALOz",
        "access_key": "9MALAVRPG4QP1IBJ5DLV",
        "url": "https://www.example.com",
        "proxy_host": "localhost",
        "proxy_port": 3128
    }));
    let client = session.wire_root(FakeClient::default()).unwrap();

    assert_eq!(client.secret_key.as_deref(), Some("NF2v7zNwzdEEfOVpgrYGSQRJmxXEALOz"));
    assert_eq!(client.access_key.as_deref(), Some("9MALAVRPG4QP1IBJ5DLV"));
    assert_eq!(client.url.as_deref(), Some("https://www.example.com"));
    assert_eq!(client.proxy_host.as_deref(), Some("localhost"));
    assert_eq!(client.proxy_port, 3128);
    // untouched slot keeps its default
    assert_eq!(client.api_version, "v1");
    assert!(client.initialized);
}

#[test]
fn wiring_twice_with_the_same_scope_is_idempotent() {
    let mut session = session_with(json!({
        "access_key": "key",
        "proxy_port": 3128
    }));
    let once = session.wire_root(FakeClient::default()).unwrap();
    let twice = session.wire_root(once.clone()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn enum_slot_resolves_by_variant_name() {
    let mut session = session_with(json!({"value": "foo"}));
    let bean = session.wire_root(EnumBean::default()).unwrap();
    assert_eq!(bean.value, Some(Flavor::Foo));
}

#[test]
fn unknown_enum_variant_fails_by_name() {
    let mut session = session_with(json!({"value": "quux"}));
    let err = session.wire_root(EnumBean::default()).unwrap_err();
    match err {
        Error::UnknownEnumVariant { name, target } => {
            assert_eq!(name, "quux");
            assert_eq!(target, "test.Flavor");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn map_slot_wires_from_object_entries() {
    let mut session = session_with(json!({
        "map": {
            "blah": {"~type": "test.SimpleBean", "value": "blah1"}
        }
    }));
    let bean = session.wire_root(BeanWithMap::default()).unwrap();
    let map = bean.map.unwrap();
    let inner = map
        .get(&MapKey::from("blah"))
        .unwrap()
        .as_object()
        .unwrap()
        .downcast_ref::<SimpleBean>()
        .unwrap();
    assert_eq!(inner.value.as_deref(), Some("blah1"));
}

#[test]
fn map_slot_wires_from_pair_list() {
    // the list form is the only way to spell a non-string key
    let mut session = session_with(json!({
        "map": ["blah", {"~type": "test.SimpleBean", "value": "blah1"}]
    }));
    let bean = session.wire_root(BeanWithMap::default()).unwrap();
    let map = bean.map.unwrap();
    let inner = map
        .get(&MapKey::from("blah"))
        .unwrap()
        .as_object()
        .unwrap()
        .downcast_ref::<SimpleBean>()
        .unwrap();
    assert_eq!(inner.value.as_deref(), Some("blah1"));
}

#[test]
fn nested_bean_slot_constructs_from_type_marker() {
    let mut session = session_with(json!({"obj": {"~type": "test.ChildBean"}}));
    let bean = session.wire_root(ParentBean::default()).unwrap();
    let obj = bean.obj.unwrap();
    assert_eq!(obj.type_name(), "test.ChildBean");
    assert!(obj.downcast_ref::<ChildBean>().is_some());
}

#[test]
fn missing_path_for_primitive_slot_is_silently_skipped() {
    // absent paths are skipped before coercion, even for primitives
    let mut session = session_with(json!({"obj_boolean": false}));
    let bean = session.wire_root(TestBean::default()).unwrap();
    assert_eq!(bean.prim_integer, 0);
}

#[test]
fn slot_resolution_failure_aborts_wiring() {
    // a list where a scalar slot is declared cannot coerce
    let mut session = session_with(json!({"prim_integer": ["not", "an", "int"]}));
    let err = session.wire_root(TestBean::default()).unwrap_err();
    assert!(matches!(err, Error::ValueKind { .. }));
}

#[test]
fn hook_failure_is_wrapped_and_raised() {
    let mut session = Configurator::new(test_registry());
    let err = session.wire_root(FailingHookBean).unwrap_err();
    match err {
        Error::LifecycleHook { type_name, source } => {
            assert_eq!(type_name, "test.FailingHookBean");
            assert_eq!(source.to_string(), "intentional hook failure");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn wire_requires_an_object_scope() {
    let mut session = Configurator::new(test_registry());
    let err = session
        .wire(&Node::Str("flat".into()), SimpleBean::default())
        .unwrap_err();
    assert!(matches!(err, Error::ValueKind { .. }));
}

#[test]
fn double_slot_accepts_integer_literal() {
    let mut session = session_with(json!({"prim_double": 4}));
    let bean = session.wire_root(TestBean::default()).unwrap();
    assert_eq!(bean.prim_double, 4.0);
}

#[test]
fn scalar_leaf_coerces_to_the_declared_string_type() {
    // an unquoted number wired into a string slot renders as text
    let mut session = session_with(json!({"value": 42}));
    let bean = session.wire_root(SimpleBean::default()).unwrap();
    assert_eq!(bean.value.as_deref(), Some("42"));
}
