//! Reference resolution: the `var` cache, namespace dispatch, and the
//! failure modes around both.

use pretty_assertions::assert_eq;
use serde_json::json;
use wire_core::{Configurator, Error, TargetType, Value};
use wire_test_utils::{RecordingHandler, SimpleBean, TestBean, test_registry};
use wire_tree::Node;

fn node(value: serde_json::Value) -> Node {
    Node::from_json(value).unwrap()
}

fn session_with(root: serde_json::Value) -> Configurator {
    Configurator::with_root(node(root), test_registry())
}

#[test]
fn references_resolve_exactly_one_hop() {
    // var.obj holds the literal string "var.blah"; dereferencing ptr1 must
    // not chase that value as a further reference
    let mut session = session_with(json!({
        "var": {
            "blah": "indirect",
            "obj": "var.blah",
            "ptr1": {"~ref": "var.obj"},
            "ptr2": {"~ref": "var.obj"},
            "ptr3": {"~ref": "var.blah"}
        }
    }));
    let var = session.root().get_object_node("var").unwrap().clone();

    let ptr1 = session
        .get_object(&var, "ptr1", Some(&TargetType::string()))
        .unwrap();
    let ptr2 = session
        .get_object(&var, "ptr2", Some(&TargetType::string()))
        .unwrap();
    let ptr3 = session
        .get_object(&var, "ptr3", Some(&TargetType::string()))
        .unwrap();

    assert_eq!(ptr1.as_str(), Some("var.blah"));
    assert_eq!(ptr2.as_str(), Some("var.blah"));
    assert_eq!(ptr3.as_str(), Some("indirect"));
}

#[test]
fn var_cache_preserves_object_identity() {
    let mut session = session_with(json!({
        "var": {
            "obj": {"~type": "test.SimpleBean", "value": "shared"},
            "ptr1": {"~ref": "var.obj"},
            "ptr2": {"~ref": "var.obj"}
        }
    }));
    let var = session.root().get_object_node("var").unwrap().clone();

    let ptr1 = session.get_object(&var, "ptr1", None).unwrap();
    let ptr2 = session.get_object(&var, "ptr2", None).unwrap();

    let first = ptr1.as_object().unwrap();
    let second = ptr2.as_object().unwrap();
    assert!(first.ptr_eq(second));
    assert_eq!(
        first.downcast_ref::<SimpleBean>().unwrap().value.as_deref(),
        Some("shared")
    );
}

#[test]
fn reference_key_needs_a_namespace() {
    let mut session = session_with(json!({
        "blah": "blah",
        "var": {"ptr1": {"~ref": "blah"}}
    }));
    let var = session.root().get_object_node("var").unwrap().clone();
    let err = session
        .get_object(&var, "ptr1", Some(&TargetType::string()))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected reference key to have at least 2 parts in [blah]"
    );
}

#[test]
fn unregistered_namespace_fails_by_name() {
    let mut session = session_with(json!({
        "blah": {"ptr": "blah"},
        "var": {"ptr1": {"~ref": "blah.ptr"}}
    }));
    let var = session.root().get_object_node("var").unwrap().clone();
    let err = session
        .get_object(&var, "ptr1", Some(&TargetType::string()))
        .unwrap_err();
    assert_eq!(err.to_string(), "cannot find reference handler named 'blah'");
}

#[test]
fn handler_receives_the_declared_slot_type() {
    let mut session = session_with(json!({"value": {"~ref": "blah.ptr"}}));
    let handler = RecordingHandler::replying(Value::Str("heyo".into()));
    let calls = handler.calls();
    session.add_handler("blah", handler);

    let bean = session.wire_root(SimpleBean::default()).unwrap();

    assert_eq!(bean.value.as_deref(), Some("heyo"));
    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].original_key, "blah.ptr");
    assert_eq!(calls[0].remainder, "ptr");
    assert_eq!(calls[0].target.as_deref(), Some("string"));
}

#[test]
fn null_resolution_for_primitive_slot_fails() {
    let mut session = session_with(json!({"prim_integer": {"~ref": "blah.ptr"}}));
    session.add_handler("blah", RecordingHandler::replying(Value::Null));

    let err = session.wire_root(TestBean::default()).unwrap_err();
    match err {
        Error::NullPrimitive {
            key,
            namespace,
            target,
        } => {
            assert_eq!(key, "blah.ptr");
            assert_eq!(namespace, "blah");
            assert_eq!(target, "int");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn null_resolution_for_boxed_slot_is_allowed() {
    let mut session = session_with(json!({"obj_boolean": {"~ref": "blah.ptr"}}));
    session.add_handler("blah", RecordingHandler::replying(Value::Null));

    let bean = session.wire_root(TestBean::default()).unwrap();
    assert_eq!(bean.obj_boolean, None);
}

#[test]
fn reference_inside_constructor_args() {
    let mut session = session_with(json!({"var": {"ptr": "blah"}}));
    let config = node(json!({
        "~constructor": [{"~ref": "var.ptr", "~type": "string"}],
        "~type": "string"
    }));
    let value = session.construct(&config, None).unwrap();
    assert_eq!(value.as_str(), Some("blah"));
}

#[test]
fn type_marker_overrides_caller_type_on_references() {
    let mut session = session_with(json!({"var": {"n": 7}}));
    let config = node(json!({"~ref": "var.n", "~type": "int"}));
    // the caller asks for a string, but the in-node marker wins
    let value = session
        .construct(&config, Some(&TargetType::string()))
        .unwrap();
    assert!(matches!(value, Value::Int(7)));
}

#[test]
fn cached_value_survives_target_changes() {
    // the cache is keyed by the full reference string alone
    let mut session = session_with(json!({
        "var": {
            "n": 7,
            "a": {"~ref": "var.n", "~type": "int"},
            "b": {"~ref": "var.n"}
        }
    }));
    let var = session.root().get_object_node("var").unwrap().clone();
    assert!(matches!(
        session.get_object(&var, "a", None).unwrap(),
        Value::Int(7)
    ));
    assert!(matches!(
        session.get_object(&var, "b", Some(&TargetType::string())).unwrap(),
        Value::Int(7)
    ));
}

#[test]
fn clean_reaches_every_handler() {
    let mut session = session_with(json!({}));
    let first = RecordingHandler::replying(Value::Null);
    let second = RecordingHandler::replying(Value::Null);
    let first_count = first.clean_count();
    let second_count = second.clean_count();
    session.add_handler("one", first);
    session.add_handler("two", second);

    session.clean();

    assert_eq!(*first_count.borrow(), 1);
    assert_eq!(*second_count.borrow(), 1);
}

#[test]
fn handler_target_defaults_to_the_type_marker() {
    let mut session = session_with(json!({}));
    let handler = RecordingHandler::replying(Value::Int(1));
    let calls = handler.calls();
    session.add_handler("ext", handler);

    let config = node(json!({"~ref": "ext.key", "~type": "int"}));
    session.construct(&config, None).unwrap();

    assert_eq!(calls.borrow()[0].target.as_deref(), Some("int"));
}
