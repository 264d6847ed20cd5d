//! Environment layering driven end-to-end: layered trees feeding the
//! construction engine, and config files loaded from disk.

use pretty_assertions::assert_eq;
use wire_core::Configurator;
use wire_test_utils::{FakeClient, test_registry};
use wire_tree::{Node, layers};

#[test]
fn environment_section_overrides_shared_defaults() {
    let root = Node::from_json_str(
        r#"{
            "all": {"var": {"blah": "all"}},
            "qa": {"var": {"blah": "qa"}}
        }"#,
    )
    .unwrap();
    let layered = layers::layered(&root, "qa").unwrap();
    assert_eq!(layered.get_str("var.blah").unwrap(), "qa");
}

#[test]
fn layered_tree_drives_bean_wiring() {
    let root = Node::from_json_str(
        r#"{
            "all": {
                "access_key": "shared-access",
                "proxy_host": "proxy.internal",
                "proxy_port": 8080
            },
            "prd": {
                "access_key": "prd-access",
                "proxy_port": 3128
            }
        }"#,
    )
    .unwrap();
    let layered = layers::layered(&root, "prd").unwrap();
    let mut session = Configurator::with_root(layered, test_registry());
    let client = session.wire_root(FakeClient::default()).unwrap();

    assert_eq!(client.access_key.as_deref(), Some("prd-access"));
    assert_eq!(client.proxy_host.as_deref(), Some("proxy.internal"));
    assert_eq!(client.proxy_port, 3128);
    assert!(client.initialized);
}

#[test]
fn toml_config_file_loads_and_layers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("client.toml");
    std::fs::write(
        &path,
        r#"
[all]
access_key = "shared"
proxy_port = 8080

[qa]
access_key = "qa-access"
"#,
    )
    .unwrap();

    let root = Node::load(&path).unwrap();
    let layered = layers::layered(&root, "qa").unwrap();
    let mut session = Configurator::with_root(layered, test_registry());
    let client = session.wire_root(FakeClient::default()).unwrap();

    assert_eq!(client.access_key.as_deref(), Some("qa-access"));
    assert_eq!(client.proxy_port, 8080);
}

#[test]
fn missing_environment_section_is_an_error() {
    let root = Node::from_json_str(r#"{"all": {}}"#).unwrap();
    assert!(layers::layered(&root, "prd").is_err());
}
