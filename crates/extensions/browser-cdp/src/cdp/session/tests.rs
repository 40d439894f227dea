use easyapply_protocols::Key;
use serde_json::json;

use super::core::PageSession;
use super::js::{array_items, call_params};
use crate::cdp::protocol::PropertyDescriptor;

#[test]
fn test_quad_center() {
    let quad = vec![0.0, 0.0, 100.0, 0.0, 100.0, 100.0, 0.0, 100.0];
    let (x, y) = PageSession::quad_center(&quad);
    assert_eq!(x, 50.0);
    assert_eq!(y, 50.0);
}

#[test]
fn test_quad_center_short_quad() {
    assert_eq!(PageSession::quad_center(&[1.0, 2.0]), (0.0, 0.0));
}

#[test]
fn test_enter_key_events() {
    let down = PageSession::key_event(Key::Enter, true);
    assert_eq!(down["type"], "keyDown");
    assert_eq!(down["key"], "Enter");
    assert_eq!(down["code"], "Enter");
    assert_eq!(down["windowsVirtualKeyCode"], 13);
    assert_eq!(down["text"], "\r");

    let up = PageSession::key_event(Key::Enter, false);
    assert_eq!(up["type"], "keyUp");
    assert!(up.get("text").is_none());
}

#[test]
fn test_tab_key_has_no_text() {
    let down = PageSession::key_event(Key::Tab, true);
    assert_eq!(down["type"], "rawKeyDown");
    assert_eq!(down["windowsVirtualKeyCode"], 9);
    assert!(down.get("text").is_none());
}

#[test]
fn test_call_params_wrap_arguments() {
    let params = call_params("obj-1", "function(a, b) {}", vec![json!("css"), json!("#x")], false);
    assert_eq!(params["objectId"], "obj-1");
    assert_eq!(params["returnByValue"], false);
    assert_eq!(params["arguments"][0]["value"], "css");
    assert_eq!(params["arguments"][1]["value"], "#x");
}

#[test]
fn test_array_items_in_index_order() {
    let props: Vec<PropertyDescriptor> = serde_json::from_value(json!([
        {"name": "length", "value": {"type": "number", "value": 3}},
        {"name": "10", "value": {"type": "object", "subtype": "node", "objectId": "c"}},
        {"name": "2", "value": {"type": "object", "subtype": "node", "objectId": "b"}},
        {"name": "0", "value": {"type": "object", "subtype": "node", "objectId": "a"}},
        {"name": "1", "value": {"type": "object", "subtype": "null"}},
        {"name": "__proto__", "value": {"type": "object", "objectId": "proto"}}
    ]))
    .unwrap();

    let ids: Vec<String> = array_items(props)
        .into_iter()
        .filter_map(|(_, obj)| obj.object_id)
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}
