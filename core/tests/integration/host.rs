use pretty_assertions::assert_eq;
use pyval_core::{serialize, Dict, List, Sequence, Tuple, Value};
use serde_json::json;

#[test]
fn nested_containers() {
    let mut inner = Dict::new();
    inner.set(Value::from("t"), Value::from(Tuple::from(super::ints(&[1, 2])))).unwrap();
    inner.set(Value::None, Value::Bool(true)).unwrap();

    let outer = List::from(vec![Value::from(inner), Value::Float(1.5), Value::from("s")]);

    assert_eq!(
        outer.to_host().unwrap(),
        json!([{ "t": [1, 2], "None": true }, 1.5, "s"])
    );
}

#[test]
fn from_host_builds_values() {
    let value = serialize::from_host(json!({ "xs": [1, 2], "name": "n" }));

    assert_eq!(value.len(), Ok(2));
    assert_eq!(
        value.get_item(&Value::from("xs")),
        Ok(Value::from(List::from(super::ints(&[1, 2]))))
    );
}
