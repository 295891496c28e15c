use pyval_core::{Dict, List, Sequence, Slice, Text, Tuple, Value};

mod builtins;
mod host;
mod mapping;
mod text;

pub fn ints(xs: &[i64]) -> Vec<Value> {
    xs.iter().copied().map(Value::Int).collect()
}

pub fn strs(xs: &[&str]) -> Vec<Value> {
    xs.iter().copied().map(Value::from).collect()
}

#[test]
fn slicing_a_tuple_yields_a_tuple() {
    let t = Tuple::from(ints(&[1, 2, 3]));
    let sliced = t.get_item(&Slice::new(Some(1), None, None).into()).unwrap();

    assert_eq!(sliced, Value::from(Tuple::from(ints(&[2, 3]))));
}

#[test]
fn deleting_from_a_list() {
    let mut l = List::from(ints(&[1, 2, 3]));
    l.del_item(1).unwrap();

    assert_eq!(l, List::from(ints(&[1, 3])));
    assert_eq!(l.len(), 2);
}

#[test]
fn popping_from_a_mapping() {
    let mut d = Dict::from_pairs(vec![
        Value::from(Tuple::from(vec![Value::from("a"), Value::Int(1)])),
        Value::from(Tuple::from(vec![Value::from("b"), Value::Int(2)])),
    ])
    .unwrap();

    assert_eq!(d.pop(&Value::from("a"), None), Ok(Value::Int(1)));
    assert_eq!(d.contains(&Value::from("a")), Ok(false));
}

#[test]
fn stripping_text() {
    assert_eq!(Text::from("  hi  ").strip(None), Text::from("hi"));
}

#[test]
fn literal_split_keeps_empty_fields() {
    assert_eq!(
        Text::from("a,b,,c").split(Some(",")),
        Ok(List::from(strs(&["a", "b", "", "c"])))
    );
    assert_eq!(
        Text::from(" a  b ").split(None),
        Ok(List::from(strs(&["a", "b"])))
    );
}

#[test]
fn popping_an_empty_list() {
    let err = List::new().pop().unwrap_err();

    assert_eq!(err.kind(), pyval_core::ErrorKind::IndexError);
    assert_eq!(err.to_string(), "IndexError: pop from empty list");
}
