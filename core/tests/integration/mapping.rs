use assert_matches::assert_matches;
use pyval_core::{Dict, Error, Iterable, List, Tuple, Value};

#[test]
fn iteration_follows_insertion_order() {
    let mut d = Dict::new();
    for key in ["zeta", "alpha", "mu"] {
        d.set(Value::from(key), Value::Int(key.len() as i64)).unwrap();
    }
    d.delete(&Value::from("alpha")).unwrap();
    d.set(Value::from("alpha"), Value::Int(0)).unwrap();

    let keys: Vec<Value> = d.py_iter().collect();
    assert_eq!(keys, super::strs(&["zeta", "mu", "alpha"]));
}

#[test]
fn tuple_keys() {
    let mut d = Dict::new();
    let point = Value::from(Tuple::from(super::ints(&[1, 2])));

    d.set(point.clone(), Value::from("p")).unwrap();
    assert_eq!(d.get(&point), Ok(&Value::from("p")));
    assert_eq!(
        d.get(&Value::from(Tuple::from(vec![Value::Float(1.0), Value::Int(2)]))),
        Ok(&Value::from("p"))
    );

    let unhashable = Value::from(Tuple::from(vec![Value::from(List::new())]));
    assert_matches!(d.set(unhashable.clone(), Value::None), Err(Error::TypeError(_)));
    assert_matches!(d.get(&unhashable), Err(Error::TypeError(_)));
    assert_matches!(d.contains(&unhashable), Err(Error::TypeError(_)));
}

#[test]
fn get_with_default() {
    let d = Dict::new();

    assert_eq!(
        d.get_or(&Value::from("missing"), Value::Int(0)),
        Ok(Value::Int(0))
    );
    assert_eq!(
        d.get(&Value::from("missing")).unwrap_err().to_string(),
        "KeyError: missing"
    );
}

#[test]
fn mutation_through_values() {
    let mut v = Value::from(Dict::new());

    v.set_item(&Value::from("k"), Value::Int(1)).unwrap();
    v.as_dict_mut().unwrap().set(Value::from("j"), Value::Int(2)).unwrap();
    assert_eq!(v.len(), Ok(2));
    assert_eq!(v.get_item(&Value::from("k")), Ok(Value::Int(1)));
    assert_eq!(v.contains(&Value::from("j")), Ok(true));

    v.del_item(&Value::from("k")).unwrap();
    assert_matches!(v.get_item(&Value::from("k")), Err(Error::KeyError(_)));
}

#[test]
fn unhashable() {
    assert_eq!(
        Dict::new().py_hash().unwrap_err().to_string(),
        "TypeError: unhashable type: 'dict'"
    );
}
