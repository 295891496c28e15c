use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use pyval_core::{
    builtins::{self, Builtins},
    Config, Error, List, Value,
};

fn flavors() -> [Builtins; 2] {
    [Builtins::default(), Builtins::new(Config::python3())]
}

#[test]
fn range_then_map_in_both_flavors() {
    for b in flavors() {
        let squares = b
            .map(
                |v| match v {
                    Value::Int(n) => Ok(Value::Int(n * n)),
                    other => Err(Error::TypeError(other.type_name().to_owned())),
                },
                &b.range(1, 4, 1).unwrap(),
            )
            .unwrap();

        let expected_tag = if b.config().python3 { "iterator" } else { "list" };
        assert_eq!(squares.type_name(), expected_tag);
        assert_eq!(
            builtins::list(&squares).unwrap(),
            List::from(super::ints(&[1, 4, 9]))
        );
    }
}

#[test]
fn python3_ranges_are_one_shot() {
    let b = Builtins::new(Config::python3());
    let Value::Iter(mut it) = b.range_to(2).unwrap() else {
        panic!("expected an iterator");
    };

    assert_eq!(it.by_ref().count(), 2);
    assert_eq!(it.next(), None);
}

#[test]
fn consuming_builtins_drain_an_iterator() {
    let it = builtins::xrange(10, 0, -3).unwrap();

    assert_eq!(builtins::sum(&it, Value::Int(0)), Ok(Value::Int(22)));
    assert_matches!(
        builtins::min(&it),
        Err(Error::ValueError(msg)) if msg == "min() arg is an empty sequence"
    );
    assert_matches!(builtins::max(&it), Err(Error::ValueError(_)));
}

#[test]
fn draining_a_python3_range_twice() {
    let b = Builtins::new(Config::python3());
    let r = b.range_to(3).unwrap();

    assert_eq!(
        builtins::list(&r).unwrap(),
        List::from(super::ints(&[0, 1, 2]))
    );
    assert_eq!(builtins::list(&r).unwrap(), List::new());
    assert_eq!(builtins::sorted(&r).unwrap(), List::new());
}

#[test]
fn iter_of_an_iterator_aliases_it() {
    let r = Builtins::new(Config::python3()).range_to(3).unwrap();
    let mut alias = builtins::iter(&r).unwrap();

    assert_eq!(alias.next(), Some(Value::Int(0)));
    assert_eq!(
        builtins::list(&r).unwrap(),
        List::from(super::ints(&[1, 2]))
    );
    assert_eq!(alias.next(), None);
}

#[test]
fn zip_of_an_iterator_with_itself() {
    let r = Builtins::new(Config::python3()).range_to(3).unwrap();
    let pairs = builtins::zip(&[r.clone(), r]).unwrap();

    assert_eq!(pairs.to_string(), "[(0, 1)]");
}

#[test]
fn zip_and_dict() {
    let keys = Value::from(List::from(super::strs(&["a", "b", "c"])));
    let values = builtins::xrange(0, 2, 1).unwrap();
    let pairs = builtins::zip(&[keys, values]).unwrap();
    let d = builtins::dict(&Value::from(pairs)).unwrap();

    assert_eq!(d.to_string(), "{a: 0, b: 1}");
}

#[test]
fn not_iterable() {
    assert_matches!(
        builtins::sum(&Value::Int(3), Value::Int(0)),
        Err(Error::NotIterable("int"))
    );
    assert_matches!(
        builtins::zip(&[Value::None]),
        Err(Error::NotIterable("NoneType"))
    );
}
