use pyval_core::{Iterable, List, Sequence, Slice, Text, Value};

#[test]
fn split_then_join_restores_the_text() {
    for input in ["a,b,c", "one", "x,yy,zzz,w"] {
        let text = Text::from(input);
        let comma = Text::from(",");
        let parts = text.split(Some(",")).unwrap();

        assert_eq!(comma.join(parts).unwrap(), text);
    }
}

#[test]
fn join_accepts_any_iterable() {
    let parts = Value::from(List::from(super::strs(&["a", "b"])));
    let joined = Text::from("-").join(parts.iter().unwrap()).unwrap();

    assert_eq!(joined, Text::from("a-b"));
    assert_eq!(
        Text::from("").join(Text::from("xyz").py_iter()).unwrap(),
        Text::from("xyz")
    );
}

#[test]
fn find_family_agrees() {
    let text = Text::from("mississippi");

    assert_eq!(text.find("ss"), 2);
    assert_eq!(text.rfind("ss"), 5);
    assert_eq!(text.index("ss", Some(3), None), Ok(5));
    assert_eq!(text.count("ss", None, None), 2);
    assert_eq!(text.count("i", Some(-4), None), 2);
}

#[test]
fn slicing_with_strides() {
    let text = Text::from("abcdef");
    let value = Value::from(text.clone());

    assert_eq!(
        value.get_item(&Slice::new(None, None, Some(2)).into()),
        Ok(Value::from("ace"))
    );
    assert_eq!(
        value.get_item(&Slice::new(Some(4), Some(1), Some(-1)).into()),
        Ok(Value::from("edc"))
    );
    assert_eq!(value.get_item(&Value::Int(-1)), Ok(Value::from("f")));
    assert_eq!(text.get(-1).map(|t| t.len()), Ok(1));
    assert_eq!(Value::from("abc").len(), Ok(3));
    assert_eq!(List::from(super::strs(&["x"])).len(), 1);
}
