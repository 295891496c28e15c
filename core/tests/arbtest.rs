use arbitrary::Unstructured;
use arbtest::{arbitrary, arbtest};
use pyval_core::{Dict, Iterable, List, Sequence, Slice, Text, Tuple, Value};

#[derive(arbitrary::Arbitrary, Debug)]
enum ListOp {
    Append(i64),
    Insert(i64, i64),
    Pop,
    SetItem(i64, i64),
    DelItem(i64),
    DelSlice(Option<i64>, Option<i64>, Option<i64>),
    Reverse,
    Sort,
}

impl ListOp {
    fn apply_to_vec(&self, vec: &mut Vec<i64>) {
        match self {
            ListOp::Append(x) => vec.push(*x),
            ListOp::Insert(i, x) => {
                let len = vec.len() as i64;
                let i = if *i < 0 { i.saturating_add(len) } else { *i };
                vec.insert(i.clamp(0, len) as usize, *x);
            }
            ListOp::Pop => {
                vec.pop();
            }
            ListOp::SetItem(i, x) => {
                if let Some(i) = resolve(*i, vec.len()) {
                    vec[i] = *x;
                }
            }
            ListOp::DelItem(i) => {
                if let Some(i) = resolve(*i, vec.len()) {
                    vec.remove(i);
                }
            }
            ListOp::DelSlice(start, stop, step) => {
                if *step == Some(0) {
                    return;
                }
                let doomed = python_slice(vec.len(), *start, *stop, *step);
                let mut position = 0;
                vec.retain(|_| {
                    let keep = !doomed.contains(&position);
                    position += 1;
                    keep
                });
            }
            ListOp::Reverse => vec.reverse(),
            ListOp::Sort => vec.sort(),
        }
    }

    fn apply_to_list(&self, list: &mut List) {
        match self {
            ListOp::Append(x) => list.append(Value::Int(*x)),
            ListOp::Insert(i, x) => list.insert(*i, Value::Int(*x)),
            ListOp::Pop => {
                let _ = list.pop();
            }
            ListOp::SetItem(i, x) => {
                let _ = list.set_item(*i, Value::Int(*x));
            }
            ListOp::DelItem(i) => {
                let _ = list.del_item(*i);
            }
            ListOp::DelSlice(start, stop, step) => {
                let _ = list.del_slice(&Slice::new(*start, *stop, *step));
            }
            ListOp::Reverse => list.reverse(),
            ListOp::Sort => list.sort(),
        }
    }
}

fn resolve(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };
    (0..len).contains(&index).then_some(index as usize)
}

/// The positions selected by `seq[start:stop:step]`, computed the way CPython's
/// `PySlice_AdjustIndices` does.
fn python_slice(
    len: usize,
    start: Option<i64>,
    stop: Option<i64>,
    step: Option<i64>,
) -> Vec<usize> {
    let len = len as i128;
    let step = i128::from(step.unwrap_or(1));
    let adjust = |bound: Option<i64>, default: i128| -> i128 {
        match bound {
            None => default,
            Some(b) => {
                let b = i128::from(b);
                if b < 0 {
                    (b + len).max(if step < 0 { -1 } else { 0 })
                } else if b >= len {
                    if step < 0 {
                        len - 1
                    } else {
                        len
                    }
                } else {
                    b
                }
            }
        }
    };

    let (start, stop) = if step > 0 {
        (adjust(start, 0), adjust(stop, len))
    } else {
        (adjust(start, len - 1), adjust(stop, -1))
    };

    let mut positions = Vec::new();
    let mut i = start;
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        positions.push(i as usize);
        i += step;
    }

    positions
}

// u.arbitrary() generates very short vecs by default:
// https://github.com/matklad/arbtest/issues/8
fn arb_vec(u: &mut Unstructured<'_>) -> arbitrary::Result<Vec<i64>> {
    let len = u.arbitrary_len::<i64>()?;
    std::iter::from_fn(|| Some(u.arbitrary::<i64>()))
        .take(len)
        .collect()
}

fn small_bound(u: &mut Unstructured<'_>) -> arbitrary::Result<Option<i64>> {
    let bound: Option<i8> = u.arbitrary()?;
    Ok(bound.map(i64::from))
}

fn to_values(xs: &[i64]) -> Vec<Value> {
    xs.iter().copied().map(Value::Int).collect()
}

#[test]
fn list_mutations() {
    arbtest(|u| {
        let mut vec = arb_vec(u)?;
        let mut list = List::from(to_values(&vec));
        let ops: Vec<ListOp> = u.arbitrary()?;

        for op in ops {
            op.apply_to_vec(&mut vec);
            op.apply_to_list(&mut list);

            assert_eq!(list.len(), vec.len());
            assert_eq!(list, List::from(to_values(&vec)));
        }

        Ok(())
    });
}

#[test]
fn slices_select_like_python() {
    arbtest(|u| {
        let vec = arb_vec(u)?;
        let (start, stop) = (small_bound(u)?, small_bound(u)?);
        let step = small_bound(u)?.filter(|&s| s != 0);
        let tuple = Tuple::from(to_values(&vec));

        let expected: Vec<Value> = python_slice(vec.len(), start, stop, step)
            .into_iter()
            .map(|i| Value::Int(vec[i]))
            .collect();
        let sliced = tuple.slice(&Slice::new(start, stop, step)).unwrap();

        assert_eq!(sliced.items(), expected.as_slice());

        Ok(())
    });
}

#[test]
fn indexing_agrees_with_iteration() {
    arbtest(|u| {
        let vec = arb_vec(u)?;
        let list = List::from(to_values(&vec));
        let len = list.len() as i64;

        for (i, item) in list.py_iter().enumerate() {
            assert_eq!(list.get(i as i64), Ok(&item));
            assert_eq!(list.get(i as i64 - len), Ok(&item));
        }
        assert!(list.get(len).is_err());

        Ok(())
    });
}

#[test]
fn equal_tuples_hash_equal() {
    arbtest(|u| {
        let vec = arb_vec(u)?;
        let ints = Tuple::from(to_values(&vec));
        let floats: Tuple = vec
            .iter()
            .map(|&x| {
                if x.unsigned_abs() < 1 << 53 {
                    Value::Float(x as f64)
                } else {
                    Value::Int(x)
                }
            })
            .collect();

        assert_eq!(ints, floats);
        let hash = Value::from(ints).py_hash().unwrap();
        assert_eq!(Ok(hash), Value::from(floats).py_hash());
        assert_ne!(hash, -1);

        Ok(())
    });
}

#[test]
fn text_hash_is_never_the_sentinel() {
    arbtest(|u| {
        let s: String = u.arbitrary()?;
        assert_ne!(Text::from(s).py_hash(), -1);

        Ok(())
    });
}

#[test]
fn split_join_round_trip() {
    arbtest(|u| {
        let fields: Vec<String> = u.arbitrary()?;
        let fields: Vec<String> = fields
            .into_iter()
            .map(|f| f.replace(',', ""))
            .filter(|f| !f.is_empty())
            .collect();
        if fields.is_empty() {
            return Ok(());
        }

        let text = Text::from(fields.join(","));
        let comma = Text::from(",");
        let parts = text.split(Some(",")).unwrap();

        assert_eq!(parts.len(), fields.len());
        assert_eq!(comma.join(parts).unwrap(), text);

        Ok(())
    });
}

#[test]
fn dict_matches_a_model() {
    arbtest(|u| {
        let ops: Vec<(u8, bool)> = u.arbitrary()?;
        let mut dict = Dict::new();
        let mut model: Vec<(u8, usize)> = Vec::new();

        for (position, (key, insert)) in ops.into_iter().enumerate() {
            let k = Value::Int(i64::from(key));
            if insert {
                dict.set(k, Value::Int(position as i64)).unwrap();
                match model.iter_mut().find(|(mk, _)| *mk == key) {
                    Some(entry) => entry.1 = position,
                    None => model.push((key, position)),
                }
            } else {
                let removed = dict.delete(&k).is_ok();
                let found = model.iter().position(|(mk, _)| *mk == key);
                assert_eq!(removed, found.is_some());
                if let Some(i) = found {
                    model.remove(i);
                }
            }
        }

        let expected: Vec<Value> = model
            .iter()
            .map(|(k, _)| Value::Int(i64::from(*k)))
            .collect();
        assert_eq!(dict.keys(), List::from(expected));
        for (k, v) in &model {
            assert_eq!(
                dict.get(&Value::Int(i64::from(*k))),
                Ok(&Value::Int(*v as i64))
            );
        }

        Ok(())
    });
}
