//! The builtin functions generated code calls into.
//!
//! Functions whose result depends on the language flavor (lists in Python 2,
//! iterators in Python 3) are methods of [`Builtins`], which carries the
//! [`Config`]. The others are plain functions of this module.

use std::cmp::Ordering;

use crate::{
    config::Config,
    error::{Error, Result},
    iter::{self, PyIter},
    value::{Dict, List, Text, Tuple, Value},
};

/// The flavor-dependent builtins.
#[derive(Clone, Debug, Default)]
pub struct Builtins {
    config: Config,
}

impl Builtins {
    pub fn new(config: Config) -> Self {
        Builtins { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `range(start, stop, step)`. A zero step is a `ValueError`.
    pub fn range(&self, start: i64, stop: i64, step: i64) -> Result<Value> {
        let items = arithmetic_progression(start, stop, step)?;
        Ok(self.wrap(items))
    }

    /// The one-argument form `range(stop)`.
    pub fn range_to(&self, stop: i64) -> Result<Value> {
        self.range(0, stop, 1)
    }

    /// Apply `f` to every item of `iterable`.
    ///
    /// `f` runs over all items before this returns, in both flavors, and its
    /// first error is propagated.
    pub fn map<F>(&self, mut f: F, iterable: &Value) -> Result<Value>
    where
        F: FnMut(Value) -> Result<Value>,
    {
        let items = iterable
            .iter()?
            .map(&mut f)
            .collect::<Result<Vec<_>>>()?;

        Ok(self.wrap(items))
    }

    fn wrap(&self, items: Vec<Value>) -> Value {
        if self.config.python3 {
            log::debug!("producing an iterator over {} items", items.len());
            Value::Iter(PyIter::new(items))
        } else {
            log::debug!("producing a list of {} items", items.len());
            Value::List(items.into())
        }
    }
}

fn arithmetic_progression(start: i64, stop: i64, step: i64) -> Result<Vec<Value>> {
    if step == 0 {
        return Err(Error::ValueError(
            "range() arg 3 must not be zero".to_owned(),
        ));
    }

    let mut items = Vec::new();
    let mut cursor = Some(start);

    while let Some(i) = cursor {
        if (step > 0 && i >= stop) || (step < 0 && i <= stop) {
            break;
        }
        items.push(Value::Int(i));
        cursor = i.checked_add(step);
    }

    Ok(items)
}

/// `xrange(start, stop, step)`, which is always lazy.
pub fn xrange(start: i64, stop: i64, step: i64) -> Result<Value> {
    Ok(Value::Iter(PyIter::new(arithmetic_progression(
        start, stop, step,
    )?)))
}

/// Tuples of the items at the same position in each iterable, up to the length
/// of the shortest one.
pub fn zip(iterables: &[Value]) -> Result<List> {
    let mut iters = iterables
        .iter()
        .map(Value::iter)
        .collect::<Result<Vec<_>>>()?;

    if iters.is_empty() {
        return Ok(List::new());
    }

    let mut zipped = List::new();
    loop {
        let row: Option<Vec<Value>> = iters.iter_mut().map(Iterator::next).collect();
        match row {
            Some(row) => zipped.append(Tuple::from(row).into()),
            None => return Ok(zipped),
        }
    }
}

/// The smallest item under [`Value::py_cmp`], the first one on ties.
pub fn min(iterable: &Value) -> Result<Value> {
    extremum(iterable, Ordering::Less, "min")
}

/// The largest item under [`Value::py_cmp`], the first one on ties.
pub fn max(iterable: &Value) -> Result<Value> {
    extremum(iterable, Ordering::Greater, "max")
}

fn extremum(iterable: &Value, wanted: Ordering, name: &str) -> Result<Value> {
    iterable
        .iter()?
        .reduce(|best, item| {
            if item.py_cmp(&best) == wanted {
                item
            } else {
                best
            }
        })
        .ok_or_else(|| Error::ValueError(format!("{name}() arg is an empty sequence")))
}

/// Add the items of `iterable` to `start`.
///
/// The sum stays an integer while every operand is an integer or a boolean, and
/// becomes a float once a float is met or the integer sum overflows.
pub fn sum(iterable: &Value, start: Value) -> Result<Value> {
    let mut total = start;
    iter::iterate(iterable.iter()?, |item| {
        total = add(&total, &item)?;
        Ok(())
    })?;

    Ok(total)
}

fn add(lhs: &Value, rhs: &Value) -> Result<Value> {
    let as_int = |v: &Value| match v {
        Value::Int(n) => Some(*n),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };
    let as_float = |v: &Value| match v {
        Value::Float(f) => Some(*f),
        other => as_int(other).map(|n| n as f64),
    };

    if let (Some(a), Some(b)) = (as_int(lhs), as_int(rhs)) {
        return Ok(a
            .checked_add(b)
            .map_or_else(|| Value::Float(a as f64 + b as f64), Value::Int));
    }

    match (as_float(lhs), as_float(rhs)) {
        (Some(a), Some(b)) => Ok(Value::Float(a + b)),
        _ => Err(Error::TypeError(format!(
            "unsupported operand type(s) for +: '{}' and '{}'",
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

/// `len(x)`.
pub fn len(value: &Value) -> Result<usize> {
    value.len()
}

/// `hash(x)`.
pub fn hash(value: &Value) -> Result<i64> {
    value.py_hash()
}

/// `a == b`.
pub fn equals(a: &Value, b: &Value) -> bool {
    a == b
}

/// `str(x)`.
pub fn str(value: &Value) -> Text {
    value.to_string().into()
}

/// `iter(x)`.
pub fn iter(value: &Value) -> Result<PyIter> {
    value.iter()
}

/// `tuple(iterable)`.
pub fn tuple(iterable: &Value) -> Result<Tuple> {
    Ok(iterable.iter()?.collect())
}

/// `list(iterable)`.
pub fn list(iterable: &Value) -> Result<List> {
    Ok(iterable.iter()?.collect())
}

/// `dict(pairs)`, from an iterable of 2-element sequences.
pub fn dict(pairs: &Value) -> Result<Dict> {
    Dict::from_pairs(pairs.iter()?)
}

/// `sorted(iterable)`: a new list, sorted in ascending order.
pub fn sorted(iterable: &Value) -> Result<List> {
    let mut sorted = list(iterable)?;
    sorted.sort();
    Ok(sorted)
}
