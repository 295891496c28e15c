//! Dynamic values and the containers holding them.
//!
//! A [`Value`] is one value of the emulated language. Every capability (length,
//! hashing, subscription, iteration) is resolved by matching on its tag, and an
//! operation applied to a value lacking the capability fails with the exception
//! the language would raise.

use std::{cmp::Ordering, fmt};

use crate::{
    error::{Error, Result},
    hash,
    iter::{self, PyIter},
    slice::Slice,
};

mod dict;
mod list;
mod sequence;
mod text;
mod tuple;


pub use dict::{Dict, HashKey};
pub use list::List;
pub use sequence::Sequence;
pub use text::{Text, DEFAULT_WHITESPACE};
pub use tuple::Tuple;

/// A value of the emulated language.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Text),
    Tuple(Tuple),
    List(List),
    Dict(Dict),
    Slice(Slice),
    Iter(PyIter),
}

impl Value {
    /// The name of the value's type, as reported by `type(x).__name__`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => Text::TYPE_NAME,
            Value::Tuple(_) => Tuple::TYPE_NAME,
            Value::List(_) => List::TYPE_NAME,
            Value::Dict(_) => Dict::TYPE_NAME,
            Value::Slice(_) => "slice",
            Value::Iter(_) => "iterator",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// The number of items of a sized value.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Str(t) => Ok(t.len()),
            Value::Tuple(t) => Ok(t.len()),
            Value::List(l) => Ok(l.len()),
            Value::Dict(d) => Ok(d.len()),
            other => Err(Error::AttributeError {
                type_name: other.type_name(),
                attribute: "__len__",
            }),
        }
    }

    /// The hash of a hashable value.
    ///
    /// Values that compare equal hash equal, across numeric tags included.
    pub fn py_hash(&self) -> Result<i64> {
        match self {
            Value::None => Ok(hash::NONE_HASH),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Int(n) => Ok(hash::int(*n)),
            Value::Float(f) => Ok(hash::float(*f)),
            Value::Str(t) => Ok(t.py_hash()),
            Value::Tuple(t) => t.py_hash(),
            Value::List(l) => l.py_hash(),
            Value::Dict(d) => d.py_hash(),
            other => Err(Error::unhashable(other.type_name())),
        }
    }

    /// The total order used by sorting, `min` and `max`.
    ///
    /// Numbers compare numerically whatever their tag, with NaN after every other
    /// number. Texts, tuples and lists compare lexicographically. Values of
    /// unrelated kinds are ordered by kind: none, numbers, texts, tuples, lists,
    /// dicts, slices, iterators.
    pub fn py_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Tuple(a), Value::Tuple(b)) => cmp_items(a.items(), b.items()),
            (Value::List(a), Value::List(b)) => cmp_items(a.items(), b.items()),
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }

    /// Subscription, as in `x[key]`.
    pub fn get_item(&self, key: &Value) -> Result<Value> {
        match self {
            Value::Str(t) => t.get_item(key),
            Value::Tuple(t) => t.get_item(key),
            Value::List(l) => l.get_item(key),
            Value::Dict(d) => d.get(key).cloned(),
            other => Err(Error::TypeError(format!(
                "'{}' object is not subscriptable",
                other.type_name()
            ))),
        }
    }

    /// Item assignment, as in `x[key] = value`.
    pub fn set_item(&mut self, key: &Value, value: Value) -> Result<()> {
        match self {
            Value::Str(t) => t.set_item(key, value),
            Value::Tuple(t) => t.set_item(key, value),
            Value::List(l) => l.set_subscript(key, value),
            Value::Dict(d) => d.set(key.clone(), value),
            other => Err(Error::no_assignment(other.type_name())),
        }
    }

    /// Item deletion, as in `del x[key]`.
    pub fn del_item(&mut self, key: &Value) -> Result<()> {
        match self {
            Value::Str(t) => t.del_item(key),
            Value::Tuple(t) => t.del_item(key),
            Value::List(l) => l.del_subscript(key),
            Value::Dict(d) => d.delete(key),
            other => Err(Error::no_deletion(other.type_name())),
        }
    }

    /// Membership, as in `item in self`.
    ///
    /// On a text this is a substring test and `item` must be a text. On a dict it
    /// tests the keys. An iterator is consumed up to and including the first
    /// match.
    pub fn contains(&self, item: &Value) -> Result<bool> {
        match self {
            Value::Str(t) => match item {
                Value::Str(sub) => Ok(t.contains(sub.as_str())),
                other => Err(Error::TypeError(format!(
                    "'in <string>' requires string as left operand, not {}",
                    other.type_name()
                ))),
            },
            Value::Tuple(t) => Ok(t.contains(item)),
            Value::List(l) => Ok(l.contains(item)),
            Value::Dict(d) => d.contains(item),
            Value::Iter(it) => Ok(it.clone().any(|x| x == *item)),
            other => Err(Error::TypeError(format!(
                "argument of type '{}' is not iterable",
                other.type_name()
            ))),
        }
    }

    /// Convert to an iterator. See [`iter::iter`].
    pub fn iter(&self) -> Result<PyIter> {
        iter::iter(self)
    }

    /// The list behind this value, for in-place mutation.
    pub fn as_list_mut(&mut self) -> Result<&mut List> {
        match self {
            Value::List(l) => Ok(l),
            other => Err(Error::TypeError(format!(
                "'{}' object does not support mutation",
                other.type_name()
            ))),
        }
    }

    /// The dict behind this value, for in-place mutation.
    pub fn as_dict_mut(&mut self) -> Result<&mut Dict> {
        match self {
            Value::Dict(d) => Ok(d),
            other => Err(Error::TypeError(format!(
                "'{}' object does not support mutation",
                other.type_name()
            ))),
        }
    }

    /// Recursive conversion to the host representation.
    pub fn to_host(&self) -> Result<serde_json::Value> {
        log::trace!("converting a {} to its host form", self.type_name());
        crate::serialize::to_host(self)
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Value::Bool(b) => Some(Number::Int(i64::from(*b))),
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::None => 0,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => 1,
            Value::Str(_) => 2,
            Value::Tuple(_) => 3,
            Value::List(_) => 4,
            Value::Dict(_) => 5,
            Value::Slice(_) => 6,
            Value::Iter(_) => 7,
        }
    }
}

/// A numeric operand, with booleans already read as integers.
#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Integers and floats compare exactly: an integer equals a float only when
    /// the float is integral and holds that very integer.
    fn eq(self, other: Number) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Int(n), Number::Float(f)) | (Number::Float(f), Number::Int(n)) => {
                exact_int(f) == Some(n)
            }
        }
    }

    fn cmp(self, other: &Number) -> Ordering {
        match (self, *other) {
            (Number::Int(a), Number::Int(b)) => a.cmp(&b),
            (Number::Int(n), Number::Float(f)) => cmp_int_float(n, f),
            (Number::Float(f), Number::Int(n)) => cmp_int_float(n, f).reverse(),
            (Number::Float(a), Number::Float(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            },
        }
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

/// The integer a float holds exactly, if any.
fn exact_int(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&f)).then_some(f as i64)
}

/// Compare without rounding the integer to a float. NaN is after every number.
fn cmp_int_float(n: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let floor = f.floor();
    match n.cmp(&(floor as i64)) {
        Ordering::Equal if floor < f => Ordering::Less,
        ord => ord,
    }
}

fn cmp_items(a: &[Value], b: &[Value]) -> Ordering {
    a.iter()
        .zip(b)
        .map(|(x, y)| x.py_cmp(y))
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

/// Structural equality. Booleans, integers and floats compare numerically with
/// each other; any other pair of distinct kinds is unequal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            (Value::Slice(a), Value::Slice(b)) => a == b,
            (Value::Iter(a), Value::Iter(b)) => a == b,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.eq(y),
                _ => false,
            },
        }
    }
}

/// Write the `str()` forms of `items`, separated by `", "`.
pub(crate) fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }

    Ok(())
}

/// The `str()` form of the value.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) if x.is_nan() => write!(f, "nan"),
            Value::Float(x) if x.is_infinite() => {
                write!(f, "{}inf", if *x < 0.0 { "-" } else { "" })
            }
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(t) => write!(f, "{t}"),
            Value::Tuple(t) => write!(f, "{t}"),
            Value::List(l) => write!(f, "{l}"),
            Value::Dict(d) => write!(f, "{d}"),
            Value::Slice(s) => write!(f, "{s}"),
            Value::Iter(it) => write!(f, "{it}"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.into())
    }
}

impl From<Text> for Value {
    fn from(t: Text) -> Self {
        Value::Str(t)
    }
}

impl From<Tuple> for Value {
    fn from(t: Tuple) -> Self {
        Value::Tuple(t)
    }
}

impl From<List> for Value {
    fn from(l: List) -> Self {
        Value::List(l)
    }
}

impl From<Dict> for Value {
    fn from(d: Dict) -> Self {
        Value::Dict(d)
    }
}

impl From<Slice> for Value {
    fn from(s: Slice) -> Self {
        Value::Slice(s)
    }
}

impl From<PyIter> for Value {
    fn from(it: PyIter) -> Self {
        Value::Iter(it)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}
