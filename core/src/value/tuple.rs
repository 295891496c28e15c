use std::{fmt, rc::Rc};

use crate::{
    error::{Error, Result},
    hash,
    iter::{Iterable, PyIter},
    value::{Sequence, Value},
};

/// The immutable ordered sequence.
///
/// The items are reference counted, so clones and iterators share them.
#[derive(Clone, Debug, Default)]
pub struct Tuple(Rc<[Value]>);

impl Tuple {
    pub fn new() -> Self {
        Default::default()
    }

    /// Always a `TypeError`: tuples don't support item assignment.
    pub fn set_item(&self, _index: &Value, _value: Value) -> Result<()> {
        Err(Error::no_assignment(Self::TYPE_NAME))
    }

    /// Always a `TypeError`: tuples don't support item deletion.
    pub fn del_item(&self, _index: &Value) -> Result<()> {
        Err(Error::no_deletion(Self::TYPE_NAME))
    }

    /// The polynomial hash of the items. Fails if an item is unhashable.
    pub fn py_hash(&self) -> Result<i64> {
        hash::sequence(self.0.iter().map(Value::py_hash), self.0.len())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }
}

impl Sequence for Tuple {
    const TYPE_NAME: &'static str = "tuple";

    fn items(&self) -> &[Value] {
        &self.0
    }

    fn from_vec(items: Vec<Value>) -> Self {
        Tuple(items.into())
    }
}

impl Iterable for Tuple {
    fn py_iter(&self) -> PyIter {
        PyIter::new(self.0.clone())
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0[..] == other.0[..]
    }
}

impl FromIterator<Value> for Tuple {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Tuple(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(items: Vec<Value>) -> Self {
        Tuple::from_vec(items)
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// `(a, b)`, with the trailing comma of the one-element tuple: `(a,)`.
impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0[..] {
            [single] => write!(f, "({single},)"),
            items => {
                write!(f, "(")?;
                super::write_joined(f, items)?;
                write!(f, ")")
            }
        }
    }
}
