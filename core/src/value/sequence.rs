//! Behavior shared by the ordered containers.

use crate::{
    error::{Error, Result},
    slice::{self, Slice},
    value::Value,
};

/// An ordered container backed by a contiguous run of values.
///
/// Implementors only provide access to their items and a way to build a new
/// instance of themselves; indexing, slicing and searching are derived from that.
/// Slicing always produces a new instance of the implementing type.
pub trait Sequence: Sized + Into<Value> {
    /// The type name in the emulated language, used in error messages.
    const TYPE_NAME: &'static str;

    fn items(&self) -> &[Value];

    fn from_vec(items: Vec<Value>) -> Self;

    fn len(&self) -> usize {
        self.items().len()
    }

    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// The item at `index`. Negative indices count from the end.
    fn get(&self, index: i64) -> Result<&Value> {
        let items = self.items();
        resolve_index(index, items.len())
            .map(|i| &items[i])
            .ok_or_else(|| Error::index_out_of_range(Self::TYPE_NAME))
    }

    /// A copy of the items selected by `slice`.
    fn slice(&self, slice: &Slice) -> Result<Self> {
        let items = self.items();
        let indices = slice.indices(items.len())?;

        Ok(Self::from_vec(
            indices.positions().map(|i| items[i].clone()).collect(),
        ))
    }

    /// Subscription by an integer or a slice.
    fn get_item(&self, key: &Value) -> Result<Value> {
        match key {
            Value::Slice(slice) => Ok(self.slice(slice)?.into()),
            key => self.get(index_from_value(key, Self::TYPE_NAME)?).cloned(),
        }
    }

    fn contains(&self, item: &Value) -> bool {
        self.items().iter().any(|x| x == item)
    }

    fn count(&self, item: &Value) -> usize {
        self.items().iter().filter(|x| *x == item).count()
    }

    /// The first position in `[start, end)` holding an item equal to `item`.
    ///
    /// The bounds are resolved like slice bounds.
    fn index_of(&self, item: &Value, start: Option<i64>, end: Option<i64>) -> Result<usize> {
        let items = self.items();
        let (start, end) = slice::window(start, end, items.len());

        (start..end)
            .find(|&i| items[i] == *item)
            .ok_or_else(|| {
                Error::ValueError(format!(
                    "{}.index(x): x not in {}",
                    Self::TYPE_NAME,
                    Self::TYPE_NAME
                ))
            })
    }

    /// Recursive conversion to host containers.
    fn to_host(&self) -> Result<serde_json::Value> {
        crate::serialize::to_host(self.items())
    }
}

/// Resolve a possibly negative index against `len`, or `None` if it is out of
/// range.
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let resolved = if index < 0 { index + len } else { index };

    (0..len).contains(&resolved).then_some(resolved as usize)
}

/// Interpret a value used as a subscript of a `type_name` container.
pub(crate) fn index_from_value(key: &Value, type_name: &str) -> Result<i64> {
    match key {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(Error::TypeError(format!(
            "{type_name} indices must be integers or slices, not {}",
            other.type_name()
        ))),
    }
}
