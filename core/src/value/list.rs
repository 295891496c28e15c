use std::fmt;

use crate::{
    error::{Error, Result},
    iter::{Iterable, PyIter},
    slice::Slice,
    value::{
        sequence::{index_from_value, resolve_index},
        Sequence, Value,
    },
};

/// The mutable ordered sequence.
///
/// Its length is the length of the backing vector, which every mutation keeps
/// exact.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct List(Vec<Value>);

impl List {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        List(Vec::with_capacity(capacity))
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Replace the item at `index`. Negative indices count from the end.
    pub fn set_item(&mut self, index: i64, value: Value) -> Result<()> {
        let i = self.resolve(index)?;
        self.0[i] = value;
        Ok(())
    }

    /// Remove the item at `index`. Negative indices count from the end.
    pub fn del_item(&mut self, index: i64) -> Result<()> {
        let i = self.resolve(index)?;
        self.0.remove(i);
        Ok(())
    }

    /// Assign the items of `values` to the positions selected by `slice`.
    ///
    /// With a unit step the selected window is replaced as a whole and may grow or
    /// shrink. Any other step requires exactly one value per selected position.
    pub fn set_slice<I>(&mut self, slice: &Slice, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Value>,
    {
        let indices = slice.indices(self.0.len())?;
        let values: Vec<Value> = values.into_iter().collect();

        if indices.step == 1 {
            let stop = indices.stop.max(indices.start);
            self.0.splice(indices.start..stop, values);
            return Ok(());
        }

        if indices.len() != values.len() {
            return Err(Error::ValueError(format!(
                "attempt to assign sequence of size {} to extended slice of size {}",
                values.len(),
                indices.len()
            )));
        }

        for (i, value) in indices.positions().zip(values) {
            self.0[i] = value;
        }

        Ok(())
    }

    /// Remove the items at the positions selected by `slice`.
    pub fn del_slice(&mut self, slice: &Slice) -> Result<()> {
        let indices = slice.indices(self.0.len())?;

        if indices.step == 1 {
            let stop = indices.stop.max(indices.start);
            self.0.drain(indices.start..stop);
            return Ok(());
        }

        let mut doomed = vec![false; self.0.len()];
        for i in indices.positions() {
            doomed[i] = true;
        }

        let mut position = 0;
        self.0.retain(|_| {
            let keep = !doomed[position];
            position += 1;
            keep
        });

        Ok(())
    }

    pub fn append(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.0.extend(values);
    }

    /// Insert `value` before `index`. The index wraps once if negative, then is
    /// clamped to `[0, len]`: inserting past the end appends.
    pub fn insert(&mut self, index: i64, value: Value) {
        let len = self.0.len() as i64;
        let index = if index < 0 {
            index.saturating_add(len)
        } else {
            index
        };

        self.0.insert(index.clamp(0, len) as usize, value);
    }

    /// Remove the first item equal to `value`.
    pub fn remove(&mut self, value: &Value) -> Result<()> {
        let i = self
            .index_of(value, None, None)
            .map_err(|_| Error::ValueError("list.remove(x): x not in list".to_owned()))?;
        self.0.remove(i);
        Ok(())
    }

    /// Remove and return the last item.
    pub fn pop(&mut self) -> Result<Value> {
        self.0
            .pop()
            .ok_or_else(|| Error::IndexError("pop from empty list".to_owned()))
    }

    /// Remove and return the item at `index`.
    pub fn pop_at(&mut self, index: i64) -> Result<Value> {
        if self.0.is_empty() {
            return Err(Error::IndexError("pop from empty list".to_owned()));
        }

        let i = self.resolve(index)?;
        Ok(self.0.remove(i))
    }

    /// Stable ascending sort under [`Value::py_cmp`].
    pub fn sort(&mut self) {
        self.0.sort_by(Value::py_cmp);
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
    }

    /// Always a `TypeError`: lists are unhashable.
    pub fn py_hash(&self) -> Result<i64> {
        Err(Error::unhashable(Self::TYPE_NAME))
    }

    /// Item assignment by an integer or a slice, as in `xs[key] = value`.
    ///
    /// Assigning to a slice drains `value`, which must be iterable.
    pub fn set_subscript(&mut self, key: &Value, value: Value) -> Result<()> {
        match key {
            Value::Slice(slice) => self.set_slice(slice, crate::iter::into_iter(value)?),
            key => self.set_item(index_from_value(key, Self::TYPE_NAME)?, value),
        }
    }

    /// Item deletion by an integer or a slice, as in `del xs[key]`.
    pub fn del_subscript(&mut self, key: &Value) -> Result<()> {
        match key {
            Value::Slice(slice) => self.del_slice(slice),
            key => self.del_item(index_from_value(key, Self::TYPE_NAME)?),
        }
    }

    fn resolve(&self, index: i64) -> Result<usize> {
        resolve_index(index, self.0.len())
            .ok_or_else(|| Error::IndexError("list assignment index out of range".to_owned()))
    }
}

impl Sequence for List {
    const TYPE_NAME: &'static str = "list";

    fn items(&self) -> &[Value] {
        &self.0
    }

    fn from_vec(items: Vec<Value>) -> Self {
        List(items)
    }
}

impl Iterable for List {
    fn py_iter(&self) -> PyIter {
        PyIter::new(self.0.as_slice())
    }
}

impl FromIterator<Value> for List {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        List(iter.into_iter().collect())
    }
}

impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        List(items)
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        super::write_joined(f, &self.0)?;
        write!(f, "]")
    }
}
