//! The iteration protocol.
//!
//! [`PyIter`] is the one-shot, pull-based cursor every iterable value converts to.
//! Exhaustion is signaled by `next()` returning `None` and is sticky: once an
//! iterator returned `None`, it keeps doing so.
//!
//! Clones of a [`PyIter`] alias one another: they share their cursor, so
//! advancing any of them advances all of them. An iterator value passed to a
//! consuming operation is therefore consumed, as in the source language.

use std::{cell::Cell, fmt, rc::Rc};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Capability of producing a fresh [`PyIter`] over one's items.
pub trait Iterable {
    fn py_iter(&self) -> PyIter;
}

/// A one-shot cursor over a snapshot of a sequence of values.
///
/// The snapshot is shared: creating an iterator over an immutable container does
/// not copy its items. The cursor is shared between clones.
#[derive(Clone, Debug, Default)]
pub struct PyIter {
    source: Rc<[Value]>,
    position: Rc<Cell<usize>>,
}

impl PyIter {
    pub fn new(source: impl Into<Rc<[Value]>>) -> Self {
        PyIter {
            source: source.into(),
            position: Default::default(),
        }
    }

    /// Number of items already produced.
    pub fn position(&self) -> usize {
        self.position.get()
    }

    /// Number of items left before exhaustion.
    pub fn remaining(&self) -> usize {
        self.source.len() - self.position()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

impl Iterator for PyIter {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let position = PyIter::position(self);
        let item = self.source.get(position)?.clone();
        self.position.set(position + 1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for PyIter {}

impl std::iter::FusedIterator for PyIter {}

/// An iterator is its own iterator: the result aliases `self`.
impl Iterable for PyIter {
    fn py_iter(&self) -> PyIter {
        self.clone()
    }
}

/// Iterators compare by identity: two iterators are equal when they alias each
/// other.
impl PartialEq for PyIter {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.position, &other.position)
    }
}

impl fmt::Display for PyIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<iter at {} of {}>", self.position(), self.source.len())
    }
}

/// Convert a value to an iterator.
///
/// An iterator value yields itself: draining the result drains the value.
/// Containers yield a fresh iterator over their items (the keys, for a dict). Any
/// other value is [`Error::NotIterable`].
pub fn iter(value: &Value) -> Result<PyIter> {
    match value {
        Value::Iter(it) => Ok(it.py_iter()),
        Value::Str(text) => Ok(text.py_iter()),
        Value::Tuple(tuple) => Ok(tuple.py_iter()),
        Value::List(list) => Ok(list.py_iter()),
        Value::Dict(dict) => Ok(dict.py_iter()),
        other => Err(Error::NotIterable(other.type_name())),
    }
}

/// Like [`iter`], but takes the value by ownership.
pub fn into_iter(value: Value) -> Result<PyIter> {
    match value {
        Value::Iter(it) => Ok(it),
        other => iter(&other),
    }
}

/// Drive `f` over every remaining item, stopping at the first error.
pub fn iterate<I, F>(items: I, mut f: F) -> Result<()>
where
    I: IntoIterator<Item = Value>,
    F: FnMut(Value) -> Result<()>,
{
    for item in items {
        f(item)?;
    }

    Ok(())
}

/// Drain an iterator into a vector.
pub fn copy(items: impl IntoIterator<Item = Value>) -> Vec<Value> {
    items.into_iter().collect()
}
