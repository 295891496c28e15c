use std::{
    fmt,
    hash::{Hash, Hasher},
};

use indexmap::{Equivalent, IndexMap};

use crate::{
    error::{Error, Result},
    iter::{self, Iterable, PyIter},
    value::{List, Text, Tuple, Value},
};

/// A hashable value used as a dict key, together with its precomputed hash.
#[derive(Clone, Debug)]
pub struct HashKey {
    hash: i64,
    value: Value,
}

impl HashKey {
    /// Fails with a `TypeError` if `value` is unhashable.
    pub fn new(value: Value) -> Result<Self> {
        Ok(HashKey {
            hash: value.py_hash()?,
            value,
        })
    }

    /// Texts are always hashable.
    pub fn text(text: Text) -> Self {
        HashKey {
            hash: text.py_hash(),
            value: Value::Str(text),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }
}

impl PartialEq for HashKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value == other.value
    }
}

impl Eq for HashKey {}

impl Hash for HashKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// Borrowed form of a [`HashKey`], so that lookups don't clone the key.
struct KeyRef<'a> {
    hash: i64,
    value: &'a Value,
}

impl<'a> KeyRef<'a> {
    fn new(value: &'a Value) -> Result<Self> {
        Ok(KeyRef {
            hash: value.py_hash()?,
            value,
        })
    }
}

impl Hash for KeyRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl Equivalent<HashKey> for KeyRef<'_> {
    fn equivalent(&self, key: &HashKey) -> bool {
        self.hash == key.hash && *self.value == key.value
    }
}

/// The mapping, iterated in insertion order.
///
/// Every operation taking a key fails with a `TypeError` when the key is
/// unhashable.
#[derive(Clone, Debug, Default)]
pub struct Dict(IndexMap<HashKey, Value>);

impl Dict {
    pub const TYPE_NAME: &'static str = "dict";

    pub fn new() -> Self {
        Default::default()
    }

    /// Build a dict by draining an iterable of 2-element iterables.
    ///
    /// Later pairs overwrite earlier ones with an equal key.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut dict = Dict::new();

        for (position, pair) in pairs.into_iter().enumerate() {
            let type_name = pair.type_name();
            let items = iter::into_iter(pair).map_err(|_| {
                Error::TypeError(format!(
                    "cannot convert dictionary update sequence element #{position} \
                    ('{type_name}') to a sequence"
                ))
            })?;

            let (key, value) = unpack_pair(items, position)?;
            dict.set(key, value)?;
        }

        Ok(dict)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value bound to `key`, or a `KeyError`.
    pub fn get(&self, key: &Value) -> Result<&Value> {
        self.0
            .get(&KeyRef::new(key)?)
            .ok_or_else(|| Error::KeyError(key.to_string()))
    }

    /// The value bound to `key`, or `default` if there is none.
    pub fn get_or(&self, key: &Value, default: Value) -> Result<Value> {
        Ok(self.0.get(&KeyRef::new(key)?).cloned().unwrap_or(default))
    }

    pub fn set(&mut self, key: Value, value: Value) -> Result<()> {
        self.insert(HashKey::new(key)?, value);
        Ok(())
    }

    /// Bind an already hashed key, returning the previous value if any.
    pub fn insert(&mut self, key: HashKey, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Remove the binding of `key`, or fail with a `KeyError`.
    pub fn delete(&mut self, key: &Value) -> Result<()> {
        self.0
            .shift_remove(&KeyRef::new(key)?)
            .map(|_| ())
            .ok_or_else(|| Error::KeyError(key.to_string()))
    }

    pub fn contains(&self, key: &Value) -> Result<bool> {
        Ok(self.0.contains_key(&KeyRef::new(key)?))
    }

    pub fn keys(&self) -> List {
        self.0.keys().map(|k| k.value.clone()).collect()
    }

    pub fn values(&self) -> List {
        self.0.values().cloned().collect()
    }

    /// The `(key, value)` pairs, as 2-tuples.
    pub fn items(&self) -> List {
        self.0
            .iter()
            .map(|(k, v)| Tuple::from(vec![k.value.clone(), v.clone()]).into())
            .collect()
    }

    /// Iterate over the bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter().map(|(k, v)| (&k.value, v))
    }

    /// Bind every key of `other` to its value in `other`.
    pub fn update(&mut self, other: &Dict) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Remove the binding of `key` and return its value. If there is none, return
    /// `default`, or fail with a `KeyError` when no default is given.
    pub fn pop(&mut self, key: &Value, default: Option<Value>) -> Result<Value> {
        match (self.0.shift_remove(&KeyRef::new(key)?), default) {
            (Some(value), _) | (None, Some(value)) => Ok(value),
            (None, None) => Err(Error::KeyError(key.to_string())),
        }
    }

    /// Remove and return the first binding in iteration order.
    pub fn popitem(&mut self) -> Result<Tuple> {
        let (key, value) = self
            .0
            .shift_remove_index(0)
            .ok_or_else(|| Error::KeyError("popitem(): dictionary is empty".to_owned()))?;
        log::trace!("popitem: removed key {}", key.value);

        Ok(Tuple::from(vec![key.value, value]))
    }

    /// Always a `TypeError`: dicts are unhashable.
    pub fn py_hash(&self) -> Result<i64> {
        Err(Error::unhashable(Self::TYPE_NAME))
    }

    pub fn to_host(&self) -> Result<serde_json::Value> {
        crate::serialize::to_host(self)
    }
}

/// Split a dict update element into its key and value.
fn unpack_pair<I>(items: I, position: usize) -> Result<(Value, Value)>
where
    I: Iterator<Item = Value>,
{
    let items: Vec<Value> = items.collect();

    match <[Value; 2]>::try_from(items) {
        Ok([key, value]) => Ok((key, value)),
        Err(items) => Err(Error::ValueError(format!(
            "dictionary update sequence element #{position} has length {}; 2 is required",
            items.len()
        ))),
    }
}

/// Dicts are equal when they bind the same keys to equal values, whatever the
/// insertion order.
impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .0
                .iter()
                .all(|(k, v)| other.0.get(k).is_some_and(|w| v == w))
    }
}

impl Iterable for Dict {
    fn py_iter(&self) -> PyIter {
        PyIter::new(self.keys().into_vec())
    }
}

impl From<IndexMap<HashKey, Value>> for Dict {
    fn from(store: IndexMap<HashKey, Value>) -> Self {
        Dict(store)
    }
}

impl FromIterator<(HashKey, Value)> for Dict {
    fn from_iter<T: IntoIterator<Item = (HashKey, Value)>>(iter: T) -> Self {
        Dict(iter.into_iter().collect())
    }
}

impl fmt::Display for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
