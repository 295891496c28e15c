//! Conversion between runtime values and the host's data model.
//!
//! Values implement [`Serialize`], so any serde data format can receive them. The
//! canonical host form is [`serde_json::Value`]: sequences become arrays, dicts
//! become objects keyed by the `str()` form of their keys, texts become strings
//! and `None` becomes `null`. Slices and iterators have no host counterpart.
use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::{
    error::{Error, Result},
    value::{Dict, HashKey, List, Sequence, Text, Tuple, Value},
};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) => serializer.serialize_unit(),
            Value::Str(t) => t.serialize(serializer),
            Value::Tuple(t) => t.serialize(serializer),
            Value::List(l) => l.serialize(serializer),
            Value::Dict(d) => d.serialize(serializer),
            other => Err(S::Error::custom(format!(
                "'{}' object has no host representation",
                other.type_name()
            ))),
        }
    }
}

fn serialize_items<S>(items: &[Value], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        seq.serialize_element(item)?;
    }

    seq.end()
}

impl Serialize for Tuple {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_items(self.items(), serializer)
    }
}

impl Serialize for List {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_items(self.as_slice(), serializer)
    }
}

impl Serialize for Dict {
    /// Keys are written in their `str()` form, in insertion order.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map_ser = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map_ser.serialize_entry(&key.to_string(), value)?;
        }

        map_ser.end()
    }
}

impl Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Convert anything serializable to its host form. A value with no host
/// counterpart is a `TypeError`.
pub fn to_host<T>(value: &T) -> Result<serde_json::Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|err| Error::TypeError(err.to_string()))
}

/// Convert a host value into a runtime value.
///
/// Arrays become lists and objects become dicts with text keys. Integers that
/// don't fit in an `i64` become floats.
pub fn from_host(host: serde_json::Value) -> Value {
    use serde_json::Value as Host;

    match host {
        Host::Null => Value::None,
        Host::Bool(b) => Value::Bool(b),
        Host::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => n.as_f64().map_or(Value::None, Value::Float),
        },
        Host::String(s) => Value::from(s),
        Host::Array(items) => Value::List(items.into_iter().map(from_host).collect()),
        Host::Object(fields) => Value::Dict(
            fields
                .into_iter()
                .map(|(key, value)| (HashKey::text(key.into()), from_host(value)))
                .collect(),
        ),
    }
}
