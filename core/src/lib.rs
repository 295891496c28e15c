//! Runtime values with Python semantics, for code produced by a Python transpiler.
//!
//! The crate provides the container model of the source language: immutable
//! ([`Tuple`]) and mutable ([`List`]) ordered sequences, the [`Dict`] mapping, the
//! [`Text`] sequence of characters, the one-shot iteration protocol ([`PyIter`]) and
//! the slicing protocol ([`Slice`]). Everything is tied together by the closed
//! [`Value`] enum, which carries the equality, ordering and hashing rules shared by
//! all containers.
//!
//! Failures are reported through [`Error`], whose variants map one-to-one onto the
//! exception kinds of the source language.

pub mod builtins;
pub mod config;
pub mod error;
pub mod hash;
pub mod iter;
pub mod serialize;
pub mod slice;
pub mod value;

pub use builtins::Builtins;
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use iter::{Iterable, PyIter};
pub use slice::{Slice, SliceIndices};
pub use value::{Dict, HashKey, List, Sequence, Text, Tuple, Value};
