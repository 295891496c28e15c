//! Configuration for the runtime.

use serde::Deserialize;

/// Options that change the observable behavior of the builtins.
///
/// Containers never consult the configuration: only the functions of
/// [`crate::builtins::Builtins`] do.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// If true, `range` and `map` produce one-shot iterators, as in Python 3.
    /// Otherwise they produce lists, as in Python 2.
    pub python3: bool,
}

impl Config {
    /// The Python 3 flavor of the builtins.
    pub fn python3() -> Self {
        Config { python3: true }
    }
}
