//! Error types.
//!
//! Every failure reported by the runtime corresponds to one exception kind of the
//! emulated language. Errors are raised at the point of violation and travel
//! unmodified to the caller through [`Result`]. Iterator exhaustion is not an error:
//! it is the `None` returned by [`Iterator::next`].

use std::fmt;

/// The exception kinds an [`Error`] can surface as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    IndexError,
    KeyError,
    ValueError,
    TypeError,
    AttributeError,
}

impl ErrorKind {
    /// The exception class name in the emulated language.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::IndexError => "IndexError",
            ErrorKind::KeyError => "KeyError",
            ErrorKind::ValueError => "ValueError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::AttributeError => "AttributeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error raised by a runtime operation.
///
/// The `Display` form is the `str()` of the corresponding exception, i.e.
/// `"<Kind>: <message>"`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An index, after negative wrap-around, fell outside `[0, len)`.
    #[error("IndexError: {0}")]
    IndexError(String),

    /// A mapping was accessed with an absent key and no default.
    #[error("KeyError: {0}")]
    KeyError(String),

    /// A search found no match, or an argument had the right type but an
    /// unusable value.
    #[error("ValueError: {0}")]
    ValueError(String),

    /// An operation was applied to a value of the wrong kind: mutation of an
    /// immutable sequence, hashing of an unhashable value, and so on.
    #[error("TypeError: {0}")]
    TypeError(String),

    /// A capability required by an operation is absent on the operand.
    #[error("AttributeError: '{type_name}' object has no attribute '{attribute}'")]
    AttributeError {
        type_name: &'static str,
        attribute: &'static str,
    },

    /// Conversion to an iterator was attempted on a non-iterable value.
    #[error("TypeError: '{0}' object is not iterable")]
    NotIterable(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// The exception kind this error surfaces as. [`Error::NotIterable`] is a
    /// `TypeError`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::IndexError(_) => ErrorKind::IndexError,
            Error::KeyError(_) => ErrorKind::KeyError,
            Error::ValueError(_) => ErrorKind::ValueError,
            Error::TypeError(_) | Error::NotIterable(_) => ErrorKind::TypeError,
            Error::AttributeError { .. } => ErrorKind::AttributeError,
        }
    }

    pub(crate) fn unhashable(type_name: &str) -> Self {
        Error::TypeError(format!("unhashable type: '{type_name}'"))
    }

    pub(crate) fn no_assignment(type_name: &str) -> Self {
        Error::TypeError(format!(
            "'{type_name}' object does not support item assignment"
        ))
    }

    pub(crate) fn no_deletion(type_name: &str) -> Self {
        Error::TypeError(format!("'{type_name}' object doesn't support item deletion"))
    }

    pub(crate) fn index_out_of_range(type_name: &str) -> Self {
        Error::IndexError(format!("{type_name} index out of range"))
    }
}
