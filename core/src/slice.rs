//! The slicing protocol.
//!
//! A [`Slice`] is a `(start, stop, step)` descriptor whose components may each be
//! absent. Resolving it against the length of a container with
//! [`Slice::indices`] produces [`SliceIndices`], whose bounds always lie in
//! `[0, len]` and whose step is never zero.
//!
//! With a positive step, the selected positions are `start, start + step, ...`
//! strictly below `stop`. With a negative step the window is the half-open range
//! `[stop, start)` walked from the top: the positions are `start - 1,
//! start - 1 + step, ...` down to `stop` included. Explicit bounds of a
//! negative-step slice are shifted up by one after wrap-around, which keeps every
//! bound in `[0, len]` while selecting the same elements as Python does (`s[::-1]`
//! reverses, `s[3:0:-1]` selects positions 3, 2 and 1).

use std::fmt;

use crate::error::{Error, Result};

/// A stride descriptor, each component optionally absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slice {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl Slice {
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Slice { start, stop, step }
    }

    /// The one-argument form `slice(stop)`.
    pub fn upto(stop: i64) -> Self {
        Slice {
            stop: Some(stop),
            ..Default::default()
        }
    }

    /// Resolve the descriptor against a container of length `len`.
    ///
    /// A step of zero is a `ValueError`.
    pub fn indices(&self, len: usize) -> Result<SliceIndices> {
        let step = self.step.unwrap_or(1);
        let len = len as i64;

        let (start, stop) = match step {
            0 => return Err(Error::ValueError("slice step cannot be zero".to_owned())),
            step if step > 0 => (
                resolve_bound(self.start, len, 0, 0),
                resolve_bound(self.stop, len, len, 0),
            ),
            _ => (
                resolve_bound(self.start, len, len, 1),
                resolve_bound(self.stop, len, 0, 1),
            ),
        };

        Ok(SliceIndices { start, stop, step })
    }
}

/// Resolve the `[start, stop)` window of a search operation, such as `index` or
/// `count`, the same way the bounds of a unit-step slice are resolved.
pub(crate) fn window(start: Option<i64>, stop: Option<i64>, len: usize) -> (usize, usize) {
    let len = len as i64;
    (
        resolve_bound(start, len, 0, 0),
        resolve_bound(stop, len, len, 0),
    )
}

/// Wrap a negative bound around `len`, apply `shift`, then clamp to `[0, len]`.
fn resolve_bound(bound: Option<i64>, len: i64, default: i64, shift: i64) -> usize {
    let resolved = match bound {
        None => default,
        Some(b) => {
            let wrapped = if b < 0 { b.saturating_add(len) } else { b };
            wrapped.saturating_add(shift).clamp(0, len)
        }
    };

    resolved as usize
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn component(c: Option<i64>) -> String {
            c.map_or_else(|| "None".to_owned(), |c| c.to_string())
        }

        write!(
            f,
            "slice({}, {}, {})",
            component(self.start),
            component(self.stop),
            component(self.step)
        )
    }
}

/// A slice resolved against a concrete length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliceIndices {
    pub start: usize,
    pub stop: usize,
    pub step: i64,
}

impl SliceIndices {
    /// The selected positions, in selection order.
    pub fn positions(&self) -> Positions {
        let (cursor, bound) = if self.step > 0 {
            (self.start as i64, self.stop as i64)
        } else {
            (self.start as i64 - 1, self.stop as i64)
        };

        Positions {
            cursor: Some(cursor),
            bound,
            step: self.step,
        }
    }

    /// The number of selected positions.
    pub fn len(&self) -> usize {
        let (lo, hi) = if self.step > 0 {
            (self.start, self.stop)
        } else {
            (self.stop, self.start)
        };

        if hi <= lo {
            0
        } else {
            let stride = self.step.unsigned_abs() as usize;
            (hi - lo).div_ceil(stride)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Iterator over the positions selected by a [`SliceIndices`].
#[derive(Clone, Debug)]
pub struct Positions {
    cursor: Option<i64>,
    bound: i64,
    step: i64,
}

impl Iterator for Positions {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let cursor = self.cursor?;
        let in_range = if self.step > 0 {
            cursor < self.bound
        } else {
            cursor >= self.bound
        };

        if !in_range {
            self.cursor = None;
            return None;
        }

        self.cursor = cursor.checked_add(self.step);
        Some(cursor as usize)
    }
}

impl std::iter::FusedIterator for Positions {}
