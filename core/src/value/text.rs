use std::{fmt, rc::Rc};

use crate::{
    error::{Error, Result},
    hash,
    iter::{Iterable, PyIter},
    slice::{self, Slice},
    value::{
        sequence::{index_from_value, resolve_index},
        List, Value,
    },
};

/// Characters trimmed by the strip family and separating fields in
/// [`Text::split`] when no explicit set or separator is given.
pub const DEFAULT_WHITESPACE: &str = " \t\n";

/// The immutable sequence of characters.
///
/// Indices, lengths and search results count characters (Unicode scalar values),
/// not bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Text(Rc<str>);

impl Text {
    pub const TYPE_NAME: &'static str = "str";

    pub fn new() -> Self {
        Default::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number of characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The one-character text at `index`. Negative indices count from the end.
    pub fn get(&self, index: i64) -> Result<Text> {
        resolve_index(index, self.len())
            .and_then(|i| self.0.chars().nth(i))
            .map(Text::from)
            .ok_or_else(|| Error::index_out_of_range("string"))
    }

    /// The characters selected by `slice`.
    pub fn slice(&self, slice: &Slice) -> Result<Text> {
        let chars: Vec<char> = self.0.chars().collect();
        let indices = slice.indices(chars.len())?;

        Ok(indices.positions().map(|i| chars[i]).collect())
    }

    /// Subscription by an integer or a slice.
    pub fn get_item(&self, key: &Value) -> Result<Value> {
        match key {
            Value::Slice(s) => self.slice(s).map(Value::Str),
            key => self
                .get(index_from_value(key, "string")?)
                .map(Value::Str),
        }
    }

    /// Always a `TypeError`: texts are immutable.
    pub fn set_item(&self, _index: &Value, _value: Value) -> Result<()> {
        Err(Error::no_assignment(Self::TYPE_NAME))
    }

    /// Always a `TypeError`: texts are immutable.
    pub fn del_item(&self, _index: &Value) -> Result<()> {
        Err(Error::no_deletion(Self::TYPE_NAME))
    }

    /// Substring test.
    pub fn contains(&self, sub: &str) -> bool {
        self.0.contains(sub)
    }

    /// Index of the first occurrence of `sub`, or -1.
    pub fn find(&self, sub: &str) -> i64 {
        self.find_in(sub, None, None)
    }

    /// Index of the first occurrence of `sub` lying entirely within the
    /// `[start, end)` window, or -1. The window is resolved like slice bounds.
    pub fn find_in(&self, sub: &str, start: Option<i64>, end: Option<i64>) -> i64 {
        let Some((start, end)) = self.search_window(start, end) else {
            return -1;
        };

        let haystack = self.char_range(start, end);
        haystack
            .find(sub)
            .map_or(-1, |at| (start + haystack[..at].chars().count()) as i64)
    }

    /// Index of the last occurrence of `sub`, or -1.
    ///
    /// The search runs on the reversed text with the reversed needle, and the
    /// position found is mapped back. The result is the start of the occurrence
    /// that ends last, which for overlapping occurrences is also the one that
    /// starts last.
    pub fn rfind(&self, sub: &str) -> i64 {
        let reversed: String = self.0.chars().rev().collect();
        let needle: String = sub.chars().rev().collect();

        match reversed.find(&needle) {
            Some(at) => {
                let at = reversed[..at].chars().count();
                (self.len() - at - needle.chars().count()) as i64
            }
            None => -1,
        }
    }

    /// Like [`Text::find_in`], but a miss is a `ValueError`.
    pub fn index(&self, sub: &str, start: Option<i64>, end: Option<i64>) -> Result<usize> {
        usize::try_from(self.find_in(sub, start, end))
            .map_err(|_| Error::ValueError("substring not found".to_owned()))
    }

    /// Number of non-overlapping occurrences of `sub` within `[start, end)`.
    ///
    /// An empty needle matches at every character boundary of the window.
    pub fn count(&self, sub: &str, start: Option<i64>, end: Option<i64>) -> usize {
        let Some((start, end)) = self.search_window(start, end) else {
            return 0;
        };

        if sub.is_empty() {
            return end - start + 1;
        }

        let haystack = self.char_range(start, end);
        let mut count = 0;
        let mut cursor = 0;

        while let Some(at) = haystack[cursor..].find(sub) {
            count += 1;
            cursor += at + sub.len();
        }

        count
    }

    /// Remove leading and trailing characters found in `chars`, which defaults to
    /// [`DEFAULT_WHITESPACE`].
    pub fn strip(&self, chars: Option<&str>) -> Text {
        let set = chars.unwrap_or(DEFAULT_WHITESPACE);
        self.0.trim_matches(|c| set.contains(c)).into()
    }

    pub fn lstrip(&self, chars: Option<&str>) -> Text {
        let set = chars.unwrap_or(DEFAULT_WHITESPACE);
        self.0.trim_start_matches(|c| set.contains(c)).into()
    }

    pub fn rstrip(&self, chars: Option<&str>) -> Text {
        let set = chars.unwrap_or(DEFAULT_WHITESPACE);
        self.0.trim_end_matches(|c| set.contains(c)).into()
    }

    /// Split on a literal separator, keeping empty fields. Without a separator,
    /// split on runs of whitespace and drop empty fields.
    pub fn split(&self, sep: Option<&str>) -> Result<List> {
        match sep {
            Some("") => Err(Error::ValueError("empty separator".to_owned())),
            Some(sep) => Ok(self.0.split(sep).map(Value::from).collect()),
            None => Ok(self
                .0
                .split(|c| DEFAULT_WHITESPACE.contains(c))
                .filter(|field| !field.is_empty())
                .map(Value::from)
                .collect()),
        }
    }

    /// Concatenate texts with `self` as the separator. Every part must be a text.
    pub fn join<I>(&self, parts: I) -> Result<Text>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut joined = String::new();

        for (position, part) in parts.into_iter().enumerate() {
            let part = match part {
                Value::Str(part) => part,
                other => {
                    return Err(Error::TypeError(format!(
                        "sequence item {position}: expected str instance, {} found",
                        other.type_name()
                    )))
                }
            };

            if position > 0 {
                joined.push_str(&self.0);
            }
            joined.push_str(&part.0);
        }

        Ok(joined.into())
    }

    /// Substitute `new` for occurrences of `old`, at most `count` times.
    ///
    /// Substitution runs in passes until a fixed point: each pass replaces the
    /// leftmost occurrence at or after the end of the previous substitution, and
    /// the loop ends after `count` passes or when a pass finds nothing to replace.
    /// Since the search never revisits substituted text, a `new` containing `old`
    /// cannot loop forever. An empty `old` matches once at every character
    /// boundary.
    pub fn replace(&self, old: &str, new: &str, count: Option<usize>) -> Text {
        let mut result = self.0.to_string();
        let mut cursor = 0;
        let mut passes = 0;

        while count.map_or(true, |count| passes < count) {
            let Some(at) = result[cursor..].find(old) else {
                break;
            };

            let at = cursor + at;
            result.replace_range(at..at + old.len(), new);
            cursor = at + new.len();
            passes += 1;

            if old.is_empty() {
                match result[cursor..].chars().next() {
                    Some(c) => cursor += c.len_utf8(),
                    None => break,
                }
            }
        }

        log::trace!("replace: {passes} substitution(s)");
        result.into()
    }

    pub fn lower(&self) -> Text {
        self.0.to_lowercase().into()
    }

    pub fn upper(&self) -> Text {
        self.0.to_uppercase().into()
    }

    pub fn py_hash(&self) -> i64 {
        hash::text(&self.0)
    }

    pub fn to_host(&self) -> serde_json::Value {
        serde_json::Value::String(self.0.to_string())
    }

    /// The resolved `[start, end)` window of a search, or `None` when nothing can
    /// match in it, not even the empty text. A start past the end of the text
    /// leaves no window at all, although it would be clamped as a slice bound.
    fn search_window(&self, start: Option<i64>, end: Option<i64>) -> Option<(usize, usize)> {
        let len = self.len();
        if start.is_some_and(|start| start > len as i64) {
            return None;
        }

        let (start, end) = slice::window(start, end, len);
        (start <= end).then_some((start, end))
    }

    /// The substring between two character positions, `start <= end <= len`.
    fn char_range(&self, start: usize, end: usize) -> &str {
        let byte_offset = |n: usize| {
            self.0
                .char_indices()
                .nth(n)
                .map_or(self.0.len(), |(offset, _)| offset)
        };

        &self.0[byte_offset(start)..byte_offset(end)]
    }
}

impl Iterable for Text {
    fn py_iter(&self) -> PyIter {
        PyIter::new(self.0.chars().map(Value::from).collect::<Vec<_>>())
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Text(s.into())
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Text(s.into())
    }
}

impl From<char> for Text {
    fn from(c: char) -> Self {
        Text(c.to_string().into())
    }
}

impl FromIterator<char> for Text {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        iter.into_iter().collect::<String>().into()
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
