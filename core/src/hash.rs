//! Deterministic hashing of hashable values.
//!
//! Hashes are the 32-bit polynomial hashes of Python 2, computed in `i64`. The value
//! `-1` is reserved as the "no hash" sentinel and never produced: any computation
//! that lands on it is remapped to `-2`.

use crate::error::Result;

/// Reserved sentinel, never returned as a hash.
pub const NO_HASH: i64 = -1;

/// Initial state of the tuple hash.
pub const TUPLE_SEED: i64 = 0x345678;

/// Multiplier of the polynomial hashes.
pub const MULTIPLIER: i64 = 1_000_003;

/// Hash of `None`.
pub const NONE_HASH: i64 = 0x9e37_79b9;

const LOW_32_BITS: i64 = 0xFFFF_FFFF;

/// Remap the reserved sentinel to `-2`.
pub fn remap(hash: i64) -> i64 {
    if hash == NO_HASH {
        -2
    } else {
        hash
    }
}

pub fn int(n: i64) -> i64 {
    remap(n)
}

/// Floats with an integral value hash like the corresponding integer, so that
/// `1 == 1.0` implies `hash(1) == hash(1.0)`.
pub fn float(f: f64) -> i64 {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        int(f as i64)
    } else {
        let bits = f.to_bits();
        remap(((bits ^ (bits >> 32)) & 0xFFFF_FFFF) as i64)
    }
}

/// Hash of a text, by code point.
pub fn text(s: &str) -> i64 {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return 0;
    };

    let mut hash = (i64::from(u32::from(first)) << 7) & LOW_32_BITS;
    let mut len = 0i64;

    for c in s.chars() {
        hash = (hash.wrapping_mul(MULTIPLIER) & LOW_32_BITS) ^ i64::from(u32::from(c));
        len += 1;
    }

    remap(hash ^ len)
}

/// Hash of an immutable sequence, given the hashes of its items in order.
///
/// For each item, `hash = ((hash * 1000003) mod 2^32) xor item_hash xor len`. The
/// first failing item hash aborts the computation.
pub fn sequence<I>(item_hashes: I, len: usize) -> Result<i64>
where
    I: IntoIterator<Item = Result<i64>>,
{
    let len = len as i64;
    let mut hash = TUPLE_SEED;

    for item_hash in item_hashes {
        hash = (hash.wrapping_mul(MULTIPLIER) & LOW_32_BITS) ^ item_hash? ^ len;
    }

    Ok(remap(hash))
}
