//! Polynomial string hashing and the reduction of a hash into a bucket index

use crate::ChainMapError;

/// Multiplier of the rolling hash
pub const HASH_MULTIPLIER: i32 = 31;

/// Computes `h = 31 * h + unit` over the UTF-16 code units of `key`, starting
/// from zero.
///
/// Arithmetic wraps at 32-bit signed width, so long keys produce negative
/// hashes. The result is a pure function of the key.
#[must_use]
pub fn string_hash(key: &str) -> i32 {
    key.encode_utf16()
        .fold(0_i32, |hash, unit| hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(i32::from(unit)))
}

/// Reduces `hash` into `[0, capacity)`.
///
/// A negative hash is normalized with the Euclidean remainder instead of the
/// sign-preserving one.
///
/// # Errors
///
/// Returns [`ChainMapError::InvalidCapacity`] for a zero capacity or one that does
/// not fit an `i64`, and [`ChainMapError::IndexOutOfBounds`] if the reduced value
/// still falls outside the bucket range.
pub fn bucket_index(hash: i32, capacity: usize) -> Result<usize, ChainMapError> {
    let modulus = i64::try_from(capacity)
        .ok()
        .filter(|&modulus| modulus > 0)
        .ok_or(ChainMapError::InvalidCapacity(capacity))?;
    let reduced = i64::from(hash)
        .checked_rem_euclid(modulus)
        .ok_or(ChainMapError::InvalidCapacity(capacity))?;

    match usize::try_from(reduced) {
        Ok(index) if index < capacity => Ok(index),
        _ => Err(ChainMapError::IndexOutOfBounds { index: reduced, capacity }),
    }
}
