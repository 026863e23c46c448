//! Error type for the bucket indexing path of [`ChainMap`](crate::ChainMap)

use thiserror::Error;

/// Failures of the hash-to-bucket reduction.
///
/// Neither variant is reachable through user input: both signal a defect in
/// the indexing arithmetic and abort the operation that hit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainMapError {
    /// The reduced hash landed outside `[0, capacity)`
    #[error("bucket index {index} is out of bounds for capacity {capacity}")]
    IndexOutOfBounds {
        /// The offending index, before conversion to `usize`
        index: i64,
        /// Number of buckets at the time of the lookup
        capacity: usize,
    },
    /// The bucket count cannot be used as a modulus
    #[error("capacity {0} cannot be used as a hash modulus")]
    InvalidCapacity(usize),
}
