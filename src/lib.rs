//! # Chain Map
//!
//! A Rust implementation of a string-keyed hash table using separate chaining.
//!
//! This crate provides:
//!
//! - `ChainMap`: a hash map whose buckets are singly linked chains of entries
//! - `EntryChain`: the linked list used as a bucket, usable on its own
//!
//! Keys are hashed with a 31-based polynomial over their UTF-16 code units using
//! 32-bit wrapping arithmetic. The map starts with 4 buckets and doubles, rehashing
//! every entry, once the number of entries reaches 75% of the bucket count.
//!
//! ## Basic Usage
//!
//! ```rust
//! use chainmap::ChainMap;
//!
//! // Create a new hash map
//! let mut map = ChainMap::new();
//!
//! // Insert values
//! map.set("apple", 1);
//! map.set("banana", 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//! assert!(map.has("banana"));
//!
//! // Update values
//! map.set("apple", 10);
//! assert_eq!(map.get("apple"), Some(&10));
//! assert_eq!(map.len(), 2);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Growth
//!
//! ```rust
//! use chainmap::ChainMap;
//!
//! let mut map = ChainMap::with_capacity_and_load_factor(2, 0.5);
//! map.set("a", 1);
//! assert_eq!(map.capacity(), 4);
//!
//! // Listing order follows buckets, not insertion
//! let mut keys = map.keys().unwrap_or_default();
//! keys.sort_unstable();
//! assert_eq!(keys, vec!["a"]);
//!
//! map.clear();
//! assert_eq!(map.keys(), None);
//! ```
//!
//! ## Entry Chains
//!
//! ```rust
//! use chainmap::{Entry, EntryChain};
//!
//! let mut chain = EntryChain::new();
//! chain.append(Entry::new("b", 2));
//! chain.prepend(Entry::new("a", 1));
//! chain.insert_at(Entry::new("c", 3), 2);
//!
//! // Out-of-range positions are ignored
//! chain.insert_at(Entry::new("z", 26), 10);
//!
//! assert_eq!(chain.keys(), vec!["a", "b", "c"]);
//! assert_eq!(chain.find_index("c"), Some(2));
//! ```

/// Module implementing the string-keyed hash map with chained buckets
mod chain_map;
/// Module implementing the singly linked entry chain used as a bucket
mod entry_chain;
/// Error type raised by the bucket indexing path
mod error;
/// Rolling string hash and bucket index reduction
mod hashing;

pub use chain_map::{
    ChainMap, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR, MAX_LOAD_FACTOR, MIN_LOAD_FACTOR,
};
pub use entry_chain::{Entry, EntryChain, IntoIter, Iter, Node};
pub use error::ChainMapError;
pub use hashing::{HASH_MULTIPLIER, bucket_index, string_hash};
