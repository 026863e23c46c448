use std::mem;

use log::{debug, trace};

use crate::{
    ChainMapError,
    entry_chain::{Entry, EntryChain, Node},
    hashing::{bucket_index, string_hash},
};

/// Number of buckets a map starts with
pub const DEFAULT_CAPACITY: usize = 4;
/// Fill ratio at which the bucket array doubles
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
/// Smallest accepted load factor
pub const MIN_LOAD_FACTOR: f64 = 0.1;
/// Largest accepted load factor
pub const MAX_LOAD_FACTOR: f64 = 8.0;

/// A string-keyed hash map resolving collisions by separate chaining.
///
/// Every bucket slot is either empty or owns an [`EntryChain`]; chains are
/// allocated lazily on the first insert into a slot. After an insert that adds
/// a new key, the map doubles its bucket count and rehashes every entry once
/// `len() >= capacity() * load_factor()`.
///
/// Iteration order follows bucket index and then chain position. It is not
/// insertion order and changes whenever the map grows.
///
/// Note: This implementation is not thread-safe. Growth rewrites every bucket,
/// so shared use needs a lock around the whole map.
#[derive(Debug, Clone)]
pub struct ChainMap<V> {
    /// Bucket slots, `None` until the first entry hashes into the slot
    buckets: Vec<Option<EntryChain<V>>>,
    /// Total number of entries across all buckets
    length: usize,
    /// Fill ratio that triggers growth
    load_factor: f64,
}

impl<V> Default for ChainMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for ChainMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainMap<V>
where
    K: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Clamps a requested load factor into the accepted range
fn sanitize_load_factor(load_factor: f64) -> f64 {
    if load_factor.is_finite() {
        load_factor.clamp(MIN_LOAD_FACTOR, MAX_LOAD_FACTOR)
    } else {
        DEFAULT_LOAD_FACTOR
    }
}

impl<V> ChainMap<V> {
    /// Creates an empty map with 4 buckets and a 0.75 load factor
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map with `capacity` buckets (at least one)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map with `capacity` buckets and the given load factor
    #[must_use]
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self {
            buckets: Self::empty_buckets(capacity.max(1)),
            length: 0,
            load_factor: sanitize_load_factor(load_factor),
        }
    }

    /// Allocates `capacity` empty slots
    fn empty_buckets(capacity: usize) -> Vec<Option<EntryChain<V>>> {
        std::iter::repeat_with(|| None).take(capacity).collect()
    }

    /// Resolves the bucket index for `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`ChainMapError`] if the reduced hash does not land inside the
    /// bucket array. That only happens if the index arithmetic is broken.
    pub fn try_index(&self, key: &str) -> Result<usize, ChainMapError> {
        bucket_index(string_hash(key), self.capacity())
    }

    /// Resolves the bucket index for `key`, aborting on an indexing defect
    ///
    /// # Panics
    ///
    /// Panics if [`Self::try_index`] fails.
    #[allow(clippy::expect_used)]
    fn index(&self, key: &str) -> usize {
        self.try_index(key).expect("bucket index must fall inside the bucket array")
    }

    /// Returns the chain stored for `key`'s bucket, if one was allocated
    fn bucket(&self, key: &str) -> Option<&EntryChain<V>> {
        self.buckets.get(self.index(key))?.as_ref()
    }

    /// Returns the chain stored for `key`'s bucket mutably, if one was allocated
    fn bucket_mut(&mut self, key: &str) -> Option<&mut EntryChain<V>> {
        let index = self.index(key);
        self.buckets.get_mut(index)?.as_mut()
    }

    /// Inserts or replaces an entry without checking the growth threshold.
    ///
    /// A replaced entry is removed and a new node is spliced in at the same
    /// position, so the rest of the chain keeps its order.
    fn insert_entry(&mut self, key: String, value: V) -> Option<V> {
        let index = self.index(&key);
        let slot = self.buckets.get_mut(index)?;

        match slot {
            None => {
                let mut chain = EntryChain::new();
                chain.append(Entry::new(key, value));
                *slot = Some(chain);
            }
            Some(chain) => {
                if let Some(position) = chain.find_index(&key) {
                    let previous = chain.remove_at(position);
                    chain.insert_at(Entry::new(key, value), position);
                    return previous.map(|entry| entry.value);
                }
                chain.append(Entry::new(key, value));
            }
        }

        self.length = self.length.saturating_add(1);
        None
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// Replacing an existing key leaves `len()` unchanged. Adding a new key may
    /// double the bucket array and rehash every entry before returning.
    ///
    /// # Panics
    ///
    /// Panics if the key's bucket index falls outside the bucket array.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let previous = self.insert_entry(key.into(), value);
        if previous.is_none() && self.needs_growth() {
            self.grow_capacity();
        }
        previous
    }

    /// Returns the value stored for `key`
    ///
    /// # Panics
    ///
    /// Panics if the key's bucket index falls outside the bucket array.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let chain = self.bucket(key)?;
        let position = chain.find_index(key)?;
        chain.at(position).map(Node::value)
    }

    /// Returns a mutable reference to the value stored for `key`
    ///
    /// # Panics
    ///
    /// Panics if the key's bucket index falls outside the bucket array.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let chain = self.bucket_mut(key)?;
        let position = chain.find_index(key)?;
        chain.at_mut(position).map(Node::value_mut)
    }

    /// Returns true if the map contains `key`
    ///
    /// # Panics
    ///
    /// Panics if the key's bucket index falls outside the bucket array.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.bucket(key).is_some_and(|chain| chain.contains_key(key))
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// The length only shrinks when an entry was actually removed.
    ///
    /// # Panics
    ///
    /// Panics if the key's bucket index falls outside the bucket array.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let chain = self.bucket_mut(key)?;
        let position = chain.find_index(key)?;
        let removed = chain.remove_at(position)?;
        self.length = self.length.saturating_sub(1);
        Some(removed.value)
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of bucket slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the configured load factor
    #[must_use]
    pub const fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Sets the load factor, clamped to `[0.1, 8.0]`.
    ///
    /// Non-finite values reset it to the default. The new threshold is checked
    /// on the next insert of a new key.
    pub fn set_load_factor(&mut self, load_factor: f64) {
        self.load_factor = sanitize_load_factor(load_factor);
    }

    /// Returns the current ratio of entries to buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn fill_ratio(&self) -> f64 {
        self.length as f64 / self.capacity() as f64
    }

    /// Returns true if `length` entries reach the threshold for `capacity` buckets
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn over_threshold(&self, length: usize, capacity: usize) -> bool {
        length as f64 >= capacity as f64 * self.load_factor
    }

    /// Returns true once the entry count reaches the growth threshold
    fn needs_growth(&self) -> bool {
        self.over_threshold(self.length, self.capacity())
    }

    /// Doubles the bucket array until the entries sit below the threshold, then
    /// re-inserts every entry against the new capacity
    fn grow_capacity(&mut self) {
        let old_capacity = self.capacity();
        let mut new_capacity = old_capacity;
        while self.over_threshold(self.length, new_capacity) {
            let doubled = new_capacity.saturating_mul(2);
            if doubled == new_capacity {
                break;
            }
            new_capacity = doubled;
        }

        let snapshot = mem::replace(&mut self.buckets, Self::empty_buckets(new_capacity));
        let moved = self.length;
        self.length = 0;
        for entry in snapshot.into_iter().flatten().flatten() {
            let (key, value) = entry.into_pair();
            self.insert_entry(key, value);
        }

        debug!(
            "grew from {old_capacity} to {new_capacity} buckets, rehashed {moved} entries"
        );
    }

    /// Removes every entry, keeping the current number of buckets
    pub fn clear(&mut self) {
        self.clear_with_capacity(self.capacity());
    }

    /// Removes every entry and replaces the bucket array with `capacity` empty
    /// slots (at least one)
    pub fn clear_with_capacity(&mut self, capacity: usize) {
        trace!("clearing {} entries, capacity set to {capacity}", self.length);
        self.buckets = Self::empty_buckets(capacity.max(1));
        self.length = 0;
    }

    /// Returns all keys in bucket order, or `None` if the map is empty
    #[must_use]
    pub fn keys(&self) -> Option<Vec<&str>> {
        if self.is_empty() {
            return None;
        }
        Some(self.buckets.iter().flatten().flat_map(EntryChain::keys).collect())
    }

    /// Returns all values in bucket order, or `None` if the map is empty
    #[must_use]
    pub fn values(&self) -> Option<Vec<&V>> {
        if self.is_empty() {
            return None;
        }
        Some(self.buckets.iter().flatten().flat_map(EntryChain::values).collect())
    }

    /// Returns all `(key, value)` pairs in bucket order, or `None` if the map is
    /// empty
    #[must_use]
    pub fn entries(&self) -> Option<Vec<(&str, &V)>> {
        if self.is_empty() {
            return None;
        }
        Some(self.buckets.iter().flatten().flat_map(EntryChain::entries).collect())
    }

    /// Returns an iterator over the key-value pairs in bucket order
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.buckets.iter().flatten().flat_map(EntryChain::iter)
    }

    /// Returns the chain length of every bucket slot, zero for empty slots
    #[must_use]
    pub fn bucket_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(|slot| slot.as_ref().map_or(0, EntryChain::len)).collect()
    }
}
