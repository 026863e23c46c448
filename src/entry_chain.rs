//! Singly linked chain of key/value entries.
//!
//! An [`EntryChain`] is the collision list behind one bucket of a
//! [`ChainMap`](crate::ChainMap). The chain itself does not enforce key
//! uniqueness; that is the map's job.

use std::{fmt, iter::FusedIterator};

/// A key paired with an opaque value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// Lookup key
    pub key: String,
    /// Payload, never inspected by the chain or the map
    pub value: V,
}

impl<V> Entry<V> {
    /// Creates a new entry
    pub fn new(key: impl Into<String>, value: V) -> Self {
        Self { key: key.into(), value }
    }

    /// Splits the entry into its key and value
    #[must_use]
    pub fn into_pair(self) -> (String, V) {
        (self.key, self.value)
    }
}

/// Owning link to the next node
type Link<V> = Option<Box<Node<V>>>;

/// A single node of an [`EntryChain`]
pub struct Node<V> {
    /// The entry carried by this node
    entry: Entry<V>,
    /// The rest of the chain, exclusively owned by this node
    next: Link<V>,
}

impl<V> Node<V> {
    /// Returns the entry held by this node
    #[must_use]
    pub const fn entry(&self) -> &Entry<V> {
        &self.entry
    }

    /// Returns the key held by this node
    #[must_use]
    pub fn key(&self) -> &str {
        &self.entry.key
    }

    /// Returns the value held by this node
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.entry.value
    }

    /// Returns a mutable reference to the value held by this node
    pub const fn value_mut(&mut self) -> &mut V {
        &mut self.entry.value
    }

    /// Returns the following node, if any
    #[must_use]
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("entry", &self.entry).finish_non_exhaustive()
    }
}

/// A singly linked list of [`Entry`] values.
///
/// Index-based operations are `O(index)`, appending is `O(n)` and prepending is
/// `O(1)`. Structural operations given an out-of-range index leave the chain
/// untouched and report nothing.
pub struct EntryChain<V> {
    /// First node of the chain
    head: Link<V>,
    /// Number of nodes reachable from `head`
    size: usize,
}

// Clone and Debug walk the chain iteratively so long chains cannot overflow
// the stack.
impl<V: Clone> Clone for EntryChain<V> {
    fn clone(&self) -> Self {
        let mut cloned = Self::new();
        let mut tail = &mut cloned.head;
        for (key, value) in self {
            let entry = Entry::new(key, value.clone());
            let node = tail.insert(Box::new(Node { entry, next: None }));
            tail = &mut node.next;
        }
        cloned.size = self.size;
        cloned
    }
}

impl<V: fmt::Debug> fmt::Debug for EntryChain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V> Default for EntryChain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EntryChain<V> {
    /// Creates an empty chain
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, size: 0 }
    }

    /// Returns the number of entries in the chain
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the chain holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the first node
    #[must_use]
    pub fn head(&self) -> Option<&Node<V>> {
        self.head.as_deref()
    }

    /// Returns the last node
    #[must_use]
    pub fn tail(&self) -> Option<&Node<V>> {
        let mut current = self.head.as_deref()?;
        while let Some(next) = current.next.as_deref() {
            current = next;
        }
        Some(current)
    }

    /// Returns the link slot that owns the node at `index`.
    ///
    /// Slot `0` is the head; slot `len()` is the empty link after the tail.
    fn link_mut(&mut self, index: usize) -> Option<&mut Link<V>> {
        let mut link = &mut self.head;
        for _ in 0..index {
            link = &mut link.as_mut()?.next;
        }
        Some(link)
    }

    /// Adds an entry after the current tail
    pub fn append(&mut self, entry: Entry<V>) {
        let size = self.size;
        if let Some(slot) = self.link_mut(size) {
            *slot = Some(Box::new(Node { entry, next: None }));
            self.size = self.size.saturating_add(1);
        }
    }

    /// Adds an entry in front of the current head
    pub fn prepend(&mut self, entry: Entry<V>) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { entry, next }));
        self.size = self.size.saturating_add(1);
    }

    /// Returns the node at `index`, or `None` when `index >= len()`
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&Node<V>> {
        if index >= self.size {
            return None;
        }

        let mut current = self.head.as_deref();
        for _ in 0..index {
            current = current?.next.as_deref();
        }
        current
    }

    /// Returns the node at `index` mutably, or `None` when `index >= len()`
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Node<V>> {
        if index >= self.size {
            return None;
        }
        self.link_mut(index)?.as_deref_mut()
    }

    /// Returns the position of the first entry whose key equals `key`
    #[must_use]
    pub fn find_index(&self, key: &str) -> Option<usize> {
        self.iter().position(|(candidate, _)| candidate == key)
    }

    /// Returns true if some entry has the given key
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.iter().any(|(candidate, _)| candidate == key)
    }

    /// Returns true if some entry equals `entry` in both key and value
    #[must_use]
    pub fn contains(&self, entry: &Entry<V>) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(key, value)| key == entry.key && *value == entry.value)
    }

    /// Inserts `entry` so that it ends up at position `index`.
    ///
    /// `index` may range over `0..=len()`; anything larger is ignored.
    pub fn insert_at(&mut self, entry: Entry<V>, index: usize) {
        if index > self.size {
            return;
        }
        if index == 0 {
            self.prepend(entry);
            return;
        }
        if index == self.size {
            self.append(entry);
            return;
        }

        if let Some(slot) = self.link_mut(index) {
            let next = slot.take();
            *slot = Some(Box::new(Node { entry, next }));
            self.size = self.size.saturating_add(1);
        }
    }

    /// Removes the entry at `index`. Returns `None` without touching the chain
    /// when `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> Option<Entry<V>> {
        if index >= self.size {
            return None;
        }
        if index == 0 {
            return self.shift();
        }

        // The slot for `index` is the predecessor's `next` link
        let slot = self.link_mut(index)?;
        let removed = slot.take()?;
        let Node { entry, next } = *removed;
        *slot = next;
        self.size = self.size.saturating_sub(1);
        Some(entry)
    }

    /// Removes the head entry
    pub fn shift(&mut self) -> Option<Entry<V>> {
        let removed = self.head.take()?;
        let Node { entry, next } = *removed;
        self.head = next;
        self.size = self.size.saturating_sub(1);
        Some(entry)
    }

    /// Removes the tail entry
    pub fn pop(&mut self) -> Option<Entry<V>> {
        let last = self.size.checked_sub(1)?;
        let removed = self.link_mut(last)?.take()?;
        self.size = self.size.saturating_sub(1);
        Some(removed.entry)
    }

    /// Returns the keys from head to tail
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns the values from head to tail
    #[must_use]
    pub fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }

    /// Returns the `(key, value)` pairs from head to tail
    #[must_use]
    pub fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Returns an iterator over the entries from head to tail
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref(), remaining: self.size }
    }
}

impl<V> Drop for EntryChain<V> {
    fn drop(&mut self) {
        // Unlink node by node so long chains do not recurse on drop
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

/// Borrowing iterator over the entries of an [`EntryChain`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Node to yield next
    next: Option<&'a Node<V>>,
    /// Nodes left to yield
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.remaining = self.remaining.saturating_sub(1);
        Some((node.entry.key.as_str(), &node.entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// Owning iterator that drains an [`EntryChain`] from the head
#[derive(Debug)]
pub struct IntoIter<V> {
    /// The chain being drained
    chain: EntryChain<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.shift()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len(), Some(self.chain.len()))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> IntoIterator for EntryChain<V> {
    type Item = Entry<V>;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { chain: self }
    }
}

impl<'a, V> IntoIterator for &'a EntryChain<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
