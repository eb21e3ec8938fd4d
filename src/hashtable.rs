//! A hash table with a fixed number of buckets. Keys that hash to the same bucket are chained
//! together in a singly linked list, newest first.
//!
//! The table never resizes: the bucket count is chosen once through [`HashTableConfig`].
//!
//! # Examples
//!
//! ```
//! use iterbst::{HashTable, HashTableConfig};
//!
//! let mut table = HashTable::new(HashTableConfig { buckets: 13 }).unwrap();
//!
//! table.insert("apple", 1.5);
//! table.insert("pear", 0.5);
//! assert_eq!(table.get("apple"), Some(&1.5));
//!
//! // Inserting an existing key updates it in place.
//! table.insert("apple", 2.0);
//! assert_eq!(table.get("apple"), Some(&2.0));
//! assert_eq!(table.len(), 2);
//!
//! assert_eq!(table.delete("apple"), Some(2.0));
//! table.clear();
//! assert!(table.is_empty());
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bucket count used by [`HashTableConfig::default`].
pub const DEFAULT_BUCKETS: usize = 101;

/// Construction-time settings of a [`HashTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HashTableConfig {
    /// How many chains the table spreads its keys over. Must be at least 1.
    pub buckets: usize,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
        }
    }
}

impl HashTableConfig {
    /// Picks the bucket for `key`: the sum of its character codes, plus one, modulo the bucket
    /// count.
    ///
    /// This spreads keys poorly. Every permutation of the same characters lands in the same
    /// bucket.
    pub fn bucket_of(&self, key: &str) -> usize {
        let sum = key
            .chars()
            .fold(1usize, |sum, c| sum.wrapping_add(c as usize));
        sum % self.buckets
    }
}

type Chain<V> = Option<Box<Entry<V>>>;

/// One key/value pair in a bucket's chain. The entry owns its copy of the key.
pub struct Entry<V> {
    key: String,
    value: V,
    next: Chain<V>,
}

impl<V> Entry<V> {
    /// The key this entry was inserted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value stored under the key.
    pub fn value(&self) -> &V {
        &self.value
    }
}

impl<V: fmt::Debug> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

/// A map from string keys to values over a fixed array of chained buckets.
pub struct HashTable<V> {
    buckets: Vec<Chain<V>>,
    config: HashTableConfig,
    len: usize,
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::with_valid_config(HashTableConfig::default())
    }
}

impl<V> Drop for HashTable<V> {
    fn drop(&mut self) {
        // Unlink chains one entry at a time instead of letting `Box` recurse down them.
        self.clear();
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries().map(|entry| (entry.key(), entry.value())))
            .finish()
    }
}

impl<V> HashTable<V> {
    /// Generates a new, empty table with the bucket count from `config`.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroBuckets`] if `config.buckets` is 0.
    pub fn new(config: HashTableConfig) -> Result<Self> {
        if config.buckets == 0 {
            return Err(Error::ZeroBuckets);
        }
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: HashTableConfig) -> Self {
        let mut buckets = Vec::with_capacity(config.buckets);
        buckets.resize_with(config.buckets, || None);
        log::debug!("created hash table with {} buckets", config.buckets);
        Self {
            buckets,
            config,
            len: 0,
        }
    }

    /// The settings this table was built with.
    pub fn config(&self) -> &HashTableConfig {
        &self.config
    }

    /// How many buckets keys are spread over.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// How many entries are stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finds the entry stored under `key`.
    pub fn search(&self, key: &str) -> Option<&Entry<V>> {
        let mut current = self.buckets[self.config.bucket_of(key)].as_deref();
        while let Some(entry) = current {
            if entry.key == key {
                return Some(entry);
            }
            current = entry.next.as_deref();
        }
        None
    }

    /// The value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.search(key).map(Entry::value)
    }

    /// A mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.config.bucket_of(key);
        let mut current = self.buckets[index].as_deref_mut();
        while let Some(entry) = current {
            if entry.key == key {
                return Some(&mut entry.value);
            }
            current = entry.next.as_deref_mut();
        }
        None
    }

    /// Stores `value` under `key`. An existing entry is updated in place and its old value
    /// returned. A new entry is linked at the head of its bucket's chain.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        if let Some(existing) = self.get_mut(key) {
            return Some(std::mem::replace(existing, value));
        }

        let index = self.config.bucket_of(key);
        let bucket = &mut self.buckets[index];
        let entry = Box::new(Entry {
            key: key.to_owned(),
            value,
            next: bucket.take(),
        });
        *bucket = Some(entry);
        self.len += 1;
        None
    }

    /// Unlinks the entry stored under `key` and returns its value. Nothing happens if the key
    /// isn't present.
    pub fn delete(&mut self, key: &str) -> Option<V> {
        let index = self.config.bucket_of(key);
        let mut link = &mut self.buckets[index];
        loop {
            if link.as_ref()?.key == key {
                break;
            }
            link = &mut link.as_mut()?.next;
        }

        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len -= 1;
        Some(removed.value)
    }

    /// Releases every entry, returning the table to the state it was created in. The bucket
    /// count is kept.
    pub fn clear(&mut self) {
        let mut released = 0usize;
        for bucket in &mut self.buckets {
            let mut current = bucket.take();
            while let Some(mut entry) = current {
                current = entry.next.take();
                released += 1;
            }
        }
        self.len = 0;
        log::debug!("cleared {released} hash table entries");
    }

    /// Iterates every entry, bucket by bucket and newest first within a bucket.
    pub fn entries(&self) -> Entries<'_, V> {
        Entries {
            buckets: self.buckets.iter(),
            current: None,
        }
    }
}

/// An iterator over the entries of a [`HashTable`]. The order is not meaningful.
pub struct Entries<'a, V> {
    buckets: std::slice::Iter<'a, Chain<V>>,
    current: Option<&'a Entry<V>>,
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current {
                self.current = entry.next.as_deref();
                return Some(entry);
            }
            self.current = self.buckets.next()?.as_deref();
        }
    }
}
