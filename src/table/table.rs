//! Table implementation
//!
//! Index + sequence pair behind a single RwLock.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use parking_lot::RwLock;

use super::{Entry, RangeRead};
use crate::error::{Result, StoreError};

/// A named, independently locked collection of records
///
/// ## Concurrency:
/// - `read`, `read_range`, `read_all`: shared lock (run in parallel)
/// - `write`, `delete`: exclusive lock
/// - Index and sequence live behind the same lock, so no reader can see
///   one of them updated and the other stale
pub struct Table<K, V> {
    /// Table name (used in error reports)
    name: String,

    /// Index + sequence, always mutated together
    data: RwLock<TableData<K, V>>,
}

struct TableData<K, V> {
    /// key -> position in `sequence`
    index: HashMap<K, usize>,

    /// Records in insertion order (compacted on delete)
    sequence: Vec<Entry<K, V>>,
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash + Clone + Display,
    V: Clone,
{
    /// Create a new empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_capacity(name, 0)
    }

    /// Create a new empty table with room for `capacity` records
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            data: RwLock::new(TableData {
                index: HashMap::with_capacity(capacity),
                sequence: Vec::with_capacity(capacity),
            }),
        }
    }

    /// Insert or update a record (write lock)
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn write(&self, key: K, value: V) {
        let mut data = self.data.write();

        if let Some(&position) = data.index.get(&key) {
            data.sequence[position].value = value;
            return;
        }

        let position = data.sequence.len();
        data.sequence.push(Entry {
            key: key.clone(),
            value,
        });
        data.index.insert(key, position);
    }

    /// Get a copy of the record stored under `key` (read lock)
    pub fn read<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let data = self.data.read();

        match data.index.get(key) {
            Some(&position) => Ok(data.sequence[position].value.clone()),
            None => Err(self.key_not_found(key)),
        }
    }

    /// Copy the records in `[start, end)` (read lock)
    ///
    /// `start` is clamped to 0 and `end` to the current length; out of
    /// bounds values are not an error. Fails only when `start > end` after
    /// clamping.
    pub fn read_range(&self, start: i64, end: i64) -> Result<RangeRead<V>> {
        let data = self.data.read();
        let len = data.sequence.len();

        let start = start.max(0);
        let end = end.min(i64::try_from(len).unwrap_or(i64::MAX));
        if start > end {
            return Err(StoreError::InvalidRange { start, end });
        }

        // Both bounds are now within 0..=len
        let (start, end) = (start as usize, end as usize);
        let items = data.sequence[start..end]
            .iter()
            .map(|entry| entry.value.clone())
            .collect();

        Ok(RangeRead {
            items,
            exhausted: end == len,
        })
    }

    /// Copy every record, in sequence order (read lock)
    pub fn read_all(&self) -> Vec<V> {
        let data = self.data.read();
        data.sequence.iter().map(|entry| entry.value.clone()).collect()
    }

    /// Remove a record and compact the sequence (write lock)
    ///
    /// Every record after the removed one moves one position earlier and
    /// its index entry is decremented to match.
    pub fn delete<Q>(&self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let mut data = self.data.write();
        let TableData { index, sequence } = &mut *data;

        let position = index.remove(key).ok_or_else(|| self.key_not_found(key))?;
        sequence.remove(position);

        for (offset, entry) in sequence[position..].iter().enumerate() {
            if let Some(slot) = index.get_mut::<K>(&entry.key) {
                *slot = position + offset;
            }
        }

        tracing::trace!(
            table = %self.name,
            position,
            shifted = sequence.len() - position,
            "compacted table after delete"
        );
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.data.read().sequence.len()
    }

    /// Check if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if a record exists for `key`
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.data.read().index.contains_key(key)
    }

    /// Verify that index and sequence describe the same set of records:
    /// same size, and every sequence position is indexed under its own key.
    pub fn is_consistent(&self) -> bool {
        let data = self.data.read();

        data.index.len() == data.sequence.len()
            && data
                .sequence
                .iter()
                .enumerate()
                .all(|(position, entry)| data.index.get(&entry.key) == Some(&position))
    }

    fn key_not_found<Q: Display + ?Sized>(&self, key: &Q) -> StoreError {
        StoreError::KeyNotFound {
            key: key.to_string(),
            table: self.name.clone(),
        }
    }
}
