//! Table Module
//!
//! One named collection of records and the lock guarding it.
//!
//! ## Responsibilities
//! - O(1) point reads, inserts and in-place updates
//! - Ordered range reads with an end-of-data flag
//! - Delete with compaction (keeps index and sequence in step)
//! - Many concurrent readers, one exclusive writer
//!
//! ## Data Structure Choice
//! A `HashMap<K, usize>` index layered over a `Vec` sequence:
//! ```text
//!   index                      sequence
//! ┌────────┬─────┐     ┌─────┬─────────────────┐
//! │ "a"    │  0  │────▶│  0  │ ("a", value_a)  │
//! │ "c"    │  1  │────▶│  1  │ ("c", value_c)  │
//! │ "d"    │  2  │────▶│  2  │ ("d", value_d)  │
//! └────────┴─────┘     └─────┴─────────────────┘
//! ```
//! - Lookups go through the index, ranges slice the sequence directly
//! - Positions are assigned once, at append time
//! - Deletes shift the tail and re-index it: O(size), accepted because
//!   deletes are the rarest operation in a read-heavy workload

#[allow(clippy::module_inception)]
mod table;

pub use table::Table;

/// Entry stored in a table's sequence
///
/// The key travels with the value so the tail of the sequence can be
/// re-indexed after a delete without scanning the whole index.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: V,
}

/// Result of a bounded range read
#[derive(Debug, Clone, PartialEq)]
pub struct RangeRead<V> {
    /// Copies of the records in `[start, end)`
    pub items: Vec<V>,

    /// True when the (clamped) end bound reached the end of the table
    pub exhausted: bool,
}

impl<V> RangeRead<V> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
