//! # tablekv
//!
//! A concurrent, in-process key-value table store with:
//! - Named tables, created and deleted explicitly
//! - O(1) point reads and upserts through a per-table key index
//! - Ordered range reads with an end-of-data flag for pagination
//! - Two-level locking: tables never block each other
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Callers (many threads)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 MemDb (table registry)                       │
//! │          RwLock<HashMap<String, Arc<Table>>>                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │  lookup, then release
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Table A   │          │   Table B   │
//!   │  (RwLock)   │          │  (RwLock)   │
//!   │ index + seq │          │ index + seq │
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use tablekv::MemDb;
//!
//! let db: MemDb<String, u32> = MemDb::new();
//! db.create_table("products");
//! db.write("products", "a".to_string(), 1).unwrap();
//! db.write("products", "b".to_string(), 2).unwrap();
//!
//! assert_eq!(db.read("products", "a").unwrap(), 1);
//!
//! let page = db.read_range("products", 0, 10).unwrap();
//! assert_eq!(page.items, vec![1, 2]);
//! assert!(page.exhausted);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod store;
pub mod command;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::Config;
pub use store::{MemDb, TableStore};
pub use table::{RangeRead, Table};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tablekv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
