//! Interned measurement-name schemas
//!
//! Millions of detected objects tend to carry the same handful of measurement
//! names in the same order ("Area", "Perimeter", "Mean intensity", ...).
//! Instead of each list holding its own names plus a lookup map, closed lists
//! share one immutable [`Schema`] per distinct name sequence, handed out by a
//! [`SchemaPool`].
//!
//! ```text
//! NumericMeasurementList (N) ──> Arc<Schema> (1) <── Weak ── SchemaPool
//!                                    │
//!                                    ├── names: Arc<[Arc<str>]>
//!                                    └── index: name -> position
//! ```
//!
//! # Example
//!
//! ```rust
//! use measurement_lists::schema::SchemaPool;
//! use std::sync::Arc;
//!
//! let pool = SchemaPool::new();
//! let a = pool.intern_strs(&["Area", "Perimeter"]);
//! let b = pool.intern_strs(&["Area", "Perimeter"]);
//! assert!(Arc::ptr_eq(&a, &b));
//! assert_eq!(a.index_of("Perimeter"), Some(1));
//! ```

mod config;
mod pool;

pub use config::{PoolConfig, PoolConfigBuilder};
pub use pool::SchemaPool;

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Shared, immutable sequence of measurement names.
///
/// Closed lists with the same schema return the same `NameList`, so callers
/// can compare schemas with [`Arc::ptr_eq`] instead of element by element.
pub type NameList = Arc<[Arc<str>]>;

/// Canonical name sequence with a name -> index map.
///
/// Schemas are immutable once built and read without locking.
#[derive(Debug)]
pub struct Schema {
    names: NameList,
    index: FxHashMap<Arc<str>, usize>,
}

impl Schema {
    pub(crate) fn new(names: NameList) -> Self {
        let mut index = FxHashMap::with_capacity_and_hasher(names.len(), Default::default());
        for (i, name) in names.iter().enumerate() {
            index.entry(Arc::clone(name)).or_insert(i);
        }
        Self { names, index }
    }

    /// The shared name sequence.
    #[must_use]
    pub const fn names(&self) -> &NameList {
        &self.names
    }

    /// Position of `name`, if present.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether `name` is part of this schema.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
